//! HTTP route handlers and router assembly.

pub mod health;
pub mod image;

use crate::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;

/// Build the application router. Uploaded and generated images are served
/// statically so persisted `image_path` values resolve.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(image::image_routes())
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .with_state(state)
}
