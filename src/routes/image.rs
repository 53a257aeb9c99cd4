use crate::auth::AuthedUser;
use crate::models::{ConversationMessage, GenerateImageRequest};
use crate::prompt::assemble_prompt;
use crate::state::AppState;
use crate::{permissions, Error, Result};
use axum::extract::{Json, State};
use axum::routing::post;
use axum::Router;

pub fn image_routes() -> Router<AppState> {
    Router::new().route("/image/huggingface", post(huggingface_endpoint))
}

/// Generate an image with a Hugging Face model and persist it as a
/// conversation message.
///
/// The prompt's text parts become the textual prompt; when an image part is
/// present, its file conditions the generation (image-to-image). Only the
/// first image part is used; extras are ignored.
pub async fn huggingface_endpoint(
    State(state): State<AppState>,
    AuthedUser(user): AuthedUser,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<ConversationMessage>> {
    let billing = permissions::check_image_permissions(&user, &request)?;

    let assembled = assemble_prompt(&request.prompt, &state.config.upload_dir);
    if assembled.image_paths.len() > 1 {
        tracing::debug!(
            "Request carries {} image parts; only the first is used",
            assembled.image_paths.len()
        );
    }

    // Read the reference image fully before the upstream call starts.
    let reference = match assembled.image_paths.first() {
        Some(path) => Some(tokio::fs::read(path).await?),
        None => None,
    };

    let image = state
        .generator
        .generate(&request.model, &assembled.text, reference.as_deref())
        .await?;

    if image.is_empty() {
        return Err(Error::EmptyImage);
    }

    let message = state
        .conversations
        .save_image_message(&user.email, &request.model, &assembled.text, &image, billing)
        .await?;

    Ok(Json(message))
}
