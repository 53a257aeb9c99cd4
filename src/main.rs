use anyhow::Result;
use devochat_backend::config::Config;
use devochat_backend::hf::HuggingFaceClient;
use devochat_backend::routes;
use devochat_backend::state::AppState;
use devochat_backend::store::{MongoConversationStore, MongoUserStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "devochat_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting devochat backend");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let mongo = mongodb::Client::with_uri_str(&config.mongodb_uri).await?;
    let db = mongo.database(&config.mongodb_db);
    info!("Connected to MongoDB database {}", config.mongodb_db);

    let generator =
        HuggingFaceClient::new(config.huggingface_api_key.clone())
            .with_base_url(config.huggingface_base_url.clone());

    let state = AppState {
        users: Arc::new(MongoUserStore::new(&db)),
        conversations: Arc::new(MongoConversationStore::new(
            &db,
            config.upload_dir.clone(),
        )),
        generator: Arc::new(generator),
        config: Arc::new(config),
    };

    let port = state.config.port;
    let app = routes::router(state).layer(TraceLayer::new_for_http());

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
