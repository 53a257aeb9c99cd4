//! Environment-backed configuration, validated once at startup.

use crate::{Error, Result};
use std::path::PathBuf;

const DEFAULT_HF_BASE_URL: &str = "https://api-inference.huggingface.co";

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub huggingface_api_key: String,
    pub huggingface_base_url: String,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .map_err(|_| Error::Config("MONGODB_URI not set".to_string()))?,
            mongodb_db: std::env::var("MONGODB_DB").unwrap_or_else(|_| "chat_db".to_string()),
            huggingface_api_key: std::env::var("HUGGINGFACE_API_KEY")
                .map_err(|_| Error::Config("HUGGINGFACE_API_KEY not set".to_string()))?,
            huggingface_base_url: std::env::var("HUGGINGFACE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_HF_BASE_URL.to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .map_err(|_| Error::Config("JWT_SECRET not set".to_string()))?,
            upload_dir: PathBuf::from(
                std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            ),
            port: match std::env::var("PORT") {
                Ok(port) => port
                    .parse()
                    .map_err(|_| Error::Config(format!("Invalid PORT value: {}", port)))?,
                Err(_) => 3000,
            },
        })
    }
}
