//! Hugging Face Inference API integration.
//!
//! One call per request: multipart image-to-image when a reference image is
//! supplied, JSON text-to-image otherwise.

pub mod client;
pub mod mock;

pub use client::HuggingFaceClient;
pub use mock::MockImageGenerator;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Generate an image for `prompt` with the given model, optionally
    /// conditioned on a reference image. Returns the raw image bytes.
    async fn generate(&self, model: &str, prompt: &str, image: Option<&[u8]>) -> Result<Vec<u8>>;
}
