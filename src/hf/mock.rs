use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// One recorded call to the mock generator.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub model: String,
    pub prompt: String,
    pub image: Option<Vec<u8>>,
}

#[derive(Clone)]
pub struct MockImageGenerator {
    responses: Arc<Mutex<Vec<Vec<u8>>>>,
    failure: Arc<Mutex<Option<(u16, String)>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockImageGenerator {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            failure: Arc::new(Mutex::new(None)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_response(self, response: Vec<u8>) -> Self {
        self.responses.lock().unwrap().push(response);
        self
    }

    /// Make every call fail as if the upstream API returned this status.
    pub fn with_upstream_failure(self, status: u16, body: &str) -> Self {
        *self.failure.lock().unwrap() = Some((status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<RecordedCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl Default for MockImageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerator {
    async fn generate(&self, model: &str, prompt: &str, image: Option<&[u8]>) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().push(RecordedCall {
            model: model.to_string(),
            prompt: prompt.to_string(),
            image: image.map(|bytes| bytes.to_vec()),
        });

        if let Some((status, body)) = self.failure.lock().unwrap().clone() {
            return Err(Error::Upstream { status, body });
        }

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Tiny valid PNG as default
            Ok(vec![
                0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
                0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
                0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
                0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
                0x44, 0x41, // IDAT chunk
                0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2,
                0x25, 0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
                0x44, 0xAE, 0x42, 0x60, 0x82,
            ])
        } else {
            let index = (self.calls.lock().unwrap().len() - 1) % responses.len();
            Ok(responses[index].clone())
        }
    }
}
