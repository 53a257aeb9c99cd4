use super::ImageGenerationService;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Serialize;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// JSON body for text-to-image calls.
#[derive(Debug, Serialize)]
struct TextToImageRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    num_inference_steps: u32,
    guidance_scale: f32,
}

pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl HuggingFaceClient {
    pub fn new(api_key: String) -> Self {
        Self::new_with_client(api_key, Client::new())
    }

    /// Reuse an existing HTTP connection pool.
    pub fn new_with_client(api_key: String, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn post_inference(
        &self,
        model: &str,
        build: impl FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
    ) -> Result<Vec<u8>> {
        let url = format!("{}/models/{}", self.base_url, model);
        let request = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key));

        let response = build(request).send().await.map_err(|e| {
            tracing::error!("Failed to send request to Hugging Face: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await?;
            tracing::error!("Hugging Face API error (status {}): {}", status, body);
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageGenerationService for HuggingFaceClient {
    async fn generate(&self, model: &str, prompt: &str, image: Option<&[u8]>) -> Result<Vec<u8>> {
        match image {
            Some(image) => {
                tracing::debug!("Sending image-to-image request for model {}", model);
                let form = Form::new().text("inputs", prompt.to_string()).part(
                    "image",
                    Part::bytes(image.to_vec())
                        .file_name("input.png")
                        .mime_str("image/png")?,
                );
                self.post_inference(model, |req| req.multipart(form)).await
            }
            None => {
                tracing::debug!("Sending text-to-image request for model {}", model);
                let body = TextToImageRequest {
                    inputs: prompt,
                    parameters: InferenceParameters {
                        num_inference_steps: 30,
                        guidance_scale: 7.5,
                    },
                };
                self.post_inference(model, |req| req.json(&body)).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> HuggingFaceClient {
        HuggingFaceClient::new("test-key".to_string()).with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_text_only_prompt_sends_json_payload() {
        let server = MockServer::start().await;
        let image = vec![0x89, 0x50, 0x4E, 0x47];

        Mock::given(method("POST"))
            .and(path("/models/stabilityai/stable-diffusion-2"))
            .and(header("Authorization", "Bearer test-key"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("\"inputs\":\"a red fox\""))
            .and(body_string_contains("\"num_inference_steps\":30"))
            .and(body_string_contains("\"guidance_scale\":7.5"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate("stabilityai/stable-diffusion-2", "a red fox", None)
            .await
            .unwrap();
        assert_eq!(result, image);
    }

    #[tokio::test]
    async fn test_image_prompt_sends_multipart_payload() {
        let server = MockServer::start().await;
        // ASCII bytes so the multipart body is matchable as a string.
        let reference = b"fake-reference-image".to_vec();

        Mock::given(method("POST"))
            .and(path("/models/timbrooks/instruct-pix2pix"))
            .and(body_string_contains("name=\"inputs\""))
            .and(body_string_contains("make it snowy"))
            .and(body_string_contains("filename=\"input.png\""))
            .and(body_string_contains("fake-reference-image"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1, 2, 3]))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate(
                "timbrooks/instruct-pix2pix",
                "make it snowy",
                Some(&reference),
            )
            .await
            .unwrap();
        assert_eq!(result, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_upstream_error_surfaces_status_and_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/bad/model"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Model bad/model not found"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate("bad/model", "anything", None)
            .await
            .unwrap_err();

        match err {
            Error::Upstream { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("expected upstream error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_returns_empty_bytes() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/some/model"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate("some/model", "anything", None)
            .await
            .unwrap();
        assert!(result.is_empty());
    }
}
