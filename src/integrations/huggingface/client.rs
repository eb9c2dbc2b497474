// src/integrations/huggingface/client.rs
//
// Hugging Face Inference API - text-to-image
//
// ARCHITECTURE:
// - One POST per image, bearer-token authenticated
// - Binary image body → `data:` URL handed to the orchestrator
// - No retries; the caller decides what a failure means
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or persists records

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::wallpaper::image_data::{encode_data_url, DEFAULT_IMAGE_MIME};
use crate::domain::ModelParams;
use crate::error::{AppError, AppResult};
use crate::integrations::ImageGenerator;

pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Longest error body echoed back in messages
const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    width: u32,
    height: u32,
    num_inference_steps: u32,
    guidance_scale: f32,
}

/// Error body returned by the inference API
#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
    estimated_time: Option<f64>,
}

/// Hugging Face Inference API client
pub struct HuggingFaceClient {
    base_url: String,
    api_key: Option<String>,
    http_client: Client,
}

impl HuggingFaceClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_http_client(http_client, api_key, base_url))
    }

    pub fn with_http_client(
        http_client: Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            http_client,
        }
    }

    fn endpoint(&self, model_id: &str) -> String {
        format!("{}/models/{}", self.base_url, model_id)
    }

    /// Generate one image and return it as a `data:` URL.
    pub async fn text_to_image(&self, prompt: &str, params: &ModelParams) -> AppResult<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::Configuration(
                "Hugging Face API key is not defined. Set HUGGINGFACE_API_KEY.".to_string(),
            )
        })?;

        let body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                width: params.width,
                height: params.height,
                num_inference_steps: params.num_inference_steps,
                guidance_scale: params.guidance_scale,
            },
        };

        let response = self
            .http_client
            .post(self.endpoint(params.model_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", api_key))
            .header(header::ACCEPT, "image/png, image/jpeg, application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Hugging Face request failed: {}", e)))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(';').next().unwrap_or(value).trim().to_lowercase());

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(format!("Failed to read Hugging Face response: {}", e)))?;

        if !status.is_success() {
            return Err(AppError::Network(describe_failure(status, &bytes)));
        }

        let mime = match content_type.as_deref() {
            Some(mime) if mime.starts_with("image/") => mime.to_string(),
            Some("application/json") => {
                return Err(AppError::Network(format!(
                    "Hugging Face returned no image: {}",
                    truncate(&String::from_utf8_lossy(&bytes))
                )))
            }
            _ => DEFAULT_IMAGE_MIME.to_string(),
        };

        if bytes.is_empty() {
            return Err(AppError::Network(
                "Hugging Face returned an empty image".to_string(),
            ));
        }

        log::debug!("Received {} bytes of {} from {}", bytes.len(), mime, params.model_id);
        Ok(encode_data_url(&mime, &bytes))
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceClient {
    async fn generate_image(&self, prompt: &str, params: &ModelParams) -> AppResult<String> {
        self.text_to_image(prompt, params).await
    }
}

fn describe_failure(status: StatusCode, body: &[u8]) -> String {
    match serde_json::from_slice::<InferenceError>(body) {
        Ok(InferenceError {
            error,
            estimated_time: Some(eta),
        }) => format!(
            "API request failed with status {}: {} (ready in ~{:.0}s)",
            status, error, eta
        ),
        Ok(InferenceError { error, .. }) => {
            format!("API request failed with status {}: {}", status, error)
        }
        Err(_) => format!(
            "API request failed with status {}: {}",
            status,
            truncate(&String::from_utf8_lossy(body))
        ),
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= MAX_ERROR_BODY {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_ERROR_BODY).collect();
    format!("{}…", cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageModel;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response; resolves to the raw request text.
    async fn serve_once(
        status: &'static str,
        content_type: &'static str,
        body: Vec<u8>,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                content_type,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });

        (base_url, handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn client(base_url: &str) -> HuggingFaceClient {
        let http_client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HuggingFaceClient::with_http_client(http_client, Some("hf_test_key".to_string()), base_url)
    }

    #[test]
    fn test_endpoint_building() {
        let client = client("https://example.test/");
        assert_eq!(
            client.endpoint("stabilityai/stable-diffusion-xl-base-1.0"),
            "https://example.test/models/stabilityai/stable-diffusion-xl-base-1.0"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client =
            HuggingFaceClient::new(Some("  ".to_string()), DEFAULT_BASE_URL, Duration::from_secs(1))
                .unwrap();
        let params = ModelParams::for_model(ImageModel::SdXlBase);
        let err = client.text_to_image("forest", &params).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_image_response_becomes_data_url() {
        let (base_url, server) = serve_once("200 OK", "image/png", vec![1, 2, 3]).await;
        let params = ModelParams::for_model(ImageModel::SdXlBase);

        let image = client(&base_url)
            .text_to_image("forest, high quality", &params)
            .await
            .unwrap();
        assert_eq!(image, "data:image/png;base64,AQID");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /models/stabilityai/stable-diffusion-xl-base-1.0 "));
        assert!(request.to_lowercase().contains("authorization: bearer hf_test_key"));
        assert!(request.contains(r#""inputs":"forest, high quality""#));
        assert!(request.contains(r#""num_inference_steps":30"#));
    }

    #[tokio::test]
    async fn test_error_status_is_network_failure() {
        let body = br#"{"error":"Model is currently loading","estimated_time":20.0}"#.to_vec();
        let (base_url, server) =
            serve_once("503 Service Unavailable", "application/json", body).await;
        let params = ModelParams::for_model(ImageModel::SdXlBase);

        let err = client(&base_url)
            .text_to_image("forest", &params)
            .await
            .unwrap_err();
        match err {
            AppError::Network(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("Model is currently loading"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        server.await.unwrap();
    }

    #[test]
    fn test_describe_failure_with_plain_body() {
        let message = describe_failure(StatusCode::UNAUTHORIZED, b"Invalid credentials");
        assert_eq!(
            message,
            "API request failed with status 401 Unauthorized: Invalid credentials"
        );
    }

    #[test]
    fn test_truncate_long_bodies() {
        let long = "x".repeat(MAX_ERROR_BODY + 50);
        assert_eq!(truncate(&long).chars().count(), MAX_ERROR_BODY + 1);
    }
}
