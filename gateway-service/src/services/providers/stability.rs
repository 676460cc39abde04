//! Stability AI image provider implementation.
//!
//! Stability returns the generated image as base64 rather than a URL;
//! the adapter re-wraps it as a `data:` URI so the gateway's envelope
//! always carries a loadable image reference.

use super::{ImageBackend, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const TEXT_TO_IMAGE_URL: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/text-to-image";

/// Stability provider configuration.
#[derive(Debug, Clone)]
pub struct StabilityConfig {
    pub api_key: String,
}

/// Stability AI image provider.
pub struct StabilityImageProvider {
    config: StabilityConfig,
    client: Client,
}

impl StabilityImageProvider {
    pub fn new(config: StabilityConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_request(&self, prompt: &str) -> TextToImageRequest {
        TextToImageRequest {
            text_prompts: vec![TextPrompt {
                text: prompt.to_string(),
                weight: 1,
            }],
            cfg_scale: 7,
            height: 1024,
            width: 1024,
            steps: 30,
            samples: 1,
        }
    }
}

#[async_trait]
impl ImageBackend for StabilityImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = self.build_request(prompt);

        tracing::debug!(prompt_len = prompt.len(), "Sending request to Stability AI");

        let response = self
            .client
            .post(TEXT_TO_IMAGE_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "Stability AI failed");
            return Err(ProviderError::ApiFailure("Stability AI failed".to_string()));
        }

        let api_response: TextToImageResponse = response.json().await.map_err(|_| {
            ProviderError::UnexpectedShape {
                provider: "Stability AI",
            }
        })?;

        extract_image(api_response)
    }
}

/// Pull the first artifact's base64 payload and wrap it as a data URI.
fn extract_image(response: TextToImageResponse) -> Result<String, ProviderError> {
    response
        .artifacts
        .into_iter()
        .next()
        .map(|artifact| to_data_uri(&artifact.base64))
        .ok_or(ProviderError::UnexpectedShape {
            provider: "Stability AI",
        })
}

fn to_data_uri(base64_payload: &str) -> String {
    format!("data:image/png;base64,{}", base64_payload)
}

// ============================================================================
// Stability API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TextToImageRequest {
    text_prompts: Vec<TextPrompt>,
    cfg_scale: u32,
    height: u32,
    width: u32,
    steps: u32,
    samples: u32,
}

#[derive(Debug, Serialize)]
struct TextPrompt {
    text: String,
    weight: u32,
}

#[derive(Debug, Deserialize)]
struct TextToImageResponse {
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

#[derive(Debug, Deserialize)]
struct Artifact {
    base64: String,
}
