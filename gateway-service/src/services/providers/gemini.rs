//! Gemini chat provider implementation.
//!
//! Gemini gets only the latest message: prior history and the system
//! preamble are intentionally dropped from the outbound payload.

use super::{ChatBackend, ChatTurn, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini API base URL.
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

/// Gemini chat provider.
pub struct GeminiChatProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiChatProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// API key travels in the query string, not a header.
    fn api_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_API_BASE, self.config.model, self.config.api_key
        )
    }

    /// Single-turn payload built from the latest message only.
    fn build_request(&self, message: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![ContentPart {
                    text: message.to_string(),
                }],
            }],
        }
    }
}

#[async_trait]
impl ChatBackend for GeminiChatProvider {
    async fn complete(
        &self,
        message: &str,
        _history: &[ChatTurn],
    ) -> Result<String, ProviderError> {
        let request = self.build_request(message);

        tracing::debug!(
            model = %self.config.model,
            message_len = message.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "Gemini API failed");
            return Err(ProviderError::ApiFailure("Gemini API failed".to_string()));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::UnexpectedShape { provider: "Gemini" })?;

        extract_reply(api_response)
    }
}

/// Pull the first candidate's first text part out of a success response.
fn extract_reply(response: GenerateContentResponse) -> Result<String, ProviderError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .ok_or(ProviderError::UnexpectedShape { provider: "Gemini" })
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> GeminiChatProvider {
        GeminiChatProvider::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-pro".to_string(),
        })
    }

    #[test]
    fn payload_contains_only_the_latest_message() {
        let request = provider().build_request("what is rust?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({"contents": [{"parts": [{"text": "what is rust?"}]}]})
        );
    }

    #[test]
    fn api_key_is_passed_in_the_query_string() {
        let url = provider().api_url();
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent?key=test-key"
        );
    }

    #[test]
    fn extract_reply_takes_first_candidate_first_part() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "answer"}, {"text": "extra"}]}}]
        }))
        .unwrap();

        assert_eq!(extract_reply(response).unwrap(), "answer");
    }

    #[test]
    fn extract_reply_without_candidates_is_a_shape_fault() {
        let response: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_reply(response).unwrap_err(),
            ProviderError::UnexpectedShape { provider: "Gemini" }
        ));
    }
}
