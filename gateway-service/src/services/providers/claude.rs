//! Claude (Anthropic) chat provider implementation.
//!
//! Claude receives the caller's history followed by the new user turn.
//! The messages API rejects system-role entries in the turn list, so
//! any system turns in the supplied history are filtered out and no
//! system preamble is sent.

use super::{ChatBackend, ChatRole, ChatTurn, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude provider configuration.
#[derive(Debug, Clone)]
pub struct ClaudeConfig {
    pub api_key: String,
    pub model: String,
}

/// Claude chat provider.
pub struct ClaudeChatProvider {
    config: ClaudeConfig,
    client: Client,
}

impl ClaudeChatProvider {
    pub fn new(config: ClaudeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_request(&self, message: &str, history: &[ChatTurn]) -> MessagesRequest {
        let mut messages: Vec<WireMessage> = history
            .iter()
            .filter(|turn| turn.role != ChatRole::System)
            .map(|turn| WireMessage {
                role: turn.role,
                content: turn.content.clone(),
            })
            .collect();
        messages.push(WireMessage {
            role: ChatRole::User,
            content: message.to_string(),
        });

        MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: 500,
            messages,
        }
    }
}

#[async_trait]
impl ChatBackend for ClaudeChatProvider {
    async fn complete(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError> {
        let request = self.build_request(message, history);

        tracing::debug!(
            model = %self.config.model,
            history_len = history.len(),
            "Sending request to Claude messages API"
        );

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "Claude messages API failed");
            return Err(ProviderError::ApiFailure("Claude API failed".to_string()));
        }

        let api_response: MessagesResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::UnexpectedShape { provider: "Claude" })?;

        extract_reply(api_response)
    }
}

/// Pull the first content block's text out of a success response.
fn extract_reply(response: MessagesResponse) -> Result<String, ProviderError> {
    response
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or(ProviderError::UnexpectedShape { provider: "Claude" })
}

// ============================================================================
// Claude API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: ChatRole,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}
