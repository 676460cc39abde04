//! OpenAI provider implementations.
//!
//! Covers chat completions and DALL-E image generation. Both endpoints
//! authenticate with the same bearer credential.

use super::{ChatBackend, ChatRole, ChatTurn, ImageBackend, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const IMAGE_GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// System preamble prepended to every OpenAI conversation.
const SYSTEM_PREAMBLE: &str = "You are a helpful AI assistant named LumiChat AI.";

/// OpenAI provider configuration, shared by chat and DALL-E.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
}

/// OpenAI chat completions provider.
pub struct OpenAiChatProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiChatProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Build the outbound payload: system preamble, prior history in
    /// order, then the new user turn.
    fn build_request(&self, message: &str, history: &[ChatTurn]) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: ChatRole::System,
            content: SYSTEM_PREAMBLE.to_string(),
        });
        messages.extend(history.iter().map(|turn| WireMessage {
            role: turn.role,
            content: turn.content.clone(),
        }));
        messages.push(WireMessage {
            role: ChatRole::User,
            content: message.to_string(),
        });

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 500,
        }
    }
}

#[async_trait]
impl ChatBackend for OpenAiChatProvider {
    async fn complete(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError> {
        let request = self.build_request(message, history);

        tracing::debug!(
            model = %self.config.model,
            history_len = history.len(),
            "Sending request to OpenAI chat completions"
        );

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "OpenAI chat completions failed");
            return Err(ProviderError::ApiFailure("OpenAI API failed".to_string()));
        }

        let api_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::UnexpectedShape { provider: "OpenAI" })?;

        extract_reply(api_response)
    }
}

/// Pull the first choice's message content out of a success response.
fn extract_reply(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(ProviderError::UnexpectedShape { provider: "OpenAI" })
}

/// DALL-E image generation provider.
pub struct DalleImageProvider {
    config: OpenAiConfig,
    client: Client,
}

impl DalleImageProvider {
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn build_request(&self, prompt: &str) -> ImageGenerationRequest {
        ImageGenerationRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            n: 1,
            size: "1024x1024".to_string(),
        }
    }
}

#[async_trait]
impl ImageBackend for DalleImageProvider {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = self.build_request(prompt);

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending request to OpenAI image generations"
        );

        let response = self
            .client
            .post(IMAGE_GENERATIONS_URL)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!(%status, body = %error_text, "OpenAI image generations failed");
            return Err(ProviderError::ApiFailure("DALL-E failed".to_string()));
        }

        let api_response: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|_| ProviderError::UnexpectedShape { provider: "DALL-E" })?;

        extract_image_url(api_response)
    }
}

/// Pull the first generated image's URL out of a success response.
fn extract_image_url(response: ImageGenerationResponse) -> Result<String, ProviderError> {
    response
        .data
        .into_iter()
        .next()
        .map(|image| image.url)
        .ok_or(ProviderError::UnexpectedShape { provider: "DALL-E" })
}

// ============================================================================
// OpenAI API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: ChatRole,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    n: u32,
    size: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
struct GeneratedImage {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> OpenAiChatProvider {
        OpenAiChatProvider::new(OpenAiConfig {
            api_key: "test-key".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        })
    }

    #[test]
    fn payload_starts_with_system_preamble_and_ends_with_user_turn() {
        let history = vec![
            ChatTurn {
                role: ChatRole::User,
                content: "earlier question".to_string(),
            },
            ChatTurn {
                role: ChatRole::Assistant,
                content: "earlier answer".to_string(),
            },
        ];

        let request = provider().build_request("new question", &history);
        let value = serde_json::to_value(&request).unwrap();
        let messages = value["messages"].as_array().unwrap();

        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0]["role"], "system");
        assert_eq!(messages[0]["content"], SYSTEM_PREAMBLE);
        assert_eq!(messages[1]["content"], "earlier question");
        assert_eq!(messages[2]["content"], "earlier answer");
        assert_eq!(messages[3]["role"], "user");
        assert_eq!(messages[3]["content"], "new question");
    }

    #[test]
    fn payload_carries_fixed_sampling_parameters() {
        let request = provider().build_request("hi", &[]);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["temperature"], 0.7);
        assert_eq!(value["max_tokens"], 500);
    }

    #[test]
    fn extract_reply_takes_first_choice_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello"}}]
        }))
        .unwrap();

        assert_eq!(extract_reply(response).unwrap(), "hello");
    }

    #[test]
    fn extract_reply_without_choices_is_a_shape_fault() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({})).unwrap();
        let err = extract_reply(response).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::UnexpectedShape { provider: "OpenAI" }
        ));
    }

    #[test]
    fn dalle_payload_requests_one_square_image() {
        let provider = DalleImageProvider::new(OpenAiConfig {
            api_key: "test-key".to_string(),
            model: "dall-e-3".to_string(),
        });

        let value = serde_json::to_value(provider.build_request("a cat")).unwrap();
        assert_eq!(value["model"], "dall-e-3");
        assert_eq!(value["prompt"], "a cat");
        assert_eq!(value["n"], 1);
        assert_eq!(value["size"], "1024x1024");
    }

    #[test]
    fn extract_image_url_takes_first_entry() {
        let response: ImageGenerationResponse = serde_json::from_value(json!({
            "data": [{"url": "http://x"}]
        }))
        .unwrap();

        assert_eq!(extract_image_url(response).unwrap(), "http://x");
    }

    #[test]
    fn extract_image_url_without_data_is_a_shape_fault() {
        let response: ImageGenerationResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(
            extract_image_url(response).unwrap_err(),
            ProviderError::UnexpectedShape { provider: "DALL-E" }
        ));
    }
}
