//! AI provider abstractions and implementations.
//!
//! Each provider adapter translates the gateway's uniform chat/image
//! request into one upstream wire format and extracts the single field
//! the gateway returns. Adapters are constructed once at startup with
//! injected credentials and selected through [`ProviderRegistry`].

pub mod claude;
pub mod gemini;
pub mod mock;
pub mod openai;
pub mod stability;

use crate::config::GatewayConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use std::sync::Arc;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Upstream answered with a non-success HTTP status. Callers see the
    /// fixed per-provider message; the upstream body is logged and
    /// discarded.
    #[error("{0}")]
    ApiFailure(String),

    /// Upstream answered 2xx but the expected field was absent.
    #[error("{provider} returned an unexpected response")]
    UnexpectedShape { provider: &'static str },

    /// Transport-level failure before any response arrived.
    #[error("{0}")]
    Network(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::ApiFailure(msg) => AppError::Upstream(msg),
            ProviderError::UnexpectedShape { provider } => AppError::ShapeFault(format!(
                "{} returned an unexpected response",
                provider
            )),
            ProviderError::Network(msg) => AppError::Network(msg),
        }
    }
}

/// Role of a single conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

/// One prior turn of the conversation, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

/// Closed set of chat providers the gateway dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatProviderId {
    OpenAi,
    Gemini,
    Claude,
}

impl ChatProviderId {
    /// Resolve a wire identifier. Match is exact and case-sensitive.
    pub fn from_id(id: &str) -> Result<Self, AppError> {
        match id {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            "claude" => Ok(Self::Claude),
            _ => Err(AppError::InvalidProvider("Invalid AI type".to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Claude => "claude",
        }
    }
}

/// Closed set of image models the gateway dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageModelId {
    Stability,
    Dalle,
}

impl ImageModelId {
    /// Resolve a wire identifier. Match is exact and case-sensitive.
    pub fn from_id(id: &str) -> Result<Self, AppError> {
        match id {
            "stability" => Ok(Self::Stability),
            "dalle" => Ok(Self::Dalle),
            _ => Err(AppError::InvalidProvider("Invalid image model".to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stability => "stability",
            Self::Dalle => "dalle",
        }
    }
}

/// Trait for chat completion providers.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one message (plus prior history) and return the reply text.
    async fn complete(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError>;
}

/// Trait for image generation providers.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Generate one image and return its URL (or data URI).
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// One adapter per provider variant, resolved by id at dispatch time.
pub struct ProviderRegistry {
    openai: Arc<dyn ChatBackend>,
    gemini: Arc<dyn ChatBackend>,
    claude: Arc<dyn ChatBackend>,
    stability: Arc<dyn ImageBackend>,
    dalle: Arc<dyn ImageBackend>,
}

impl ProviderRegistry {
    pub fn new(
        openai: Arc<dyn ChatBackend>,
        gemini: Arc<dyn ChatBackend>,
        claude: Arc<dyn ChatBackend>,
        stability: Arc<dyn ImageBackend>,
        dalle: Arc<dyn ImageBackend>,
    ) -> Self {
        Self {
            openai,
            gemini,
            claude,
            stability,
            dalle,
        }
    }

    /// Build the real adapters from loaded configuration.
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(
            Arc::new(openai::OpenAiChatProvider::new(openai::OpenAiConfig {
                api_key: config.providers.openai_api_key.clone(),
                model: config.models.openai_chat_model.clone(),
            })),
            Arc::new(gemini::GeminiChatProvider::new(gemini::GeminiConfig {
                api_key: config.providers.gemini_api_key.clone(),
                model: config.models.gemini_chat_model.clone(),
            })),
            Arc::new(claude::ClaudeChatProvider::new(claude::ClaudeConfig {
                api_key: config.providers.claude_api_key.clone(),
                model: config.models.claude_chat_model.clone(),
            })),
            Arc::new(stability::StabilityImageProvider::new(
                stability::StabilityConfig {
                    api_key: config.providers.stability_api_key.clone(),
                },
            )),
            Arc::new(openai::DalleImageProvider::new(openai::OpenAiConfig {
                api_key: config.providers.openai_api_key.clone(),
                model: config.models.dalle_image_model.clone(),
            })),
        )
    }

    pub fn chat(&self, id: ChatProviderId) -> &dyn ChatBackend {
        match id {
            ChatProviderId::OpenAi => self.openai.as_ref(),
            ChatProviderId::Gemini => self.gemini.as_ref(),
            ChatProviderId::Claude => self.claude.as_ref(),
        }
    }

    pub fn image(&self, id: ImageModelId) -> &dyn ImageBackend {
        match id {
            ImageModelId::Stability => self.stability.as_ref(),
            ImageModelId::Dalle => self.dalle.as_ref(),
        }
    }
}
