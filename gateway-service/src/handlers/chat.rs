//! Chat proxy handler.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::services::providers::{ChatProviderId, ChatTurn};
use crate::startup::AppState;
use service_core::error::AppError;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Chat request body. Every field is optional at the wire level so that
/// validation, not deserialization, decides the error message.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ai: Option<String>,
    #[serde(default)]
    pub history: Option<Vec<ChatTurn>>,
}

/// Successful chat envelope.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub ai: &'static str,
}

// ============================================================================
// Handler
// ============================================================================

/// Forward a chat message to the selected provider.
///
/// POST /chat
pub async fn chat(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    // An unparseable body is treated the same as a missing field.
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();

    let message = match request.message {
        Some(message) if !message.is_empty() => message,
        _ => return Err(AppError::BadRequest("Message required".to_string())),
    };

    let provider = ChatProviderId::from_id(request.ai.as_deref().unwrap_or("openai"))?;
    let history = request.history.unwrap_or_default();

    let response = state
        .providers
        .chat(provider)
        .complete(&message, &history)
        .await
        .map_err(|e| {
            tracing::error!(provider = provider.as_str(), error = %e, "Chat provider call failed");
            AppError::from(e)
        })?;

    Ok(Json(ChatResponse {
        success: true,
        response,
        ai: provider.as_str(),
    }))
}
