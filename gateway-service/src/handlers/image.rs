//! Image generation proxy handler.

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::services::providers::ImageModelId;
use crate::startup::AppState;
use service_core::error::AppError;

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Image request body.
#[derive(Debug, Default, Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful image envelope.
#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub success: bool,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub prompt: String,
}

// ============================================================================
// Handler
// ============================================================================

/// Forward an image prompt to the selected provider.
///
/// POST /generate-image
pub async fn generate_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ImageResponse>, AppError> {
    // An unparseable body is treated the same as a missing field.
    let request: ImageRequest = serde_json::from_slice(&body).unwrap_or_default();

    let prompt = match request.prompt {
        Some(prompt) if !prompt.is_empty() => prompt,
        _ => return Err(AppError::BadRequest("Prompt required".to_string())),
    };

    let model = ImageModelId::from_id(request.model.as_deref().unwrap_or("stability"))?;

    let image_url = state
        .providers
        .image(model)
        .generate(&prompt)
        .await
        .map_err(|e| {
            tracing::error!(model = model.as_str(), error = %e, "Image provider call failed");
            AppError::from(e)
        })?;

    Ok(Json(ImageResponse {
        success: true,
        image_url,
        prompt,
    }))
}
