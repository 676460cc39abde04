//! HTTP handlers for the gateway endpoints.

pub mod chat;
pub mod image;

use axum::http::StatusCode;
use service_core::error::AppError;

/// OPTIONS short-circuit: always 200 with an empty body. The CORS layer
/// attaches the allow-* headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Catch-all for unsupported methods on gateway routes.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
