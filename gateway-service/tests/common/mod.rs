//! Test helper module for gateway integration tests.
//!
//! Builds the full router over mock provider backends so tests can
//! drive real HTTP semantics without touching the network.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use gateway_service::config::{GatewayConfig, ModelSettings, ProviderSettings};
use gateway_service::services::providers::mock::{MockChatBackend, MockImageBackend};
use gateway_service::services::providers::ProviderRegistry;
use gateway_service::startup::{build_router, AppState};
use std::sync::Arc;
use tower::util::ServiceExt;

/// Mock backends wired into a test router. Handles are kept so tests
/// can inspect recorded calls after driving the router.
pub struct TestBackends {
    pub openai: Arc<MockChatBackend>,
    pub gemini: Arc<MockChatBackend>,
    pub claude: Arc<MockChatBackend>,
    pub stability: Arc<MockImageBackend>,
    pub dalle: Arc<MockImageBackend>,
}

impl TestBackends {
    /// Every backend succeeds with a distinctive reply.
    pub fn all_succeeding() -> Self {
        Self {
            openai: Arc::new(MockChatBackend::replying("openai reply")),
            gemini: Arc::new(MockChatBackend::replying("gemini reply")),
            claude: Arc::new(MockChatBackend::replying("claude reply")),
            stability: Arc::new(MockImageBackend::replying(
                "data:image/png;base64,c3RhYg==",
            )),
            dalle: Arc::new(MockImageBackend::replying(
                "http://images.example/dalle.png",
            )),
        }
    }

    /// Build a router over the current set of mocks.
    pub fn router(&self) -> Router {
        let registry = ProviderRegistry::new(
            self.openai.clone(),
            self.gemini.clone(),
            self.claude.clone(),
            self.stability.clone(),
            self.dalle.clone(),
        );
        let state = AppState {
            config: test_config(),
            providers: Arc::new(registry),
        };
        build_router(state)
    }
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: service_core::config::Config { port: 0 },
        providers: ProviderSettings {
            openai_api_key: "test-openai-key".to_string(),
            gemini_api_key: "test-gemini-key".to_string(),
            claude_api_key: "test-claude-key".to_string(),
            stability_api_key: "test-stability-key".to_string(),
        },
        models: ModelSettings {
            openai_chat_model: "gpt-3.5-turbo".to_string(),
            gemini_chat_model: "gemini-pro".to_string(),
            claude_chat_model: "claude-3-sonnet-20240229".to_string(),
            dalle_image_model: "dall-e-3".to_string(),
        },
    }
}

/// Drive the router with one request and parse the JSON body (Null for
/// an empty body).
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(request)
        .await
        .expect("Failed to execute request");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body was not JSON")
    };

    (status, body)
}

pub async fn post_json(
    router: Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(router, request).await
}
