//! Mock provider implementations for testing.
//!
//! Each mock records the calls it receives so tests can assert that the
//! dispatcher selected the right backend and passed the right input.

use super::{ChatBackend, ChatTurn, ImageBackend, ProviderError};
use async_trait::async_trait;
use std::sync::Mutex;

/// Outcome a mock backend produces for every call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with this reply text / image URL.
    Reply(String),
    /// Fail as if the upstream returned a non-success HTTP status.
    ApiFailure(String),
    /// Fail as if the upstream success body was missing the expected field.
    UnexpectedShape(&'static str),
}

impl MockOutcome {
    fn resolve(&self) -> Result<String, ProviderError> {
        match self {
            MockOutcome::Reply(text) => Ok(text.clone()),
            MockOutcome::ApiFailure(message) => Err(ProviderError::ApiFailure(message.clone())),
            MockOutcome::UnexpectedShape(provider) => {
                Err(ProviderError::UnexpectedShape { provider: *provider })
            }
        }
    }
}

/// One recorded chat call: the message and the history it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedChatCall {
    pub message: String,
    pub history: Vec<ChatTurn>,
}

/// Mock chat backend for tests.
pub struct MockChatBackend {
    outcome: MockOutcome,
    calls: Mutex<Vec<RecordedChatCall>>,
}

impl MockChatBackend {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(reply: &str) -> Self {
        Self::new(MockOutcome::Reply(reply.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockOutcome::ApiFailure(message.to_string()))
    }

    pub fn calls(&self) -> Vec<RecordedChatCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatBackend for MockChatBackend {
    async fn complete(&self, message: &str, history: &[ChatTurn]) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(RecordedChatCall {
            message: message.to_string(),
            history: history.to_vec(),
        });
        self.outcome.resolve()
    }
}

/// Mock image backend for tests.
pub struct MockImageBackend {
    outcome: MockOutcome,
    calls: Mutex<Vec<String>>,
}

impl MockImageBackend {
    pub fn new(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(url: &str) -> Self {
        Self::new(MockOutcome::Reply(url.to_string()))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(MockOutcome::ApiFailure(message.to_string()))
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageBackend for MockImageBackend {
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.calls.lock().unwrap().push(prompt.to_string());
        self.outcome.resolve()
    }
}
