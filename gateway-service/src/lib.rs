//! LumiChat gateway: uniform HTTP front for third-party generative-AI providers.
pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;

pub use startup::AppState;
