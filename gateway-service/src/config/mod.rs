use service_core::config as core_config;
use service_core::config::get_env;
use service_core::error::AppError;

/// Gateway configuration.
///
/// Provider credentials and model names are read once at startup and
/// injected into the adapters; nothing reads the environment mid-call.
/// A missing credential in dev defaults to an empty string and surfaces
/// later as an authentication failure from the provider itself.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub common: core_config::Config,
    pub providers: ProviderSettings,
    pub models: ModelSettings,
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub openai_api_key: String,
    pub gemini_api_key: String,
    pub claude_api_key: String,
    pub stability_api_key: String,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    /// OpenAI chat completions model (e.g. gpt-3.5-turbo).
    pub openai_chat_model: String,
    /// Gemini generateContent model (e.g. gemini-pro).
    pub gemini_chat_model: String,
    /// Anthropic messages model (e.g. claude-3-sonnet-20240229).
    pub claude_chat_model: String,
    /// OpenAI image generations model (e.g. dall-e-3).
    pub dalle_image_model: String,
}

impl GatewayConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = core_config::is_prod();

        Ok(GatewayConfig {
            common,
            providers: ProviderSettings {
                openai_api_key: get_env("OPENAI_API_KEY", Some(""), is_prod)?,
                gemini_api_key: get_env("GEMINI_API_KEY", Some(""), is_prod)?,
                claude_api_key: get_env("CLAUDE_API_KEY", Some(""), is_prod)?,
                stability_api_key: get_env("STABILITY_API_KEY", Some(""), is_prod)?,
            },
            models: ModelSettings {
                openai_chat_model: get_env("OPENAI_CHAT_MODEL", Some("gpt-3.5-turbo"), is_prod)?,
                gemini_chat_model: get_env("GEMINI_CHAT_MODEL", Some("gemini-pro"), is_prod)?,
                claude_chat_model: get_env(
                    "CLAUDE_CHAT_MODEL",
                    Some("claude-3-sonnet-20240229"),
                    is_prod,
                )?,
                dalle_image_model: get_env("DALLE_IMAGE_MODEL", Some("dall-e-3"), is_prod)?,
            },
        })
    }
}
