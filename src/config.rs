//! Application-level constants and environment-driven configuration.

use crate::pipeline::ExtractError;

pub const APP_NAME: &str = "Taqdeer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "taqdeer=info"
}

/// Connection settings for the generative extraction service.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 300,
        }
    }

    /// Read configuration from the environment. `GEMINI_API_KEY` is
    /// required; `TAQDEER_GEMINI_URL` and `TAQDEER_MODEL` override the
    /// defaults.
    pub fn from_env() -> Result<Self, ExtractError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ExtractError::Config("GEMINI_API_KEY is not set".to_string()))?;
        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("TAQDEER_GEMINI_URL") {
            config.base_url = url;
        }
        if let Ok(model) = std::env::var("TAQDEER_MODEL") {
            config.model = model;
        }
        Ok(config)
    }
}

/// Remote sheet endpoint, if configured. Absence is not an error — the
/// sheet push degrades to a no-op with a notice.
pub fn sheet_endpoint_from_env() -> Option<String> {
    std::env::var("TAQDEER_SHEET_URL").ok().filter(|u| !u.is_empty())
}
