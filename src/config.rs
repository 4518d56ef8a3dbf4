//! Provider configuration.
//!
//! Settings structs for each backend plus [`AiConfig::from_env`], the only
//! place in the crate that reads environment variables. Providers treat
//! their settings as read-only after construction; changing configuration
//! requires reconstructing the affected provider instance.

use crate::logging::log_debug;
use serde::{Deserialize, Serialize};

/// OpenAI-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiSettings {
    /// API key; `None` or empty means the provider is unconfigured.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4-turbo".to_string(),
        }
    }
}

/// Anthropic-specific settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnthropicSettings {
    /// API key; `None` or empty means the provider is unconfigured.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl Default for AnthropicSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-opus-20240229".to_string(),
        }
    }
}

/// Ollama-specific settings.
///
/// Ollama requires no credential; only a reachable base URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for OllamaSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "mistral".to_string(),
        }
    }
}

/// System-wide AI configuration covering all known providers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiConfig {
    pub openai: OpenAiSettings,
    pub anthropic: AnthropicSettings,
    pub ollama: OllamaSettings,
    /// Explicit default provider name; when absent the registry
    /// auto-detects the first configured provider.
    pub default_provider: Option<String>,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `OPENAI_API_KEY`, `OPENAI_MODEL`,
    /// `ANTHROPIC_API_KEY`, `ANTHROPIC_MODEL`, `OLLAMA_BASE_URL`,
    /// `OLLAMA_MODEL`, and `AI_PROVIDER` for the default provider name.
    /// Unset or empty variables fall back to struct defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(key) = env_nonempty("OPENAI_API_KEY") {
            config.openai.api_key = Some(key);
        }
        if let Some(model) = env_nonempty("OPENAI_MODEL") {
            config.openai.model = model;
        }

        if let Some(key) = env_nonempty("ANTHROPIC_API_KEY") {
            config.anthropic.api_key = Some(key);
        }
        if let Some(model) = env_nonempty("ANTHROPIC_MODEL") {
            config.anthropic.model = model;
        }

        if let Some(base_url) = env_nonempty("OLLAMA_BASE_URL") {
            config.ollama.base_url = base_url;
        }
        if let Some(model) = env_nonempty("OLLAMA_MODEL") {
            config.ollama.model = model;
        }

        config.default_provider = env_nonempty("AI_PROVIDER");

        log_debug!(
            has_openai_key = config.openai.api_key.is_some(),
            has_anthropic_key = config.anthropic.api_key.is_some(),
            ollama_base_url = %config.ollama.base_url,
            default_provider = config.default_provider.as_deref(),
            "AI configuration loaded from environment"
        );

        config
    }
}

/// Read an environment variable, treating empty values as unset.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
