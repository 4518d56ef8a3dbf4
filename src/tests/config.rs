//! Tests for AI configuration loading
//!
//! Environment-variable tests are serialized because the process
//! environment is shared across the test harness threads.

use crate::config::AiConfig;
use serial_test::serial;

const AI_ENV_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENAI_MODEL",
    "ANTHROPIC_API_KEY",
    "ANTHROPIC_MODEL",
    "OLLAMA_BASE_URL",
    "OLLAMA_MODEL",
    "AI_PROVIDER",
];

fn clear_ai_env() {
    for var in AI_ENV_VARS {
        std::env::remove_var(var);
    }
}

#[test]
fn defaults_match_known_backends() {
    let config = AiConfig::default();

    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.base_url, "https://api.openai.com");
    assert_eq!(config.openai.model, "gpt-4-turbo");

    assert!(config.anthropic.api_key.is_none());
    assert_eq!(config.anthropic.base_url, "https://api.anthropic.com");
    assert_eq!(config.anthropic.model, "claude-3-opus-20240229");

    assert_eq!(config.ollama.base_url, "http://localhost:11434");
    assert_eq!(config.ollama.model, "mistral");

    assert!(config.default_provider.is_none());
}

#[test]
#[serial]
fn from_env_reads_provider_settings() {
    clear_ai_env();
    std::env::set_var("OPENAI_API_KEY", "sk-test");
    std::env::set_var("OPENAI_MODEL", "gpt-4o");
    std::env::set_var("OLLAMA_BASE_URL", "http://ollama.internal:11434");
    std::env::set_var("AI_PROVIDER", "openai");

    let config = AiConfig::from_env();

    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    assert_eq!(config.openai.model, "gpt-4o");
    assert_eq!(config.ollama.base_url, "http://ollama.internal:11434");
    assert_eq!(config.default_provider.as_deref(), Some("openai"));

    clear_ai_env();
}

#[test]
#[serial]
fn from_env_treats_empty_values_as_unset() {
    clear_ai_env();
    std::env::set_var("ANTHROPIC_API_KEY", "");
    std::env::set_var("AI_PROVIDER", "");

    let config = AiConfig::from_env();

    assert!(config.anthropic.api_key.is_none());
    assert!(config.default_provider.is_none());

    clear_ai_env();
}

#[test]
#[serial]
fn from_env_falls_back_to_defaults() {
    clear_ai_env();

    let config = AiConfig::from_env();

    assert_eq!(config.openai.model, "gpt-4-turbo");
    assert_eq!(config.anthropic.model, "claude-3-opus-20240229");
    assert_eq!(config.ollama.model, "mistral");
}
