//! Helper functions for tests
//!
//! Common test utilities and data builders: wiremock-backed provider
//! settings, a canned-response stub provider for registry/service tests,
//! and resolution request fixtures.

use crate::config::{AiConfig, AnthropicSettings, OllamaSettings, OpenAiSettings};
use crate::error::AiResult;
use crate::providers::AiProvider;
use crate::resolution;
use crate::types::{
    GenerationOptions, GenerationResponse, Message, ResolutionRequest, ResolutionResponse,
};
use async_trait::async_trait;
use wiremock::MockServer;

/// OpenAI settings pointed at a mock server.
pub fn openai_settings(mock_server: &MockServer) -> OpenAiSettings {
    OpenAiSettings {
        api_key: Some("test-key".to_string()),
        base_url: mock_server.uri(),
        ..OpenAiSettings::default()
    }
}

/// Anthropic settings pointed at a mock server.
pub fn anthropic_settings(mock_server: &MockServer) -> AnthropicSettings {
    AnthropicSettings {
        api_key: Some("test-key".to_string()),
        base_url: mock_server.uri(),
        ..AnthropicSettings::default()
    }
}

/// Ollama settings pointed at a mock server.
pub fn ollama_settings(mock_server: &MockServer) -> OllamaSettings {
    OllamaSettings {
        base_url: mock_server.uri(),
        ..OllamaSettings::default()
    }
}

/// Config where no provider is configured (hosted keys absent, Ollama base
/// URL empty).
pub fn unconfigured_config() -> AiConfig {
    AiConfig {
        ollama: OllamaSettings {
            base_url: String::new(),
            ..OllamaSettings::default()
        },
        ..AiConfig::default()
    }
}

/// A sample resolution request with two artifact excerpts.
pub fn sample_resolution_request() -> ResolutionRequest {
    ResolutionRequest {
        incident_title: "Pod crash loop".to_string(),
        incident_description: "payments pod restarts every 30s".to_string(),
        artifact_texts: vec![
            "OOMKilled: container exceeded memory limit".to_string(),
            "liveness probe failed: connection refused".to_string(),
        ],
        previous_resolutions: None,
        context: None,
    }
}

/// Provider returning canned content without any network I/O.
#[derive(Debug)]
pub struct StubProvider {
    pub name: String,
    pub model: String,
    pub configured: bool,
    pub content: String,
}

impl StubProvider {
    pub fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            model: "stub-model".to_string(),
            configured: true,
            content: content.to_string(),
        }
    }
}

#[async_trait]
impl AiProvider for StubProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate_text(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        Ok(GenerationResponse {
            content: self.content.clone(),
            stop_reason: Some("stop".to_string()),
            tokens_used: None,
            provider: self.name.clone(),
            model: self.model.clone(),
        })
    }

    async fn generate_with_context(
        &self,
        _messages: &[Message],
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        self.generate_text("", options).await
    }

    async fn generate_resolution(
        &self,
        _request: &ResolutionRequest,
        _options: &GenerationOptions,
    ) -> AiResult<ResolutionResponse> {
        resolution::parse_resolution(&self.content, 0.8)
    }
}
