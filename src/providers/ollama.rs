//! Ollama local provider implementation
//!
//! Adapts the uniform provider surface onto the unauthenticated Ollama
//! generate API. Ollama has no native multi-turn chat endpoint here, so
//! conversations are linearized into a single prompt, and no token usage is
//! reported.

use super::http::BackendClient;
use super::AiProvider;
use crate::config::OllamaSettings;
use crate::error::{AiError, AiResult};
use crate::logging::log_debug;
use crate::resolution::{self, LOCAL_DEFAULT_CONFIDENCE, RESOLUTION_TEMPERATURE};
use crate::types::{
    GenerationOptions, GenerationResponse, Message, MessageRole, ResolutionRequest,
    ResolutionResponse,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER_NAME: &str = "ollama";

/// Ollama generate API request structure
#[derive(Debug, Clone, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    temperature: f64,
    stream: bool,
}

/// Ollama generate API response structure
#[derive(Debug, Clone, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Ollama local provider implementation
#[derive(Debug)]
pub struct OllamaProvider {
    http_client: BackendClient,
    settings: OllamaSettings,
}

impl OllamaProvider {
    /// Create a new Ollama provider instance.
    ///
    /// Ollama requires no credential; `is_configured` only checks that a
    /// base URL is present.
    pub fn new(settings: OllamaSettings) -> Self {
        log_debug!(
            provider = PROVIDER_NAME,
            base_url = %settings.base_url,
            model = %settings.model,
            "Ollama provider initialized"
        );

        Self {
            http_client: BackendClient::new(),
            settings,
        }
    }

    fn require_base_url(&self) -> AiResult<&str> {
        if self.settings.base_url.is_empty() {
            return Err(AiError::unconfigured_provider(PROVIDER_NAME));
        }
        Ok(&self.settings.base_url)
    }
}

/// Linearize a conversation into a single prompt.
///
/// User and assistant turns get "User: "/"Assistant: " prefixes; system
/// content is kept at its position without a role label so instructions
/// survive the flattening.
fn linearize_conversation(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| {
            let prefix = match m.role {
                MessageRole::User => "User: ",
                MessageRole::Assistant => "Assistant: ",
                MessageRole::System => "",
            };
            format!("{}{}", prefix, m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl AiProvider for OllamaProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn is_configured(&self) -> bool {
        !self.settings.base_url.is_empty()
    }

    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        let base_url = self.require_base_url()?;

        let request = GenerateRequest {
            model: self.settings.model.clone(),
            prompt: prompt.to_string(),
            temperature: options.temperature_or(0.7),
            stream: false,
        };

        log_debug!(
            provider = PROVIDER_NAME,
            model = %request.model,
            prompt_length = request.prompt.len(),
            "Executing generate request"
        );

        let url = format!("{base_url}/api/generate");
        let headers = BackendClient::plain_headers();
        let response: GenerateResponse =
            self.http_client.post_json(&url, &headers, &request).await?;

        Ok(GenerationResponse {
            content: response.response,
            stop_reason: Some("stop".to_string()),
            // Ollama does not report token accounting
            tokens_used: None,
            provider: PROVIDER_NAME.to_string(),
            model: self.settings.model.clone(),
        })
    }

    async fn generate_with_context(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        let prompt = linearize_conversation(messages);
        self.generate_text(&prompt, options).await
    }

    async fn generate_resolution(
        &self,
        request: &ResolutionRequest,
        options: &GenerationOptions,
    ) -> AiResult<ResolutionResponse> {
        let prompt = resolution::build_local_incident_prompt(request);

        // Resolution generation overrides the temperature
        let resolution_options = GenerationOptions {
            temperature: Some(RESOLUTION_TEMPERATURE),
            ..options.clone()
        };

        let response = self.generate_text(&prompt, &resolution_options).await?;

        resolution::parse_resolution(&response.content, LOCAL_DEFAULT_CONFIDENCE)
    }
}
