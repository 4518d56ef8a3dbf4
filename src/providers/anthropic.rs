//! Anthropic provider implementation
//!
//! Adapts the uniform provider surface onto the Anthropic Messages API.
//! Unlike the OpenAI-compatible backends, Anthropic requires the system
//! instruction in a dedicated top-level `system` field and `max_tokens` on
//! every request.

use super::http::BackendClient;
use super::AiProvider;
use crate::config::AnthropicSettings;
use crate::error::{AiError, AiResult};
use crate::logging::{log_debug, log_error};
use crate::resolution::{
    self, HOSTED_DEFAULT_CONFIDENCE, HOSTED_EXCERPT_BUDGET, RESOLUTION_MAX_TOKENS,
    RESOLUTION_SYSTEM_PROMPT, RESOLUTION_TEMPERATURE,
};
use crate::types::{
    GenerationOptions, GenerationResponse, Message, MessageRole, ResolutionRequest,
    ResolutionResponse, TokenUsage,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub(crate) const PROVIDER_NAME: &str = "anthropic";

/// Anthropic Messages API request structure
#[derive(Debug, Clone, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<TurnMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    temperature: f64,
}

/// Conversation turn in a Messages API request
#[derive(Debug, Clone, Serialize)]
struct TurnMessage {
    role: String,
    content: String,
}

/// Anthropic Messages API response structure
#[derive(Debug, Clone, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<MessagesUsage>,
}

/// Text content block in a Messages API response
#[derive(Debug, Clone, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Usage information in a Messages API response
#[derive(Debug, Clone, Deserialize)]
struct MessagesUsage {
    input_tokens: u32,
    output_tokens: u32,
}

/// Anthropic Claude provider implementation
#[derive(Debug)]
pub struct AnthropicProvider {
    http_client: BackendClient,
    settings: AnthropicSettings,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider instance.
    ///
    /// Construction always succeeds; a missing API key only surfaces when
    /// a generation method is called.
    pub fn new(settings: AnthropicSettings) -> Self {
        log_debug!(
            provider = PROVIDER_NAME,
            has_api_key = settings.api_key.is_some(),
            base_url = %settings.base_url,
            model = %settings.model,
            "Anthropic provider initialized"
        );

        Self {
            http_client: BackendClient::new(),
            settings,
        }
    }

    fn require_api_key(&self) -> AiResult<&str> {
        match self.settings.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AiError::unconfigured_provider(PROVIDER_NAME)),
        }
    }

    /// Submit a Messages API request and normalize the response.
    async fn send_messages(
        &self,
        system: Option<String>,
        messages: Vec<TurnMessage>,
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        let api_key = self.require_api_key()?;

        let request = MessagesRequest {
            model: self.settings.model.clone(),
            max_tokens: options.max_tokens_or(2000),
            messages,
            system,
            temperature: options.temperature_or(0.7),
        };

        log_debug!(
            provider = PROVIDER_NAME,
            model = %request.model,
            message_count = request.messages.len(),
            has_system = request.system.is_some(),
            "Executing Messages API request"
        );

        let url = format!("{}/v1/messages", self.settings.base_url);
        let headers = BackendClient::api_key_auth_headers(api_key)?;
        let response: MessagesResponse =
            self.http_client.post_json(&url, &headers, &request).await?;

        self.normalize_response(response)
    }

    fn normalize_response(&self, response: MessagesResponse) -> AiResult<GenerationResponse> {
        let content = response
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| {
                log_error!(
                    provider = PROVIDER_NAME,
                    "Response contained no content blocks"
                );
                AiError::backend_request("No content in Anthropic response", None, None)
            })?;

        // Anthropic reports input and output separately; total is derived
        let tokens_used = response.usage.map(|u| TokenUsage {
            input: u.input_tokens,
            output: u.output_tokens,
            total: u.input_tokens + u.output_tokens,
        });

        Ok(GenerationResponse {
            content,
            stop_reason: response.stop_reason,
            tokens_used,
            provider: PROVIDER_NAME.to_string(),
            model: self.settings.model.clone(),
        })
    }
}

/// Hoist the first system message into the dedicated system slot and keep
/// the remaining user/assistant turns in order.
fn split_system(messages: &[Message]) -> (Option<String>, Vec<TurnMessage>) {
    let system = messages
        .iter()
        .find(|m| m.role == MessageRole::System)
        .map(|m| m.content.clone());

    let turns = messages
        .iter()
        .filter(|m| m.role != MessageRole::System)
        .map(|m| TurnMessage {
            role: match m.role {
                MessageRole::User => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
                MessageRole::System => unreachable!("system turns filtered above"),
            },
            content: m.content.clone(),
        })
        .collect();

    (system, turns)
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn is_configured(&self) -> bool {
        self.settings
            .api_key
            .as_deref()
            .is_some_and(|key| !key.is_empty())
    }

    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        self.send_messages(
            None,
            vec![TurnMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            options,
        )
        .await
    }

    async fn generate_with_context(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        let (system, turns) = split_system(messages);
        self.send_messages(system, turns, options).await
    }

    async fn generate_resolution(
        &self,
        request: &ResolutionRequest,
        options: &GenerationOptions,
    ) -> AiResult<ResolutionResponse> {
        let messages = vec![
            Message::system(RESOLUTION_SYSTEM_PROMPT),
            Message::user(resolution::build_incident_prompt(
                request,
                HOSTED_EXCERPT_BUDGET,
            )),
        ];

        // Resolution generation overrides temperature and max tokens
        let resolution_options = GenerationOptions {
            temperature: Some(RESOLUTION_TEMPERATURE),
            max_tokens: Some(RESOLUTION_MAX_TOKENS),
            ..options.clone()
        };

        let response = self
            .generate_with_context(&messages, &resolution_options)
            .await?;

        resolution::parse_resolution(&response.content, HOSTED_DEFAULT_CONFIDENCE)
    }
}
