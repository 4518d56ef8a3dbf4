//! OpenAI provider implementation
//!
//! Adapts the uniform provider surface onto the OpenAI chat-completions
//! API with bearer-token auth.

use super::http::BackendClient;
use super::AiProvider;
use crate::config::OpenAiSettings;
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

pub(crate) const PROVIDER_NAME: &str = "openai";

/// OpenAI chat-completions request structure
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
    stream: bool,
}

/// Message in a chat-completions request
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

/// OpenAI chat-completions response structure
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

/// Choice in a chat-completions response
#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
    finish_reason: Option<String>,
}

/// Message in a chat-completions response choice
#[derive(Debug, Clone, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

/// Usage information in a chat-completions response
#[derive(Debug, Clone, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// OpenAI provider implementation
#[derive(Debug)]
pub struct OpenAiProvider {
    http_client: BackendClient,
    settings: OpenAiSettings,
}

impl OpenAiProvider {
    /// Create a new OpenAI provider instance.
    ///
    /// Construction always succeeds; a missing API key only surfaces when
    /// a generation method is called.
    pub fn new(settings: OpenAiSettings) -> Self {
        log_debug!(
            provider = PROVIDER_NAME,
            has_api_key = settings.api_key.is_some(),
            base_url = %settings.base_url,
            model = %settings.model,
            "OpenAI provider initialized"
        );

        Self {
            http_client: BackendClient::new(),
            settings,
        }
    }

    /// Return the API key, failing before any network I/O when absent.
    fn require_api_key(&self) -> AiResult<&str> {
        match self.settings.api_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(AiError::unconfigured_provider(PROVIDER_NAME)),
        }
    }

    /// Submit a chat-completions request and normalize the response.
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse> {
        let api_key = self.require_api_key()?;

        let request = ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages,
            temperature: options.temperature_or(0.7),
            max_tokens: options.max_tokens_or(2000),
            top_p: Some(options.top_p.unwrap_or(1.0)),
            frequency_penalty: Some(options.frequency_penalty.unwrap_or(0.0)),
            presence_penalty: Some(options.presence_penalty.unwrap_or(0.0)),
            stream: options.stream.unwrap_or(false),
        };

        log_debug!(
            provider = PROVIDER_NAME,
            model = %request.model,
            message_count = request.messages.len(),
            "Executing chat-completions request"
        );

        let url = format!("{}/v1/chat/completions", self.settings.base_url);
        let headers = BackendClient::bearer_auth_headers(api_key)?;
        let response: ChatCompletionResponse =
            self.http_client.post_json(&url, &headers, &request).await?;

        self.normalize_response(response)
    }

    fn normalize_response(&self, response: ChatCompletionResponse) -> AiResult<GenerationResponse> {
        let choice = response.choices.into_iter().next().ok_or_else(|| {
            log_error!(provider = PROVIDER_NAME, "Response contained no choices");
            AiError::backend_request("No choices in OpenAI response", None, None)
        })?;

        let tokens_used = response.usage.map(|u| TokenUsage {
            input: u.prompt_tokens,
            output: u.completion_tokens,
            total: u.total_tokens,
        });

        Ok(GenerationResponse {
            content: choice.message.content,
            stop_reason: choice.finish_reason,
            tokens_used,
            provider: PROVIDER_NAME.to_string(),
            model: self.settings.model.clone(),
        })
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    let role = match message.role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    };
    ChatMessage {
        role: role.to_string(),
        content: message.content.clone(),
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
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
        self.chat(
            vec![ChatMessage {
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
        // OpenAI accepts system messages inline in the turn list
        self.chat(messages.iter().map(to_chat_message).collect(), options)
            .await
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
