//! Core data types for the provider abstraction.
//!
//! These types form the caller-facing contract: conversation messages,
//! per-call generation options, normalized generation responses, and the
//! incident resolution request/response pair. Wire-level request/response
//! shapes live inside each provider module and never leak out of it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Role of a conversation message.
///
/// Order within a conversation is semantically significant; a system
/// message, when present, is hoisted into the backend-specific system slot
/// by providers that require the separation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// A single conversation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call generation options.
///
/// Every field is optional; each provider applies its own defaults for
/// unset fields (temperature 0.7, 2000 max output tokens, top_p 1,
/// penalties 0, no streaming).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Controls randomness, 0-2.
    pub temperature: Option<f64>,
    /// Max output tokens.
    pub max_tokens: Option<u32>,
    /// Nucleus sampling.
    pub top_p: Option<f64>,
    /// -2 to 2.
    pub frequency_penalty: Option<f64>,
    /// -2 to 2.
    pub presence_penalty: Option<f64>,
    /// Request a streamed response from the backend.
    pub stream: Option<bool>,
}

impl GenerationOptions {
    pub(crate) fn temperature_or(&self, default: f64) -> f64 {
        self.temperature.unwrap_or(default)
    }

    pub(crate) fn max_tokens_or(&self, default: u32) -> u32 {
        self.max_tokens.unwrap_or(default)
    }
}

/// Token accounting reported by a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input: u32,
    pub output: u32,
    pub total: u32,
}

/// Normalized response from one generation call.
///
/// Returned verbatim to the service facade; never mutated after
/// construction. `tokens_used` is absent for backends that do not report
/// usage (the local Ollama backend).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub content: String,
    pub stop_reason: Option<String>,
    pub tokens_used: Option<TokenUsage>,
    /// Name of the provider that produced this response.
    pub provider: String,
    /// Model identifier that produced this response.
    pub model: String,
}

/// Input for incident resolution generation.
///
/// Built by the caller from incident, artifact, and resolution-history
/// collaborators; the core performs no database access itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRequest {
    pub incident_title: String,
    pub incident_description: String,
    /// Extracted artifact text excerpts, in upload order. Each excerpt is
    /// truncated to a provider-specific character budget when composing
    /// the prompt.
    pub artifact_texts: Vec<String>,
    /// Descriptions of prior resolution attempts, oldest first.
    pub previous_resolutions: Option<Vec<String>>,
    /// Free-form additional context.
    pub context: Option<HashMap<String, serde_json::Value>>,
}

/// Structured, confidence-scored resolution derived from model output.
///
/// The sole externally meaningful artifact the core produces. The
/// confidence score is always clamped to [0, 1], even when the backend
/// returns an out-of-range or missing value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResponse {
    pub solution_title: String,
    pub solution_description: String,
    pub implementation_steps: Vec<String>,
    /// 0-1.
    pub confidence_score: f64,
    pub reasoning: String,
    pub related_errors: Vec<String>,
    pub prevention_steps: Vec<String>,
}

/// Descriptor for a registered provider.
///
/// `configured` is derived from the provider's credential/endpoint state at
/// the time of the call, not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    pub name: String,
    pub model: String,
    pub configured: bool,
}
