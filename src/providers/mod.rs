//! AI provider implementations
//!
//! This module contains implementations for the supported generation
//! backends:
//!
//! - **openai**: OpenAI provider using the chat-completions API
//! - **anthropic**: Anthropic Claude provider with native Messages API format
//! - **ollama**: Local Ollama provider using the generate API
//! - **http**: Shared HTTP client and auth-header helpers
//!
//! ## Architecture
//!
//! ```text
//! http.rs                 <- shared BackendClient (reqwest, error mapping)
//!    |          |          |
//! openai.rs  anthropic.rs  ollama.rs   <- one adapter per backend wire format
//! ```
//!
//! Each adapter owns its wire request/response structs; no other component
//! parses backend JSON directly.

use crate::error::AiResult;
use crate::types::{
    GenerationOptions, GenerationResponse, Message, ProviderDescriptor, ResolutionRequest,
    ResolutionResponse,
};
use async_trait::async_trait;

pub mod anthropic;
pub(crate) mod http;
pub mod ollama;
pub mod openai;

// Re-export the provider structs
pub use anthropic::AnthropicProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

/// Uniform capability surface for one generation backend.
///
/// Implementations are constructed once at process start from their
/// settings struct and live for the process lifetime. Construction never
/// fails; a missing credential only surfaces as
/// [`AiError::UnconfiguredProvider`](crate::AiError::UnconfiguredProvider)
/// when a generation method is called.
#[async_trait]
pub trait AiProvider: Send + Sync + std::fmt::Debug {
    /// Stable provider identifier used for registry lookup.
    fn name(&self) -> &str;

    /// Model identifier this provider submits to its backend.
    fn model(&self) -> &str;

    /// Whether the required credential or endpoint is present.
    /// Side-effect free, callable any time.
    fn is_configured(&self) -> bool;

    /// Issue one backend call with a single user-role message.
    async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse>;

    /// Submit a full ordered conversation.
    ///
    /// Backends requiring a distinct system slot hoist the first
    /// system-role message out of the turn list; backends without native
    /// multi-turn chat linearize the conversation into a single prompt.
    async fn generate_with_context(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> AiResult<GenerationResponse>;

    /// Generate a structured incident resolution.
    ///
    /// Temperature is fixed at 0.5 and max output tokens at 2000 for this
    /// operation regardless of caller-supplied options. The model output is
    /// parsed into a [`ResolutionResponse`]; unparseable output fails with
    /// [`AiError::MalformedOutput`](crate::AiError::MalformedOutput).
    async fn generate_resolution(
        &self,
        request: &ResolutionRequest,
        options: &GenerationOptions,
    ) -> AiResult<ResolutionResponse>;

    /// Descriptor reflecting the provider's current configuration state.
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: self.name().to_string(),
            model: self.model().to_string(),
            configured: self.is_configured(),
        }
    }
}
