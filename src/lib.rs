//! # incident-ai
//!
//! Multi-provider AI resolution engine for incident management, with support
//! for OpenAI, Anthropic, and local Ollama backends.
//!
//! ## Key Features
//!
//! - **Multiple Providers**: Seamless switching between generation backends
//! - **Provider Registry**: Auto-detection of configured providers with an
//!   explicit, injectable registry (no globals)
//! - **Structured Resolutions**: Free-form model output normalized into
//!   validated, confidence-scored resolution records
//! - **Uniform Errors**: One error surface distinguishing configuration,
//!   caller, backend, and model-quality failures
//!
//! ## Example
//!
//! ```rust,no_run
//! use incident_ai::{
//!     AiConfig, AiService, GenerationOptions, ProviderRegistry, ResolutionRequest,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> incident_ai::AiResult<()> {
//! let registry = Arc::new(ProviderRegistry::new(&AiConfig::from_env()));
//! let service = AiService::new(registry);
//!
//! let request = ResolutionRequest {
//!     incident_title: "Checkout latency spike".to_string(),
//!     incident_description: "p99 latency tripled after the 14:00 deploy".to_string(),
//!     artifact_texts: vec!["connection pool exhausted".to_string()],
//!     previous_resolutions: None,
//!     context: None,
//! };
//!
//! let resolution = service
//!     .generate_resolution(&request, &GenerationOptions::default(), None)
//!     .await?;
//! println!("{}: {}", resolution.solution_title, resolution.confidence_score);
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod config;
pub mod error;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod providers;
pub mod registry;
pub(crate) mod resolution;
pub mod service;
pub mod types;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use config::{AiConfig, AnthropicSettings, OllamaSettings, OpenAiSettings};
pub use error::{AiError, AiResult, ErrorCategory, ErrorSeverity};
pub use providers::{AiProvider, AnthropicProvider, OllamaProvider, OpenAiProvider};
pub use registry::ProviderRegistry;
pub use service::AiService;
pub use types::{
    GenerationOptions, GenerationResponse, Message, MessageRole, ProviderDescriptor,
    ResolutionRequest, ResolutionResponse, TokenUsage,
};
