//! High-level generation service facade.
//!
//! [`AiService`] is the single point the rest of the application depends
//! on: it resolves providers through the injected registry, logs the
//! selected provider for observability, and propagates failures unchanged.
//! No retry, no suppression, and callers never touch the registry or a
//! provider directly.

use crate::error::AiResult;
use crate::logging::{log_error, log_info};
use crate::registry::ProviderRegistry;
use crate::types::{
    GenerationOptions, Message, ProviderDescriptor, ResolutionRequest, ResolutionResponse,
};
use std::sync::Arc;

/// High-level interface for AI-powered operations.
#[derive(Clone)]
pub struct AiService {
    registry: Arc<ProviderRegistry>,
}

impl AiService {
    /// Create the service over an explicitly constructed registry.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Generate a structured incident resolution.
    ///
    /// Resolves the override provider when given, else the active one, and
    /// propagates any provider failure unchanged.
    pub async fn generate_resolution(
        &self,
        request: &ResolutionRequest,
        options: &GenerationOptions,
        provider: Option<&str>,
    ) -> AiResult<ResolutionResponse> {
        let provider = self.registry.resolve(provider)?;

        log_info!(
            provider = provider.name(),
            incident_title = %request.incident_title,
            "Generating incident resolution"
        );

        provider
            .generate_resolution(request, options)
            .await
            .map_err(|e| {
                log_error!(
                    provider = provider.name(),
                    error = %e,
                    "Resolution generation failed"
                );
                e
            })
    }

    /// Generate plain text from a single prompt.
    pub async fn generate_text(
        &self,
        prompt: &str,
        options: &GenerationOptions,
        provider: Option<&str>,
    ) -> AiResult<String> {
        let provider = self.registry.resolve(provider)?;

        log_info!(provider = provider.name(), "Generating text");

        let response = provider.generate_text(prompt, options).await?;
        Ok(response.content)
    }

    /// Generate a response for a full conversation.
    pub async fn generate_with_context(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
        provider: Option<&str>,
    ) -> AiResult<String> {
        let provider = self.registry.resolve(provider)?;

        log_info!(
            provider = provider.name(),
            message_count = messages.len(),
            "Generating with conversation context"
        );

        let response = provider.generate_with_context(messages, options).await?;
        Ok(response.content)
    }

    /// Whether at least one registered provider is configured.
    ///
    /// Upstream callers use this to short-circuit with a "service
    /// unavailable" response before attempting generation.
    pub fn is_configured(&self) -> bool {
        self.registry
            .list_available()
            .iter()
            .any(|descriptor| descriptor.configured)
    }

    /// Descriptor of the currently active provider.
    pub fn active_provider_info(&self) -> AiResult<ProviderDescriptor> {
        let provider = self.registry.resolve(None)?;
        Ok(provider.descriptor())
    }

    /// Descriptors for all registered providers, in registration order.
    pub fn list_providers(&self) -> Vec<ProviderDescriptor> {
        self.registry.list_available()
    }

    /// Switch the active provider.
    pub fn set_active_provider(&self, name: &str) -> AiResult<()> {
        self.registry.set_active(name)
    }
}
