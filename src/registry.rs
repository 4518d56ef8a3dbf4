//! Provider registry and selection.
//!
//! Holds every known provider instance, tracks which one is active, and
//! resolves providers by explicit name or falls back to the active one.
//! The registry is explicitly constructed and injected into the service
//! facade - there is no module-level global, so tests can build isolated
//! registries.

use crate::config::AiConfig;
use crate::error::{AiError, AiResult};
use crate::logging::{log_info, log_warn};
use crate::providers::{ollama, AiProvider, AnthropicProvider, OllamaProvider, OpenAiProvider};
use crate::types::ProviderDescriptor;
use std::sync::{Arc, PoisonError, RwLock};

/// Registry of provider instances with one mutable "active" name.
///
/// Providers are registered in a fixed priority order (OpenAI, Anthropic,
/// Ollama, then any custom registrations). All state is guarded by
/// `RwLock`s; generation calls never mutate it, only
/// [`set_active`](Self::set_active) and [`register`](Self::register) do.
/// Concurrent
/// generation calls that resolve the provider around a concurrent
/// `set_active` may legitimately use different providers.
pub struct ProviderRegistry {
    /// Insertion-ordered name -> provider entries. Linear scan is fine for
    /// the handful of registered backends.
    providers: RwLock<Vec<(String, Arc<dyn AiProvider>)>>,
    active: RwLock<String>,
}

impl ProviderRegistry {
    /// Construct the registry with every known provider variant.
    ///
    /// The active provider is the configured `default_provider` when one is
    /// set; otherwise the first configured variant in registration order;
    /// otherwise Ollama, which needs no credential and is assumed reachable
    /// in a development setting (this does not imply it is configured).
    pub fn new(config: &AiConfig) -> Self {
        let providers: Vec<(String, Arc<dyn AiProvider>)> = vec![
            entry(OpenAiProvider::new(config.openai.clone())),
            entry(AnthropicProvider::new(config.anthropic.clone())),
            entry(OllamaProvider::new(config.ollama.clone())),
        ];

        let active = config
            .default_provider
            .clone()
            .unwrap_or_else(|| detect_configured_provider(&providers));

        Self {
            providers: RwLock::new(providers),
            active: RwLock::new(active),
        }
    }

    /// Construct a registry from process environment configuration.
    pub fn from_env() -> Self {
        Self::new(&AiConfig::from_env())
    }

    /// Resolve a provider by explicit name, or the active provider when no
    /// name is given.
    ///
    /// Does not verify configuration - resolving an unconfigured provider
    /// is legal and only fails on the first generation call. A warning is
    /// logged so the misconfiguration is visible.
    pub fn resolve(&self, name: Option<&str>) -> AiResult<Arc<dyn AiProvider>> {
        let requested = match name {
            Some(name) => name.to_string(),
            None => self.active_name(),
        };

        let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
        let provider = providers
            .iter()
            .find(|(entry_name, _)| *entry_name == requested)
            .map(|(_, provider)| Arc::clone(provider))
            .ok_or_else(|| AiError::unknown_provider(&requested))?;

        if !provider.is_configured() {
            log_warn!(
                provider = %requested,
                "Resolved provider is not properly configured"
            );
        }

        Ok(provider)
    }

    /// Name of the currently active provider.
    pub fn active_name(&self) -> String {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the active provider name.
    ///
    /// Fails with [`AiError::UnknownProvider`] for unregistered names,
    /// leaving the active name unchanged. Switching to an unconfigured
    /// provider is legal and only surfaces on the next generation call.
    pub fn set_active(&self, name: &str) -> AiResult<()> {
        {
            let providers = self.providers.read().unwrap_or_else(PoisonError::into_inner);
            if !providers.iter().any(|(entry_name, _)| entry_name == name) {
                return Err(AiError::unknown_provider(name));
            }
        }

        *self.active.write().unwrap_or_else(PoisonError::into_inner) = name.to_string();
        log_info!(provider = %name, "Active AI provider set");
        Ok(())
    }

    /// Descriptors for every registered provider, in registration order.
    pub fn list_available(&self) -> Vec<ProviderDescriptor> {
        self.providers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, provider)| provider.descriptor())
            .collect()
    }

    /// Add or replace a provider entry.
    ///
    /// Used for extensibility (custom or test providers). A collision
    /// overwrites the existing entry in place, keeping its registration
    /// order; new names are appended.
    pub fn register(&self, name: impl Into<String>, provider: Arc<dyn AiProvider>) {
        let name = name.into();
        let mut providers = self.providers.write().unwrap_or_else(PoisonError::into_inner);

        if let Some(slot) = providers
            .iter_mut()
            .find(|(entry_name, _)| *entry_name == name)
        {
            slot.1 = provider;
        } else {
            providers.push((name.clone(), provider));
        }

        log_info!(provider = %name, "Custom provider registered");
    }
}

fn entry(provider: impl AiProvider + 'static) -> (String, Arc<dyn AiProvider>) {
    (provider.name().to_string(), Arc::new(provider))
}

/// Scan registered variants in priority order for the first configured one.
fn detect_configured_provider(providers: &[(String, Arc<dyn AiProvider>)]) -> String {
    for (name, provider) in providers {
        if provider.is_configured() {
            log_info!(provider = %name, "Auto-detected configured provider");
            return name.clone();
        }
    }

    log_warn!("No configured AI provider detected, defaulting to Ollama");
    ollama::PROVIDER_NAME.to_string()
}
