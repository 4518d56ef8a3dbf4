//! Tests for the provider registry
//!
//! Covers name resolution, active-provider selection and round-trips,
//! auto-detection order, and custom provider registration.

use super::helpers::{unconfigured_config, StubProvider};
use crate::config::AiConfig;
use crate::error::AiError;
use crate::registry::ProviderRegistry;
use std::sync::Arc;

fn registry_with_anthropic_key() -> ProviderRegistry {
    let mut config = unconfigured_config();
    config.anthropic.api_key = Some("test-key".to_string());
    ProviderRegistry::new(&config)
}

#[test]
fn resolve_by_name_returns_matching_provider() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    for name in ["openai", "anthropic", "ollama"] {
        assert_eq!(registry.resolve(Some(name)).unwrap().name(), name);
    }
}

#[test]
fn resolve_without_name_uses_active_provider() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    let active = registry.active_name();
    assert_eq!(registry.resolve(None).unwrap().name(), active);
}

#[test]
fn resolve_unknown_name_fails() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    let err = registry.resolve(Some("not-a-real-provider")).unwrap_err();
    assert!(matches!(err, AiError::UnknownProvider { .. }));
}

#[test]
fn resolve_unconfigured_provider_succeeds() {
    // Configuration is checked on the generation call, not at resolution
    let registry = ProviderRegistry::new(&unconfigured_config());
    let provider = registry.resolve(Some("openai")).unwrap();
    assert!(!provider.is_configured());
}

#[test]
fn explicit_default_provider_wins() {
    let mut config = AiConfig::default();
    config.openai.api_key = Some("test-key".to_string());
    config.default_provider = Some("anthropic".to_string());

    let registry = ProviderRegistry::new(&config);
    assert_eq!(registry.active_name(), "anthropic");
}

#[test]
fn auto_detect_picks_first_configured_in_registration_order() {
    let registry = registry_with_anthropic_key();
    assert_eq!(registry.active_name(), "anthropic");

    let mut config = unconfigured_config();
    config.openai.api_key = Some("test-key".to_string());
    config.anthropic.api_key = Some("test-key".to_string());
    let registry = ProviderRegistry::new(&config);
    assert_eq!(registry.active_name(), "openai");
}

#[test]
fn auto_detect_falls_back_to_ollama_when_nothing_configured() {
    let registry = ProviderRegistry::new(&unconfigured_config());
    assert_eq!(registry.active_name(), "ollama");
    // The fallback does not imply the provider is configured
    assert!(!registry.resolve(None).unwrap().is_configured());
}

#[test]
fn set_active_round_trips_for_every_registered_name() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    for name in ["openai", "anthropic", "ollama"] {
        registry.set_active(name).unwrap();
        assert_eq!(registry.active_name(), name);
        assert_eq!(registry.resolve(None).unwrap().name(), name);
    }
}

#[test]
fn set_active_unknown_name_fails_and_leaves_active_unchanged() {
    let registry = registry_with_anthropic_key();
    let before = registry.active_name();

    let err = registry.set_active("not-a-real-provider").unwrap_err();
    assert!(matches!(err, AiError::UnknownProvider { .. }));
    assert_eq!(registry.active_name(), before);
}

#[test]
fn set_active_to_unconfigured_provider_is_legal() {
    let registry = registry_with_anthropic_key();
    registry.set_active("openai").unwrap();
    assert_eq!(registry.active_name(), "openai");
}

#[test]
fn list_available_preserves_registration_order() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    registry.register("custom", Arc::new(StubProvider::new("custom", "{}")));

    let names: Vec<String> = registry
        .list_available()
        .into_iter()
        .map(|d| d.name)
        .collect();
    assert_eq!(names, vec!["openai", "anthropic", "ollama", "custom"]);
}

#[test]
fn list_available_reports_configuration_state() {
    let registry = registry_with_anthropic_key();
    let descriptors = registry.list_available();

    let configured: Vec<bool> = descriptors.iter().map(|d| d.configured).collect();
    // openai unconfigured, anthropic configured, ollama base URL emptied
    assert_eq!(configured, vec![false, true, false]);
}

#[test]
fn register_overwrites_in_place_on_collision() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    registry.register("openai", Arc::new(StubProvider::new("openai", "{}")));

    let descriptors = registry.list_available();
    assert_eq!(descriptors.len(), 3);
    assert_eq!(descriptors[0].name, "openai");
    assert_eq!(descriptors[0].model, "stub-model");
}

#[test]
fn concurrent_set_active_and_resolve_stay_consistent() {
    let registry = Arc::new(ProviderRegistry::new(&AiConfig::default()));
    let names = ["openai", "anthropic", "ollama"];

    let writers: Vec<_> = names
        .iter()
        .copied()
        .map(|name| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    registry.set_active(name).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                for _ in 0..100 {
                    // Every read must see one of the registered names,
                    // never a torn or stale-unknown value
                    let provider = registry.resolve(None).unwrap();
                    assert!(names.contains(&provider.name()));
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    assert!(names.contains(&registry.active_name().as_str()));
}

#[test]
fn registered_custom_provider_is_resolvable_and_activatable() {
    let registry = ProviderRegistry::new(&AiConfig::default());
    registry.register("custom", Arc::new(StubProvider::new("custom", "{}")));

    assert_eq!(registry.resolve(Some("custom")).unwrap().name(), "custom");
    registry.set_active("custom").unwrap();
    assert_eq!(registry.resolve(None).unwrap().name(), "custom");
}
