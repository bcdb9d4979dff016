//! Relay configuration tests.

use relay::{
    ConfigError, Dispatcher, Provider, ProviderId, RelayConfig, RoutingPolicy, capability,
    utils::expand_env_vars,
};
use std::io::Write;

const CONFIG: &str = r#"
fallback = ["claude", "gemini"]

[providers.claude]
api_key = "sk-ant-test"
timeout_secs = 30
capabilities = ["long_context", "complex_reasoning", "function_calling"]
cost_per_k_tokens = { input = 0.003, output = 0.015 }

[providers.claude.model_tiers]
smart = "claude-sonnet-4-20250514"
fast = "claude-3-5-haiku-latest"

[providers.gemini]
api_key = "gm-test"
base_url = "http://localhost:9000/v1beta"
capabilities = ["cost_effective"]

[providers.gemini.model_tiers]
smart = "gemini-1.5-pro"
"#;

#[test]
fn parse_full_config() {
    let config = RelayConfig::from_toml(CONFIG).unwrap();
    assert_eq!(config.fallback, [ProviderId::Claude, ProviderId::Gemini]);
    assert_eq!(config.providers.len(), 2);

    let claude = &config.providers[&ProviderId::Claude];
    assert_eq!(claude.api_key, "sk-ant-test");
    assert_eq!(claude.timeout_secs, Some(30));
    assert_eq!(claude.cost_per_k_tokens.output, 0.015);
    assert_eq!(claude.model_tiers["fast"], "claude-3-5-haiku-latest");

    let gemini = &config.providers[&ProviderId::Gemini];
    assert_eq!(gemini.base_url.as_deref(), Some("http://localhost:9000/v1beta"));
    assert_eq!(gemini.cost_per_k_tokens.input, 0.0);
    config.validate().unwrap();
}

#[test]
fn registry_from_config_routes() {
    let config = RelayConfig::from_toml(CONFIG).unwrap();
    let registry = config.registry();
    assert_eq!(
        registry.with_capability(capability::FUNCTION_CALLING),
        Some(ProviderId::Claude)
    );
    assert!(RoutingPolicy::from_registry(&registry).is_ok());
}

#[test]
fn unknown_provider_section_is_rejected() {
    let err = RelayConfig::from_toml("[providers.mistral]\napi_key = \"k\"\n").unwrap_err();
    assert!(format!("{err:#}").contains("unknown provider 'mistral'"), "{err:#}");
}

#[test]
fn api_key_expands_env_vars() {
    let path = std::env::var("PATH").unwrap_or_default();
    let toml = r#"
[providers.openai]
api_key = "${PATH}"
model_tiers = { smart = "gpt-4o" }
"#;
    let config = RelayConfig::from_toml(toml).unwrap();
    assert_eq!(config.providers[&ProviderId::OpenAI].api_key, path);
}

#[test]
fn expand_env_vars_edge_cases() {
    assert_eq!(expand_env_vars("no vars"), "no vars");
    assert_eq!(expand_env_vars("a${RELAY_TEST_UNSET_VARIABLE}b"), "ab");
    assert_eq!(expand_env_vars("cost $5"), "cost $5");
    assert_eq!(expand_env_vars("open ${NAME"), "open ${NAME");
}

#[test]
fn validate_rejects_fallback_without_section() {
    let config = RelayConfig::from_toml(
        r#"
fallback = ["openai"]

[providers.gemini]
model_tiers = { smart = "gemini-1.5-pro" }
"#,
    )
    .unwrap();
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Invalid { reason }) if reason.contains("openai")
    ));
}

#[test]
fn validate_rejects_empty_tiers_and_bad_costs() {
    let mut config = RelayConfig::default();
    config
        .providers
        .get_mut(&ProviderId::Gemini)
        .unwrap()
        .model_tiers
        .clear();
    assert!(config.validate().is_err());

    let mut config = RelayConfig::default();
    config
        .providers
        .get_mut(&ProviderId::OpenAI)
        .unwrap()
        .cost_per_k_tokens
        .input = -1.0;
    assert!(config.validate().is_err());

    let mut config = RelayConfig::default();
    config
        .providers
        .get_mut(&ProviderId::Claude)
        .unwrap()
        .cost_per_k_tokens
        .output = f64::NAN;
    assert!(config.validate().is_err());
}

#[test]
fn default_config_covers_every_capability() {
    let config = RelayConfig::default();
    config.validate().unwrap();
    assert_eq!(config.fallback, ProviderId::ALL);

    let registry = config.registry();
    let policy = RoutingPolicy::from_registry(&registry).unwrap();
    let request = relay::CompletionRequest::new("Generate a tagline");
    assert_eq!(policy.select(&request), ProviderId::Gemini);
    assert_eq!(
        registry.resolve_model(ProviderId::OpenAI, "fast").unwrap(),
        "gpt-4o-mini"
    );
}

#[test]
fn load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(CONFIG.as_bytes()).unwrap();
    let config = RelayConfig::load(file.path()).unwrap();
    assert_eq!(config.providers.len(), 2);
}

#[test]
fn load_missing_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("relay.toml");
    let err = RelayConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("relay.toml"), "{err}");
}

#[test]
fn dispatcher_from_config() {
    let config = RelayConfig::from_toml(CONFIG).unwrap();
    let dispatcher: Dispatcher<Provider, ()> = Dispatcher::from_config(&config, ()).unwrap();
    assert_eq!(dispatcher.fallback(), [ProviderId::Claude, ProviderId::Gemini]);
    assert_eq!(dispatcher.registry().len(), 2);
}

#[test]
fn dispatcher_from_invalid_config_fails() {
    let mut config = RelayConfig::from_toml(CONFIG).unwrap();
    config.fallback.push(ProviderId::OpenAI);
    assert!(Dispatcher::<Provider, ()>::from_config(&config, ()).is_err());
}
