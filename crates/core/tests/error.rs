//! Tests for error rendering.

use relay_core::{AllProvidersFailed, ConfigError, DispatchError, ProviderError, ProviderId};

#[test]
fn unknown_tier_names_provider_and_tier() {
    let err = ConfigError::UnknownTier {
        provider: ProviderId::Gemini,
        tier: "huge".into(),
    };
    let text = err.to_string();
    assert!(text.contains("gemini"));
    assert!(text.contains("huge"));
}

#[test]
fn provider_error_keeps_context_chain() {
    let cause = anyhow::anyhow!("connection refused").context("request to backend failed");
    let err = ProviderError::new(ProviderId::OpenAI, cause);
    let text = err.to_string();
    assert!(text.starts_with("openai: "));
    assert!(text.contains("request to backend failed"));
    assert!(text.contains("connection refused"));
}

#[test]
fn all_failed_lists_attempts_in_order() {
    let err = AllProvidersFailed {
        attempts: vec![
            ProviderError::new(ProviderId::Claude, anyhow::anyhow!("timeout")),
            ProviderError::new(ProviderId::OpenAI, anyhow::anyhow!("401 Unauthorized")),
        ],
    };
    assert_eq!(err.providers(), vec![ProviderId::Claude, ProviderId::OpenAI]);
    assert_eq!(
        err.to_string(),
        "all providers failed: claude: timeout; openai: 401 Unauthorized"
    );
}

#[test]
fn dispatch_error_is_transparent() {
    let err = DispatchError::from(ConfigError::unknown_provider(ProviderId::Gemini));
    assert_eq!(err.to_string(), "unknown provider 'gemini'");
}
