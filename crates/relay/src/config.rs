//! Dispatcher configuration loaded from TOML.

use crate::{Dispatcher, Provider, ProviderRegistry, UsageRecorder, build_provider};
use anyhow::{Context, Result};
use compact_str::CompactString;
use rcore::{
    Client, ConfigError, ProviderDescriptor, ProviderId, TokenCost,
    capability::{COMPLEX_REASONING, COST_EFFECTIVE, FUNCTION_CALLING, LONG_CONTEXT},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path, sync::Arc};

/// Top-level configuration: one section per provider plus the fallback
/// chain shared by every request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Providers tried after the initial pick, in order.
    #[serde(default)]
    pub fallback: Vec<ProviderId>,
    /// Provider sections keyed by provider name.
    #[serde(default)]
    pub providers: BTreeMap<ProviderId, ProviderConfig>,
}

/// Configuration of one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API key (supports `${ENV_VAR}` expansion).
    #[serde(default)]
    pub api_key: String,
    /// Optional endpoint override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Optional HTTP timeout for each call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Tier name to model name.
    #[serde(default)]
    pub model_tiers: BTreeMap<CompactString, CompactString>,
    /// Pricing per thousand tokens.
    #[serde(default)]
    pub cost_per_k_tokens: TokenCost,
    /// Capability tags the router matches against.
    #[serde(default)]
    pub capabilities: Vec<CompactString>,
}

impl ProviderConfig {
    /// The registry entry this section describes.
    pub fn descriptor(&self, id: ProviderId) -> ProviderDescriptor {
        ProviderDescriptor {
            id,
            model_tiers: self.model_tiers.clone(),
            cost_per_k_tokens: self.cost_per_k_tokens,
            capabilities: self.capabilities.iter().cloned().collect(),
        }
    }

    fn builtin(
        key_var: &str,
        tiers: [(&str, &str); 2],
        cost: TokenCost,
        capabilities: &[&str],
    ) -> Self {
        Self {
            api_key: std::env::var(key_var).unwrap_or_default(),
            base_url: None,
            timeout_secs: None,
            model_tiers: tiers
                .into_iter()
                .map(|(tier, model)| (tier.into(), model.into()))
                .collect(),
            cost_per_k_tokens: cost,
            capabilities: capabilities.iter().map(|&tag| tag.into()).collect(),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        let providers = BTreeMap::from([
            (
                ProviderId::OpenAI,
                ProviderConfig::builtin(
                    "OPENAI_API_KEY",
                    [("smart", "gpt-4o"), ("fast", "gpt-4o-mini")],
                    TokenCost {
                        input: 0.0025,
                        output: 0.01,
                    },
                    &[FUNCTION_CALLING, COMPLEX_REASONING],
                ),
            ),
            (
                ProviderId::Claude,
                ProviderConfig::builtin(
                    "ANTHROPIC_API_KEY",
                    [
                        ("smart", "claude-sonnet-4-20250514"),
                        ("fast", "claude-3-5-haiku-latest"),
                    ],
                    TokenCost {
                        input: 0.003,
                        output: 0.015,
                    },
                    &[LONG_CONTEXT, COMPLEX_REASONING],
                ),
            ),
            (
                ProviderId::Gemini,
                ProviderConfig::builtin(
                    "GEMINI_API_KEY",
                    [("smart", "gemini-1.5-pro"), ("fast", "gemini-1.5-flash")],
                    TokenCost {
                        input: 0.00125,
                        output: 0.005,
                    },
                    &[COST_EFFECTIVE],
                ),
            ),
        ]);

        Self {
            fallback: ProviderId::ALL.to_vec(),
            providers,
        }
    }
}

impl RelayConfig {
    /// Parse a TOML string, expanding `${ENV_VAR}` references first.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let expanded = crate::utils::expand_env_vars(toml_str);
        let config: Self = toml::from_str(&expanded).context("failed to parse relay config")?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Reject sections the registry cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, provider) in &self.providers {
            if provider.model_tiers.is_empty() {
                return Err(invalid(format!("provider '{id}' defines no model tiers")));
            }
            if let Some((tier, _)) = provider.model_tiers.iter().find(|(_, m)| m.is_empty()) {
                return Err(invalid(format!(
                    "provider '{id}' maps tier '{tier}' to an empty model name"
                )));
            }
            let TokenCost { input, output } = provider.cost_per_k_tokens;
            if !(input.is_finite() && output.is_finite() && input >= 0.0 && output >= 0.0) {
                return Err(invalid(format!(
                    "provider '{id}' has an invalid cost ({input}, {output})"
                )));
            }
            if provider.timeout_secs == Some(0) {
                return Err(invalid(format!("provider '{id}' has a zero timeout")));
            }
        }

        if let Some(id) = self
            .fallback
            .iter()
            .find(|id| !self.providers.contains_key(*id))
        {
            return Err(invalid(format!(
                "fallback names provider '{id}' which has no section"
            )));
        }
        Ok(())
    }

    /// Build the registry from the provider sections.
    pub fn registry(&self) -> ProviderRegistry {
        ProviderRegistry::new(self.providers.iter().map(|(id, c)| c.descriptor(*id)))
    }
}

fn invalid(reason: String) -> ConfigError {
    ConfigError::Invalid { reason }
}

impl<R: UsageRecorder> Dispatcher<Provider, R> {
    /// Validate `config`, build every configured backend over one shared
    /// HTTP client, and wire the dispatcher.
    pub fn from_config(config: &RelayConfig, recorder: R) -> Result<Self> {
        config.validate()?;
        let client = Client::new();
        let mut adapters = Vec::with_capacity(config.providers.len());
        for (&id, provider) in &config.providers {
            let adapter = build_provider(id, provider, client.clone())
                .with_context(|| format!("failed to build provider '{id}'"))?;
            adapters.push((id, adapter));
        }

        let registry = Arc::new(config.registry());
        let dispatcher = Self::new(registry, config.fallback.clone(), adapters, recorder)?;
        Ok(dispatcher)
    }
}
