//! Provider identity and static descriptors.

use crate::{ConfigError, Usage};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Capability tags consulted by the routing policy.
pub mod capability {
    /// The backend accepts function schemas and may return a function call.
    pub const FUNCTION_CALLING: &str = "function_calling";
    /// The backend handles prompts beyond the long-prompt threshold.
    pub const LONG_CONTEXT: &str = "long_context";
    /// The backend is the cheap default for plain generation.
    pub const COST_EFFECTIVE: &str = "cost_effective";
    /// The backend is preferred for analysis and multi-step reasoning.
    pub const COMPLEX_REASONING: &str = "complex_reasoning";
}

/// Identifier of a completion backend.
///
/// Ordering follows declaration order. Registry iteration and capability
/// lookup rely on it, so new variants go at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderId {
    /// OpenAI chat completions.
    OpenAI,
    /// Anthropic Messages API.
    Claude,
    /// Google Gemini `generateContent`.
    Gemini,
}

impl ProviderId {
    /// Every known provider, in declaration order.
    pub const ALL: [ProviderId; 3] = [Self::OpenAI, Self::Claude, Self::Gemini];

    /// Stable lowercase name used in configuration and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Claude => "claude",
            Self::Gemini => "gemini",
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownProvider {
                provider: CompactString::from(s),
            })
    }
}

impl Serialize for ProviderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProviderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = CompactString::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// Price of one thousand tokens, split by direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenCost {
    /// Cost per 1k prompt tokens.
    pub input: f64,
    /// Cost per 1k completion tokens.
    pub output: f64,
}

/// Static description of one backend: its model tiers, pricing and the
/// capability tags the router matches against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderDescriptor {
    /// Which backend this describes.
    pub id: ProviderId,
    /// Tier name (e.g. `smart`, `fast`) to concrete model name.
    pub model_tiers: BTreeMap<CompactString, CompactString>,
    /// Pricing used for cost accounting.
    pub cost_per_k_tokens: TokenCost,
    /// Capability tags, see [`capability`].
    pub capabilities: BTreeSet<CompactString>,
}

impl ProviderDescriptor {
    /// Create a descriptor with no tiers and no capabilities.
    pub fn new(id: ProviderId) -> Self {
        Self {
            id,
            model_tiers: BTreeMap::new(),
            cost_per_k_tokens: TokenCost::default(),
            capabilities: BTreeSet::new(),
        }
    }

    /// Map a tier name to a model.
    pub fn with_tier(mut self, tier: &str, model: &str) -> Self {
        self.model_tiers.insert(tier.into(), model.into());
        self
    }

    /// Set the per-1k-token pricing.
    pub fn with_cost(mut self, input: f64, output: f64) -> Self {
        self.cost_per_k_tokens = TokenCost { input, output };
        self
    }

    /// Add a capability tag.
    pub fn with_capability(mut self, tag: &str) -> Self {
        self.capabilities.insert(tag.into());
        self
    }

    /// Model name for `tier`, if this provider defines it.
    pub fn model(&self, tier: &str) -> Option<&str> {
        self.model_tiers.get(tier).map(CompactString::as_str)
    }

    /// Whether the provider carries `tag`.
    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.contains(tag)
    }

    /// Cost of `usage` at this provider's rates.
    pub fn cost(&self, usage: &Usage) -> f64 {
        let input = f64::from(usage.input_tokens()) / 1000.0;
        let output = f64::from(usage.output_tokens()) / 1000.0;
        input * self.cost_per_k_tokens.input + output * self.cost_per_k_tokens.output
    }
}
