//! Completion request type.

use crate::{ConfigError, ProviderId};
use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Which backend the caller wants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Preference {
    /// Let the routing policy pick.
    #[default]
    Auto,
    /// Use this provider first; routing is skipped.
    Pinned(ProviderId),
}

impl fmt::Display for Preference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Pinned(id) => id.fmt(f),
        }
    }
}

impl FromStr for Preference {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.parse().map(Self::Pinned)
    }
}

impl From<ProviderId> for Preference {
    fn from(id: ProviderId) -> Self {
        Self::Pinned(id)
    }
}

impl Serialize for Preference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Preference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = CompactString::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A function the model may call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSchema {
    /// Function name.
    pub name: CompactString,
    /// What the function does, shown to the model.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// JSON schema of the arguments object.
    #[serde(default = "empty_object")]
    pub parameters: Value,
}

impl FunctionSchema {
    /// A function with no description and an empty parameter object.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            parameters: empty_object(),
        }
    }
}

fn empty_object() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// A single text-generation request.
///
/// The dispatcher only ever borrows a request, so it cannot change once
/// submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The prompt text.
    pub prompt: String,
    /// Explicit provider or `auto`.
    #[serde(default)]
    pub preference: Preference,
    /// Model tier resolved against the chosen provider's tier map.
    #[serde(default = "default_tier")]
    pub model_tier: CompactString,
    /// Sampling temperature in `[0, 2]`.
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum completion tokens, must be positive.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Functions offered to the model, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionSchema>,
}

/// Upper bound of the accepted temperature range.
pub const MAX_TEMPERATURE: f32 = 2.0;

impl CompletionRequest {
    /// Create a request with the default tier (`smart`), temperature
    /// (`0.7`) and token limit (`1000`), routed automatically.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            preference: Preference::Auto,
            model_tier: default_tier(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            functions: Vec::new(),
        }
    }

    /// Pin the request to a provider.
    pub fn with_provider(mut self, provider: ProviderId) -> Self {
        self.preference = Preference::Pinned(provider);
        self
    }

    /// Set the model tier.
    pub fn with_tier(mut self, tier: impl Into<CompactString>) -> Self {
        self.model_tier = tier.into();
        self
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the completion token limit.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Offer functions to the model.
    pub fn with_functions(mut self, functions: Vec<FunctionSchema>) -> Self {
        self.functions = functions;
        self
    }

    /// Check the caller-supplied bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=MAX_TEMPERATURE).contains(&self.temperature) {
            return Err(ConfigError::InvalidRequest {
                reason: format!(
                    "temperature {} is outside [0, {MAX_TEMPERATURE}]",
                    self.temperature
                ),
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::InvalidRequest {
                reason: "max_tokens must be positive".into(),
            });
        }
        if self.model_tier.is_empty() {
            return Err(ConfigError::InvalidRequest {
                reason: "model tier is empty".into(),
            });
        }
        Ok(())
    }
}

fn default_tier() -> CompactString {
    CompactString::const_new("smart")
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1000
}
