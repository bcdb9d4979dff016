//! Capability-based selection of the initial provider.

use crate::ProviderRegistry;
use compact_str::CompactString;
use rcore::{CompletionRequest, ConfigError, ProviderId, capability};

/// Prompts longer than this many characters need a long-context model.
pub const LONG_PROMPT_CHARS: usize = 10_000;

const GENERATIVE_KEYWORDS: [&str; 4] = ["generate", "create", "write", "compose"];
const REASONING_KEYWORDS: [&str; 4] = ["analyze", "reason", "solve", "calculate"];

/// The routing rule a request matched. Rules are checked in declaration
/// order; the first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// The request offers functions.
    FunctionCalling,
    /// The prompt exceeds [`LONG_PROMPT_CHARS`].
    LongContext,
    /// The prompt asks for generated text.
    Generative,
    /// The prompt asks for analysis.
    Reasoning,
    /// Nothing else matched.
    Default,
}

impl Rule {
    /// Classify a request.
    pub fn classify(request: &CompletionRequest) -> Self {
        if !request.functions.is_empty() {
            return Self::FunctionCalling;
        }
        if request.prompt.chars().count() > LONG_PROMPT_CHARS {
            return Self::LongContext;
        }

        let prompt = request.prompt.to_lowercase();
        if GENERATIVE_KEYWORDS.iter().any(|k| prompt.contains(k)) {
            Self::Generative
        } else if REASONING_KEYWORDS.iter().any(|k| prompt.contains(k)) {
            Self::Reasoning
        } else {
            Self::Default
        }
    }

    /// The capability tag this rule routes on.
    pub const fn capability(self) -> &'static str {
        match self {
            Self::FunctionCalling => capability::FUNCTION_CALLING,
            Self::LongContext => capability::LONG_CONTEXT,
            Self::Generative | Self::Default => capability::COST_EFFECTIVE,
            Self::Reasoning => capability::COMPLEX_REASONING,
        }
    }
}

/// Resolved capability table.
///
/// Each tag is looked up once at construction, so [`RoutingPolicy::select`]
/// cannot fail and never touches the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPolicy {
    function_calling: ProviderId,
    long_context: ProviderId,
    cost_effective: ProviderId,
    complex_reasoning: ProviderId,
}

impl RoutingPolicy {
    /// Resolve every routing tag against `registry`.
    pub fn from_registry(registry: &ProviderRegistry) -> Result<Self, ConfigError> {
        let resolve = |tag: &str| {
            registry
                .with_capability(tag)
                .ok_or_else(|| ConfigError::MissingCapability {
                    capability: CompactString::from(tag),
                })
        };

        Ok(Self {
            function_calling: resolve(capability::FUNCTION_CALLING)?,
            long_context: resolve(capability::LONG_CONTEXT)?,
            cost_effective: resolve(capability::COST_EFFECTIVE)?,
            complex_reasoning: resolve(capability::COMPLEX_REASONING)?,
        })
    }

    /// Pick the initial provider for an `auto` request.
    pub fn select(&self, request: &CompletionRequest) -> ProviderId {
        let rule = Rule::classify(request);
        let provider = self.provider_for(rule);
        tracing::debug!("routing matched {rule:?}, selected {provider}");
        provider
    }

    /// The provider `rule` routes to.
    pub fn provider_for(&self, rule: Rule) -> ProviderId {
        match rule {
            Rule::FunctionCalling => self.function_calling,
            Rule::LongContext => self.long_context,
            Rule::Generative | Rule::Default => self.cost_effective,
            Rule::Reasoning => self.complex_reasoning,
        }
    }
}
