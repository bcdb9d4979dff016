//! Error taxonomy.
//!
//! `ConfigError` and `AllProvidersFailed` are the only errors a caller of
//! the dispatcher sees, wrapped in `DispatchError`. `ProviderError` stays
//! inside the fallback loop and only surfaces as an entry of
//! `AllProvidersFailed::attempts`.

use crate::ProviderId;
use compact_str::CompactString;
use std::fmt::Write;

/// A caller or configuration mistake. Never triggers fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Provider name is unknown or not registered.
    #[error("unknown provider '{provider}'")]
    UnknownProvider { provider: CompactString },
    /// The provider defines no such model tier.
    #[error("provider '{provider}' has no model tier '{tier}'")]
    UnknownTier {
        provider: ProviderId,
        tier: CompactString,
    },
    /// No registered provider carries a capability the router needs.
    #[error("no provider carries the '{capability}' capability")]
    MissingCapability { capability: CompactString },
    /// A registered provider has no adapter to call.
    #[error("no adapter for provider '{provider}'")]
    MissingAdapter { provider: ProviderId },
    /// The request is out of bounds.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },
    /// The configuration is inconsistent.
    #[error("invalid configuration: {reason}")]
    Invalid { reason: String },
}

impl ConfigError {
    /// `UnknownProvider` for a typed id.
    pub fn unknown_provider(provider: ProviderId) -> Self {
        Self::UnknownProvider {
            provider: CompactString::const_new(provider.as_str()),
        }
    }
}

/// One failed attempt against one backend.
///
/// The cause is kept as-is; the dispatcher treats every cause the same.
#[derive(Debug, thiserror::Error)]
#[error("{provider}: {cause:#}")]
pub struct ProviderError {
    /// The backend that failed.
    pub provider: ProviderId,
    /// Transport, status, or decoding failure with its context chain.
    pub cause: anyhow::Error,
}

impl ProviderError {
    /// Attribute `cause` to `provider`.
    pub fn new(provider: ProviderId, cause: anyhow::Error) -> Self {
        Self { provider, cause }
    }
}

/// Every candidate failed. Attempts are listed in the order they ran.
#[derive(Debug, thiserror::Error)]
#[error("all providers failed: {}", render(.attempts))]
pub struct AllProvidersFailed {
    /// One entry per attempted provider.
    pub attempts: Vec<ProviderError>,
}

impl AllProvidersFailed {
    /// Providers in attempt order.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.attempts.iter().map(|a| a.provider).collect()
    }
}

fn render(attempts: &[ProviderError]) -> String {
    let mut out = String::new();
    for (i, attempt) in attempts.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{attempt}");
    }
    out
}

/// Terminal error of `Dispatcher::complete`.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Rejected before or during candidate resolution.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Every candidate failed.
    #[error(transparent)]
    AllProvidersFailed(#[from] AllProvidersFailed),
}
