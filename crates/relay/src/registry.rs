//! `ProviderRegistry`: the immutable catalog of backend descriptors.

use compact_str::CompactString;
use rcore::{ConfigError, ProviderDescriptor, ProviderId};
use std::collections::BTreeMap;

/// Descriptors keyed by provider, iterated in `ProviderId` order.
///
/// Built once and never mutated; share it behind an `Arc` for lock-free
/// concurrent reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderRegistry {
    providers: BTreeMap<ProviderId, ProviderDescriptor>,
}

impl ProviderRegistry {
    /// Build a registry. A later descriptor for the same id replaces an
    /// earlier one.
    pub fn new(descriptors: impl IntoIterator<Item = ProviderDescriptor>) -> Self {
        Self {
            providers: descriptors.into_iter().map(|d| (d.id, d)).collect(),
        }
    }

    /// Descriptor for `id`.
    pub fn lookup(&self, id: ProviderId) -> Result<&ProviderDescriptor, ConfigError> {
        self.providers
            .get(&id)
            .ok_or_else(|| ConfigError::unknown_provider(id))
    }

    /// Model name that `tier` maps to at `id`.
    pub fn resolve_model(&self, id: ProviderId, tier: &str) -> Result<&str, ConfigError> {
        self.lookup(id)?
            .model(tier)
            .ok_or_else(|| ConfigError::UnknownTier {
                provider: id,
                tier: CompactString::from(tier),
            })
    }

    /// First provider, in registry order, carrying `tag`.
    pub fn with_capability(&self, tag: &str) -> Option<ProviderId> {
        self.providers
            .values()
            .find(|d| d.has_capability(tag))
            .map(|d| d.id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    /// Registered providers in order.
    pub fn ids(&self) -> impl Iterator<Item = ProviderId> + '_ {
        self.providers.keys().copied()
    }

    /// All descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.values()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
