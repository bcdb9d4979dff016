//! Usage reporting.
//!
//! The dispatcher notifies a [`UsageRecorder`] exactly once per successful
//! request and never for a failed one. Recorders are shared across
//! concurrent requests and synchronize internally.

use crate::ProviderRegistry;
use parking_lot::Mutex;
use rcore::{CompletionResult, ProviderId};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};

/// Receives terminal-success notifications from the dispatcher.
pub trait UsageRecorder: Send + Sync {
    /// The initially selected provider answered.
    fn on_success(&self, provider: ProviderId, result: &CompletionResult);

    /// `original` failed and `used`, a later candidate, answered.
    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult);
}

impl UsageRecorder for () {
    fn on_success(&self, _: ProviderId, _: &CompletionResult) {}

    fn on_fallback(&self, _: ProviderId, _: ProviderId, _: &CompletionResult) {}
}

impl<R: UsageRecorder + ?Sized> UsageRecorder for Arc<R> {
    fn on_success(&self, provider: ProviderId, result: &CompletionResult) {
        (**self).on_success(provider, result);
    }

    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult) {
        (**self).on_fallback(original, used, result);
    }
}

impl<A: UsageRecorder, B: UsageRecorder> UsageRecorder for (A, B) {
    fn on_success(&self, provider: ProviderId, result: &CompletionResult) {
        self.0.on_success(provider, result);
        self.1.on_success(provider, result);
    }

    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult) {
        self.0.on_fallback(original, used, result);
        self.1.on_fallback(original, used, result);
    }
}

/// Emits one `tracing` event per notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl UsageRecorder for TracingRecorder {
    fn on_success(&self, provider: ProviderId, result: &CompletionResult) {
        tracing::info!(
            provider = %provider,
            model = %result.model,
            input_tokens = result.usage.input_tokens(),
            output_tokens = result.usage.output_tokens(),
            latency_secs = result.latency_secs,
            "completion served"
        );
    }

    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult) {
        tracing::info!(
            original = %original,
            provider = %used,
            model = %result.model,
            input_tokens = result.usage.input_tokens(),
            output_tokens = result.usage.output_tokens(),
            latency_secs = result.latency_secs,
            "completion served by fallback"
        );
    }
}

/// Aggregated usage of one provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProviderStats {
    /// Requests answered as the initial pick.
    pub successes: u64,
    /// Requests answered after an earlier candidate failed.
    pub fallback_successes: u64,
    /// Requests where this was the initial pick but another provider answered.
    pub fallbacks_from: u64,
    /// Prompt tokens billed.
    pub input_tokens: u64,
    /// Completion tokens billed.
    pub output_tokens: u64,
    /// Accumulated cost at the registry's rates.
    pub cost: f64,
    /// Accumulated call latency in seconds.
    pub latency_secs: f64,
}

impl ProviderStats {
    /// Requests this provider answered.
    pub fn requests(&self) -> u64 {
        self.successes + self.fallback_successes
    }

    /// Mean latency of answered requests, zero if none.
    pub fn mean_latency_secs(&self) -> f64 {
        match self.requests() {
            0 => 0.0,
            n => self.latency_secs / n as f64,
        }
    }

    fn absorb(&mut self, result: &CompletionResult, cost: f64) {
        self.input_tokens += u64::from(result.usage.input_tokens());
        self.output_tokens += u64::from(result.usage.output_tokens());
        self.cost += cost;
        self.latency_secs += result.latency_secs;
    }
}

/// In-memory cost and performance ledger.
///
/// Prices each result with the serving provider's `cost_per_k_tokens`.
#[derive(Debug)]
pub struct UsageLedger {
    registry: Arc<ProviderRegistry>,
    stats: Mutex<BTreeMap<ProviderId, ProviderStats>>,
}

impl UsageLedger {
    /// Create an empty ledger priced by `registry`.
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self {
            registry,
            stats: Mutex::new(BTreeMap::new()),
        }
    }

    /// Copy of the current per-provider stats.
    pub fn snapshot(&self) -> BTreeMap<ProviderId, ProviderStats> {
        self.stats.lock().clone()
    }

    /// Stats of one provider.
    pub fn stats(&self, provider: ProviderId) -> ProviderStats {
        self.stats.lock().get(&provider).cloned().unwrap_or_default()
    }

    /// Total cost across providers.
    pub fn total_cost(&self) -> f64 {
        self.stats.lock().values().map(|s| s.cost).sum()
    }

    fn price(&self, provider: ProviderId, result: &CompletionResult) -> f64 {
        self.registry
            .lookup(provider)
            .map(|d| d.cost(&result.usage))
            .unwrap_or_default()
    }
}

impl UsageRecorder for UsageLedger {
    fn on_success(&self, provider: ProviderId, result: &CompletionResult) {
        let cost = self.price(provider, result);
        let mut stats = self.stats.lock();
        let entry = stats.entry(provider).or_default();
        entry.successes += 1;
        entry.absorb(result, cost);
    }

    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult) {
        let cost = self.price(used, result);
        let mut stats = self.stats.lock();
        stats.entry(original).or_default().fallbacks_from += 1;
        let entry = stats.entry(used).or_default();
        entry.fallback_successes += 1;
        entry.absorb(result, cost);
    }
}
