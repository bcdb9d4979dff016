//! Shared fixtures: a scripted adapter, a recording recorder and a
//! three-provider registry.
#![allow(dead_code)]

use anyhow::{Result, bail};
use parking_lot::Mutex;
use relay::{
    Adapter, Call, CompletionResult, Dispatcher, ProviderDescriptor, ProviderId, ProviderRegistry,
    RawCompletion, Usage, UsageRecorder, capability,
};
use std::sync::Arc;

/// Install a test-writer subscriber filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One adapter invocation as seen by the scripted backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub provider: ProviderId,
    pub model: String,
    pub functions: usize,
}

/// Invocations shared by every scripted adapter of one dispatcher.
pub type CallLog = Arc<Mutex<Vec<Invocation>>>;

/// In-memory backend that either answers or fails, and logs each call.
#[derive(Clone)]
pub struct Scripted {
    provider: ProviderId,
    fail: bool,
    log: CallLog,
}

impl Adapter for Scripted {
    async fn call(&self, call: &Call<'_>) -> Result<RawCompletion> {
        self.log.lock().push(Invocation {
            provider: self.provider,
            model: call.model.to_owned(),
            functions: call.functions.len(),
        });
        if self.fail {
            bail!("{} is down", self.provider);
        }
        Ok(RawCompletion {
            content: format!("reply from {}", self.provider),
            function_call: None,
            usage: Usage::new(1000, 500),
        })
    }
}

/// Recorder notifications, in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Success(ProviderId),
    Fallback(ProviderId, ProviderId),
}

#[derive(Default)]
pub struct Recording {
    events: Mutex<Vec<Event>>,
}

impl Recording {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }
}

impl UsageRecorder for Recording {
    fn on_success(&self, provider: ProviderId, result: &CompletionResult) {
        assert_eq!(result.provider, provider);
        self.events.lock().push(Event::Success(provider));
    }

    fn on_fallback(&self, original: ProviderId, used: ProviderId, result: &CompletionResult) {
        assert_eq!(result.provider, used);
        self.events.lock().push(Event::Fallback(original, used));
    }
}

/// openai: function calling + reasoning; claude: long context + reasoning;
/// gemini: cost effective. Every provider has `smart` and `fast` tiers.
pub fn registry() -> ProviderRegistry {
    ProviderRegistry::new([
        ProviderDescriptor::new(ProviderId::OpenAI)
            .with_tier("smart", "gpt-4o")
            .with_tier("fast", "gpt-4o-mini")
            .with_cost(0.0025, 0.01)
            .with_capability(capability::FUNCTION_CALLING)
            .with_capability(capability::COMPLEX_REASONING),
        ProviderDescriptor::new(ProviderId::Claude)
            .with_tier("smart", "claude-sonnet")
            .with_tier("fast", "claude-haiku")
            .with_cost(0.003, 0.015)
            .with_capability(capability::LONG_CONTEXT)
            .with_capability(capability::COMPLEX_REASONING),
        ProviderDescriptor::new(ProviderId::Gemini)
            .with_tier("smart", "gemini-pro")
            .with_tier("fast", "gemini-flash")
            .with_cost(0.00125, 0.005)
            .with_capability(capability::COST_EFFECTIVE),
    ])
}

/// Scripted adapters for every registered provider; those in `failing`
/// always fail.
pub fn adapters(
    registry: &ProviderRegistry,
    failing: &[ProviderId],
    log: &CallLog,
) -> Vec<(ProviderId, Scripted)> {
    registry
        .ids()
        .map(|provider| {
            let adapter = Scripted {
                provider,
                fail: failing.contains(&provider),
                log: Arc::clone(log),
            };
            (provider, adapter)
        })
        .collect()
}

/// Dispatcher over [`registry`] with fallback `[openai, claude, gemini]`.
pub fn dispatcher(
    failing: &[ProviderId],
) -> (Dispatcher<Scripted, Arc<Recording>>, CallLog, Arc<Recording>) {
    dispatcher_with(registry(), ProviderId::ALL.to_vec(), failing)
}

pub fn dispatcher_with(
    registry: ProviderRegistry,
    fallback: Vec<ProviderId>,
    failing: &[ProviderId],
) -> (Dispatcher<Scripted, Arc<Recording>>, CallLog, Arc<Recording>) {
    init_tracing();
    let log = CallLog::default();
    let recorder = Arc::new(Recording::default());
    let adapters = adapters(&registry, failing, &log);
    let dispatcher = Dispatcher::new(
        Arc::new(registry),
        fallback,
        adapters,
        Arc::clone(&recorder),
    )
    .expect("dispatcher");
    (dispatcher, log, recorder)
}

/// Providers called so far, in order.
pub fn called(log: &CallLog) -> Vec<ProviderId> {
    log.lock().iter().map(|i| i.provider).collect()
}
