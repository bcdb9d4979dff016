//! `Dispatcher`: route, call, fall back, report.

use crate::{ProviderRegistry, RoutingPolicy, UsageRecorder};
use rcore::{
    Adapter, AllProvidersFailed, Call, CompletionRequest, CompletionResult, ConfigError,
    DispatchError, Preference, ProviderError, ProviderId,
};
use std::{collections::BTreeMap, sync::Arc, time::Instant};

/// Serves completion requests across a fixed set of backends.
///
/// Cloning is cheap; clones share the registry, adapters and recorder.
/// The dispatcher keeps no per-request state, so one instance serves any
/// number of concurrent requests. Dropping a `complete` future cancels the
/// in-flight backend call and the rest of the candidate list.
pub struct Dispatcher<A, R = ()> {
    inner: Arc<Inner<A, R>>,
}

struct Inner<A, R> {
    registry: Arc<ProviderRegistry>,
    routing: RoutingPolicy,
    fallback: Vec<ProviderId>,
    adapters: BTreeMap<ProviderId, A>,
    recorder: R,
}

impl<A, R> Clone for Dispatcher<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Adapter, R: UsageRecorder> Dispatcher<A, R> {
    /// Wire a dispatcher.
    ///
    /// Fails if a routing capability has no provider, a registered provider
    /// has no adapter, or the fallback chain names an unregistered provider.
    pub fn new(
        registry: Arc<ProviderRegistry>,
        fallback: Vec<ProviderId>,
        adapters: impl IntoIterator<Item = (ProviderId, A)>,
        recorder: R,
    ) -> Result<Self, ConfigError> {
        let routing = RoutingPolicy::from_registry(&registry)?;
        let adapters: BTreeMap<_, _> = adapters.into_iter().collect();
        if let Some(provider) = registry.ids().find(|id| !adapters.contains_key(id)) {
            return Err(ConfigError::MissingAdapter { provider });
        }
        if let Some(&id) = fallback.iter().find(|id| !registry.contains(**id)) {
            return Err(ConfigError::unknown_provider(id));
        }

        Ok(Self {
            inner: Arc::new(Inner {
                registry,
                routing,
                fallback,
                adapters,
                recorder,
            }),
        })
    }

    /// Serve one request.
    ///
    /// Candidates are tried strictly in order, each at most once. The first
    /// success is returned and reported to the recorder; a [`ConfigError`]
    /// aborts immediately; if every candidate fails the error lists each
    /// attempt in order.
    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResult, DispatchError> {
        request.validate()?;
        let inner = &*self.inner;

        let initial = match request.preference {
            Preference::Pinned(provider) => provider,
            Preference::Auto => inner.routing.select(request),
        };
        let candidates = candidate_order(initial, &inner.fallback);
        tracing::debug!("candidates for this request: {candidates:?}");

        let mut attempts = Vec::new();
        for provider in candidates {
            let model = inner
                .registry
                .resolve_model(provider, &request.model_tier)?;
            let adapter = inner
                .adapters
                .get(&provider)
                .ok_or(ConfigError::MissingAdapter { provider })?;

            let call = Call {
                model,
                prompt: &request.prompt,
                temperature: request.temperature,
                max_tokens: request.max_tokens,
                functions: &request.functions,
            };
            let started = Instant::now();
            match adapter.call(&call).await {
                Ok(raw) => {
                    let latency = started.elapsed().as_secs_f64();
                    let result = CompletionResult::new(raw, provider, model, latency);
                    if provider == initial {
                        inner.recorder.on_success(provider, &result);
                    } else {
                        tracing::info!("{initial} failed, served by fallback {provider}");
                        inner.recorder.on_fallback(initial, provider, &result);
                    }
                    return Ok(result);
                }
                Err(cause) => {
                    let error = ProviderError::new(provider, cause);
                    tracing::warn!("provider attempt failed: {error}");
                    attempts.push(error);
                }
            }
        }

        let error = AllProvidersFailed { attempts };
        tracing::error!("{error}");
        Err(error.into())
    }

    /// The provider catalog.
    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.inner.registry
    }

    /// The routing table.
    pub fn routing(&self) -> &RoutingPolicy {
        &self.inner.routing
    }

    /// The fallback chain, in order.
    pub fn fallback(&self) -> &[ProviderId] {
        &self.inner.fallback
    }

    /// The usage recorder.
    pub fn recorder(&self) -> &R {
        &self.inner.recorder
    }
}

/// `initial` followed by `chain`, keeping only the first occurrence of
/// each provider.
pub fn candidate_order(initial: ProviderId, chain: &[ProviderId]) -> Vec<ProviderId> {
    let mut order = Vec::with_capacity(chain.len() + 1);
    for &provider in std::iter::once(&initial).chain(chain) {
        if !order.contains(&provider) {
            order.push(provider);
        }
    }
    order
}
