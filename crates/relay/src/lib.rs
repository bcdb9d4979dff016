//! Multi-backend completion dispatcher.
//!
//! A [`Dispatcher`] picks an initial backend for each request (pinned by
//! the caller or chosen by the [`RoutingPolicy`]), calls it, and on failure
//! walks a fixed fallback chain until one backend answers. Successful
//! results are reported to a [`UsageRecorder`] exactly once.
//!
//! ```no_run
//! use relay::{CompletionRequest, Dispatcher, RelayConfig, TracingRecorder};
//! use std::path::Path;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = RelayConfig::load(Path::new("relay.toml"))?;
//! let dispatcher = Dispatcher::from_config(&config, TracingRecorder)?;
//! let result = dispatcher
//!     .complete(&CompletionRequest::new("Write a haiku about rust"))
//!     .await?;
//! println!("{} via {}", result.content, result.provider);
//! # Ok(())
//! # }
//! ```

pub use config::{ProviderConfig, RelayConfig};
pub use dispatcher::{Dispatcher, candidate_order};
pub use provider::{Provider, build_provider};
pub use rcore::{
    Adapter, AllProvidersFailed, Call, CompletionRequest, CompletionResult, ConfigError,
    DispatchError, FunctionCall, FunctionSchema, Preference, ProviderDescriptor, ProviderError,
    ProviderId, RawCompletion, TokenCost, Usage, capability,
};
pub use recorder::{ProviderStats, TracingRecorder, UsageLedger, UsageRecorder};
pub use registry::ProviderRegistry;
pub use routing::{LONG_PROMPT_CHARS, Rule, RoutingPolicy};

mod config;
mod dispatcher;
mod provider;
mod recorder;
mod registry;
mod routing;
pub mod utils;
