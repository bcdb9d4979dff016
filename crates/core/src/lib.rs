//! Shared types for the relay completion dispatcher.
//!
//! Provides the provider identity and descriptor types, the
//! `CompletionRequest`/`CompletionResult` pair, token `Usage`, the error
//! taxonomy, and the `Adapter` trait every backend crate implements.
//! Also provides `HttpTransport`, the JSON-over-HTTPS plumbing shared by
//! the remote backends.

pub use adapter::{Adapter, Call};
pub use error::{AllProvidersFailed, ConfigError, DispatchError, ProviderError};
#[cfg(feature = "http")]
pub use http::HttpTransport;
pub use provider::{ProviderDescriptor, ProviderId, TokenCost, capability};
#[cfg(feature = "http")]
pub use reqwest::{self, Client};
pub use request::{CompletionRequest, FunctionSchema, Preference};
pub use response::{CompletionResult, FunctionCall, RawCompletion, Usage, estimate_tokens};

mod adapter;
mod error;
#[cfg(feature = "http")]
mod http;
mod provider;
mod request;
mod response;
