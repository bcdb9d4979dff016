//! The backend seam.

use crate::{FunctionSchema, RawCompletion};
use anyhow::Result;

/// Arguments of one backend call, borrowed from the request being served.
#[derive(Debug, Clone, Copy)]
pub struct Call<'a> {
    /// Concrete model name, already resolved from the tier.
    pub model: &'a str,
    /// Prompt text.
    pub prompt: &'a str,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum completion tokens.
    pub max_tokens: u32,
    /// Functions offered to the model. Backends without function calling
    /// ignore them.
    pub functions: &'a [FunctionSchema],
}

/// A single completion backend.
///
/// Implementations translate a [`Call`] into their wire format and back
/// into a [`RawCompletion`]. Any failure (transport, timeout, status,
/// decoding) is returned as an error; the dispatcher attributes it to the
/// provider and moves on. Constructors are inherent methods on each
/// backend and never called polymorphically.
pub trait Adapter: Send + Sync {
    /// Run one completion.
    fn call(&self, call: &Call<'_>) -> impl Future<Output = Result<RawCompletion>> + Send;
}
