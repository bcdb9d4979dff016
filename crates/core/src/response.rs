//! Normalized completion output and token accounting.

use crate::ProviderId;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::Serialize;

/// Token counts for one completion.
///
/// Only constructible through [`Usage::new`] and [`Usage::estimate`], so
/// `total_tokens` always equals `input_tokens + output_tokens`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Usage {
    input_tokens: u32,
    output_tokens: u32,
    total_tokens: u64,
}

impl Usage {
    /// Usage from counts reported by a backend.
    pub fn new(input_tokens: u32, output_tokens: u32) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens: u64::from(input_tokens) + u64::from(output_tokens),
        }
    }

    /// Approximate usage for a backend that reports none.
    ///
    /// See [`estimate_tokens`]. Not billing-exact.
    pub fn estimate(prompt: &str, output: &str) -> Self {
        Self::new(estimate_tokens(prompt), estimate_tokens(output))
    }

    /// Prompt tokens.
    pub fn input_tokens(&self) -> u32 {
        self.input_tokens
    }

    /// Completion tokens.
    pub fn output_tokens(&self) -> u32 {
        self.output_tokens
    }

    /// Prompt plus completion tokens.
    pub fn total_tokens(&self) -> u64 {
        self.total_tokens
    }
}

/// Rough token count: one token per four characters, rounded down.
pub fn estimate_tokens(text: &str) -> u32 {
    u32::try_from(text.chars().count() / 4).unwrap_or(u32::MAX)
}

/// A function call chosen by the model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    /// Name of the function.
    pub name: CompactString,
    /// Arguments as a JSON string.
    pub arguments: String,
}

/// What an adapter returns: the backend response in the common shape,
/// before the dispatcher stamps provider, latency and time on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCompletion {
    /// Generated text. Empty when the model only called a function.
    pub content: String,
    /// Function call, if the backend made one.
    pub function_call: Option<FunctionCall>,
    /// Token usage, reported or estimated.
    pub usage: Usage,
}

/// The caller-facing result of a completed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    /// Generated text.
    pub content: String,
    /// Function call, if the backend made one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
    /// Token usage.
    pub usage: Usage,
    /// Provider that produced this result.
    pub provider: ProviderId,
    /// Concrete model the tier resolved to.
    pub model: CompactString,
    /// Wall-clock time of the successful attempt, in seconds.
    pub latency_secs: f64,
    /// When the result was produced.
    pub timestamp: DateTime<Utc>,
}

impl CompletionResult {
    /// Stamp a raw completion with its origin and timing.
    pub fn new(
        raw: RawCompletion,
        provider: ProviderId,
        model: impl Into<CompactString>,
        latency_secs: f64,
    ) -> Self {
        Self {
            content: raw.content,
            function_call: raw.function_call,
            usage: raw.usage,
            provider,
            model: model.into(),
            latency_secs,
            timestamp: Utc::now(),
        }
    }
}
