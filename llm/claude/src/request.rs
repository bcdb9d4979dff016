//! Request body for the Anthropic Messages API.

use rcore::Call;
use serde::Serialize;
use serde_json::{Value, json};

/// Anthropic accepts temperatures in `[0, 1]` only.
const MAX_TEMPERATURE: f32 = 1.0;

/// The request body for the Anthropic Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct Request {
    /// The model identifier.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// The messages array, a single user turn.
    pub messages: Vec<Value>,
    /// Temperature, clamped to the API's range.
    pub temperature: f32,
}

impl From<&Call<'_>> for Request {
    fn from(call: &Call<'_>) -> Self {
        if !call.functions.is_empty() {
            tracing::debug!(
                "claude adapter ignores {} function schema(s)",
                call.functions.len()
            );
        }
        Self {
            model: call.model.to_owned(),
            max_tokens: call.max_tokens,
            messages: vec![json!({ "role": "user", "content": call.prompt })],
            temperature: call.temperature.min(MAX_TEMPERATURE),
        }
    }
}
