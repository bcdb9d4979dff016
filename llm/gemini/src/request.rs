//! `generateContent` request body.

use rcore::Call;
use serde::Serialize;

/// The request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// A single user turn.
    pub contents: Vec<Content>,
    /// Sampling settings.
    pub generation_config: GenerationConfig,
}

/// One conversation turn.
#[derive(Debug, Clone, Serialize)]
pub struct Content {
    /// Always `user` here.
    pub role: &'static str,
    /// Text parts.
    pub parts: Vec<Part>,
}

/// A text part.
#[derive(Debug, Clone, Serialize)]
pub struct Part {
    /// The text.
    pub text: String,
}

/// Sampling settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Temperature.
    pub temperature: f32,
    /// Maximum tokens to generate.
    pub max_output_tokens: u32,
}

impl From<&Call<'_>> for Request {
    fn from(call: &Call<'_>) -> Self {
        if !call.functions.is_empty() {
            tracing::debug!(
                "gemini adapter ignores {} function schema(s)",
                call.functions.len()
            );
        }
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: call.prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: call.temperature,
                max_output_tokens: call.max_tokens,
            },
        }
    }
}
