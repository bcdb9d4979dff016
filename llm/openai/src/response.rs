//! Chat completions response body and its normalization.

use anyhow::{Context, Result, bail};
use compact_str::CompactString;
use rcore::{FunctionCall, RawCompletion, Usage};
use serde::Deserialize;

/// Non-streaming chat completions response.
#[derive(Debug, Deserialize)]
pub struct Response {
    choices: Vec<Choice>,
    usage: ApiUsage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<ToolCall>,
    /// Legacy single-call field, still returned by some compatible servers.
    #[serde(default)]
    function_call: Option<ApiFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct ToolCall {
    function: ApiFunctionCall,
}

#[derive(Debug, Deserialize)]
struct ApiFunctionCall {
    name: CompactString,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl Response {
    /// Convert to the common shape.
    ///
    /// Only the first choice is used. The first tool call wins when the
    /// model made several. The reported `total_tokens` is ignored and
    /// recomputed from its parts.
    pub fn into_completion(self) -> Result<RawCompletion> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .context("response has no choices")?;
        let message = choice.message;
        let function_call = message
            .tool_calls
            .into_iter()
            .map(|call| call.function)
            .next()
            .or(message.function_call)
            .map(|f| FunctionCall {
                name: f.name,
                arguments: f.arguments,
            });
        let content = message.content.unwrap_or_default();
        if content.is_empty() && function_call.is_none() {
            bail!("response has neither content nor a function call");
        }

        Ok(RawCompletion {
            content,
            function_call,
            usage: Usage::new(self.usage.prompt_tokens, self.usage.completion_tokens),
        })
    }
}
