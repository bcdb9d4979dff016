//! Raw Anthropic response and its normalization.

use anyhow::{Result, bail};
use rcore::{RawCompletion, Usage};
use serde::Deserialize;

/// Raw Anthropic non-streaming response.
#[derive(Debug, Deserialize)]
pub struct Response {
    content: Vec<ContentBlock>,
    usage: AnthropicUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct AnthropicUsage {
    input_tokens: u32,
    output_tokens: u32,
}

impl Response {
    /// Join the text blocks, newline-separated, and take the reported
    /// usage.
    pub fn into_completion(self) -> Result<RawCompletion> {
        let mut content = String::new();
        for block in self.content {
            if let ContentBlock::Text { text } = block {
                if !content.is_empty() {
                    content.push('\n');
                }
                content.push_str(&text);
            }
        }
        if content.is_empty() {
            bail!("response has no text content");
        }

        Ok(RawCompletion {
            content,
            function_call: None,
            usage: Usage::new(self.usage.input_tokens, self.usage.output_tokens),
        })
    }
}
