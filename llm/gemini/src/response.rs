//! `generateContent` response and its normalization.

use anyhow::{Context, Result, bail};
use rcore::{RawCompletion, Usage};
use serde::Deserialize;

/// `generateContent` response. Usage metadata, if any, is not read.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl Response {
    /// Concatenate the first candidate's text parts; estimate usage from
    /// `prompt` and the generated text.
    pub fn into_completion(self, prompt: &str) -> Result<RawCompletion> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .context("response has no candidates")?;
        let content: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if content.is_empty() {
            bail!("candidate has no text");
        }

        let usage = Usage::estimate(prompt, &content);
        Ok(RawCompletion {
            content,
            function_call: None,
            usage,
        })
    }
}
