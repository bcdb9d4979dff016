//! OpenAI chat completions adapter.
//!
//! The function-calling backend: request functions are forwarded as
//! `tools`, and a returned tool call becomes the result's function call.
//! Token usage is taken from the response's own accounting.

use rcore::{Client, HttpTransport};
pub use request::Request;
pub use response::Response;
use std::time::Duration;

mod provider;
mod request;
mod response;

/// OpenAI endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI: &str = "https://api.openai.com/v1/chat/completions";
}

/// The OpenAI adapter.
#[derive(Clone, Debug)]
pub struct OpenAI {
    http: HttpTransport,
}

impl OpenAI {
    /// Create an adapter targeting the OpenAI API.
    pub fn api(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, endpoint::OPENAI)
    }

    /// Create an adapter targeting a custom OpenAI-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpTransport::bearer(client, key, endpoint)?,
        })
    }

    /// Bound each call to `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http = self.http.timeout(timeout);
        self
    }

    /// The chat completions endpoint in use.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}
