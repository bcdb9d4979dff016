//! Claude (Anthropic) Messages API adapter.
//!
//! A plain message-completion backend: function schemas are not forwarded,
//! and usage comes from the response's `input_tokens`/`output_tokens`.

use rcore::{Client, HttpTransport};
pub use request::Request;
pub use response::Response;
use std::time::Duration;

mod provider;
mod request;
mod response;

/// The Anthropic Messages API endpoint.
pub const ENDPOINT: &str = "https://api.anthropic.com/v1/messages";

/// The Anthropic API version header value.
const API_VERSION: &str = "2023-06-01";

/// The Claude adapter.
#[derive(Clone, Debug)]
pub struct Claude {
    http: HttpTransport,
}

impl Claude {
    /// Create an adapter targeting the Anthropic API.
    pub fn anthropic(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, ENDPOINT)
    }

    /// Create an adapter targeting a custom Anthropic-compatible endpoint.
    pub fn custom(client: Client, key: &str, endpoint: &str) -> anyhow::Result<Self> {
        let http = HttpTransport::custom_header(client, "x-api-key", key, endpoint)?
            .header("anthropic-version", API_VERSION)?;
        Ok(Self { http })
    }

    /// Bound each call to `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http = self.http.timeout(timeout);
        self
    }

    /// The Messages API endpoint in use.
    pub fn endpoint(&self) -> &str {
        self.http.endpoint()
    }
}
