//! Google Gemini `generateContent` adapter.
//!
//! The generative backend without usable native usage reporting: token
//! counts are estimated from character counts (see
//! [`rcore::estimate_tokens`]), which is an approximation and not a
//! billing-exact figure.

use rcore::{Client, HttpTransport};
pub use request::Request;
pub use response::Response;
use std::time::Duration;

mod provider;
mod request;
mod response;

/// The Generative Language API root. The model name is appended per call.
pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The Gemini adapter.
#[derive(Clone, Debug)]
pub struct Gemini {
    http: HttpTransport,
}

impl Gemini {
    /// Create an adapter targeting the public Gemini API.
    pub fn api(client: Client, key: &str) -> anyhow::Result<Self> {
        Self::custom(client, key, BASE_URL)
    }

    /// Create an adapter targeting a custom API root.
    pub fn custom(client: Client, key: &str, base_url: &str) -> anyhow::Result<Self> {
        Ok(Self {
            http: HttpTransport::custom_header(client, "x-goog-api-key", key, base_url)?,
        })
    }

    /// Bound each call to `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.http = self.http.timeout(timeout);
        self
    }

    /// The `generateContent` URL for `model`.
    pub fn url(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.http.endpoint())
    }
}
