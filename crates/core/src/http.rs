//! Shared JSON-over-HTTP transport for the remote backends.
//!
//! `HttpTransport` wraps a `reqwest::Client` with pre-built headers, the
//! target endpoint and an optional per-request timeout. Non-2xx statuses
//! and undecodable bodies are errors, so adapters only ever see a
//! well-formed response type.

use anyhow::{Context, Result, bail};
use reqwest::{
    Client, Method,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// Pre-configured POST-a-JSON-body client for one backend.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpTransport {
    /// Authenticate with `Authorization: Bearer <key>`.
    pub fn bearer(client: Client, key: &str, endpoint: &str) -> Result<Self> {
        let mut headers = json_headers();
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self::with_headers(client, headers, endpoint))
    }

    /// Authenticate with a provider-specific header (e.g. `x-api-key`).
    pub fn custom_header(
        client: Client,
        header_name: &str,
        header_value: &str,
        endpoint: &str,
    ) -> Result<Self> {
        let mut headers = json_headers();
        headers.insert(
            header_name.parse::<HeaderName>()?,
            header_value.parse::<HeaderValue>()?,
        );
        Ok(Self::with_headers(client, headers, endpoint))
    }

    fn with_headers(client: Client, headers: HeaderMap, endpoint: &str) -> Self {
        Self {
            client,
            headers,
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            timeout: None,
        }
    }

    /// Add a static header, e.g. an API version.
    pub fn header(mut self, name: &'static str, value: &str) -> Result<Self> {
        self.headers
            .insert(HeaderName::from_static(name), value.parse::<HeaderValue>()?);
        Ok(self)
    }

    /// Bound every request made through this transport.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// POST `body` to the configured endpoint.
    pub async fn post<T: DeserializeOwned>(&self, body: &impl Serialize) -> Result<T> {
        self.post_to(&self.endpoint, body).await
    }

    /// POST `body` to `url`, decoding the JSON response as `T`.
    pub async fn post_to<T: DeserializeOwned>(&self, url: &str, body: &impl Serialize) -> Result<T> {
        tracing::trace!("request to {url}: {}", serde_json::to_string(body)?);
        let mut request = self
            .client
            .request(Method::POST, url)
            .headers(self.headers.clone())
            .json(body);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;
        let status = response.status();
        let text = response.text().await.context("failed to read response body")?;
        tracing::trace!("response ({status}): {text}");
        if !status.is_success() {
            bail!("{url} returned {status}: {}", truncate(&text, 512));
        }

        serde_json::from_str(&text).context("malformed response body")
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The pre-built request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
