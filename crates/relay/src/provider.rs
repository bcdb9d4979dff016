//! Production backends.
//!
//! `Provider` dispatches over the concrete adapter crates by enum match.
//! `build_provider()` constructs the arm for a `ProviderId` from its config.

use crate::ProviderConfig;
use anyhow::Result;
use claude::Claude;
use gemini::Gemini;
use openai::OpenAI;
use rcore::{Adapter, Call, Client, ProviderId, RawCompletion};
use std::time::Duration;

/// One production backend.
#[derive(Clone, Debug)]
pub enum Provider {
    /// OpenAI chat completions, with function calling.
    OpenAI(OpenAI),
    /// Anthropic Messages API.
    Claude(Claude),
    /// Google Gemini `generateContent`.
    Gemini(Gemini),
}

impl Provider {
    /// Which backend this is.
    pub fn id(&self) -> ProviderId {
        match self {
            Self::OpenAI(_) => ProviderId::OpenAI,
            Self::Claude(_) => ProviderId::Claude,
            Self::Gemini(_) => ProviderId::Gemini,
        }
    }
}

/// Construct the adapter for `id` from its config and a shared HTTP client.
pub fn build_provider(id: ProviderId, config: &ProviderConfig, client: Client) -> Result<Provider> {
    let key = config.api_key.as_str();
    let base_url = config.base_url.as_deref();
    let timeout = config.timeout_secs.map(Duration::from_secs);

    let provider = match id {
        ProviderId::OpenAI => Provider::OpenAI(
            match base_url {
                Some(url) => OpenAI::custom(client, key, url)?,
                None => OpenAI::api(client, key)?,
            }
            .with_timeout(timeout),
        ),
        ProviderId::Claude => Provider::Claude(
            match base_url {
                Some(url) => Claude::custom(client, key, url)?,
                None => Claude::anthropic(client, key)?,
            }
            .with_timeout(timeout),
        ),
        ProviderId::Gemini => Provider::Gemini(
            match base_url {
                Some(url) => Gemini::custom(client, key, url)?,
                None => Gemini::api(client, key)?,
            }
            .with_timeout(timeout),
        ),
    };
    Ok(provider)
}

impl Adapter for Provider {
    async fn call(&self, call: &Call<'_>) -> Result<RawCompletion> {
        match self {
            Self::OpenAI(p) => p.call(call).await,
            Self::Claude(p) => p.call(call).await,
            Self::Gemini(p) => p.call(call).await,
        }
    }
}
