//! Adapter implementation for the Claude (Anthropic) backend.

use super::{Claude, Request, Response};
use anyhow::Result;
use rcore::{Adapter, Call, RawCompletion};

impl Adapter for Claude {
    async fn call(&self, call: &Call<'_>) -> Result<RawCompletion> {
        let body = Request::from(call);
        let response: Response = self.http.post(&body).await?;
        response.into_completion()
    }
}
