//! Adapter implementation for OpenAI.

use super::{OpenAI, Request, Response};
use anyhow::Result;
use rcore::{Adapter, Call, RawCompletion};

impl Adapter for OpenAI {
    async fn call(&self, call: &Call<'_>) -> Result<RawCompletion> {
        let body = Request::from(call);
        let response: Response = self.http.post(&body).await?;
        response.into_completion()
    }
}
