//! Adapter implementation for Gemini.

use super::{Gemini, Request, Response};
use anyhow::Result;
use rcore::{Adapter, Call, RawCompletion};

impl Adapter for Gemini {
    async fn call(&self, call: &Call<'_>) -> Result<RawCompletion> {
        let body = Request::from(call);
        let response: Response = self.http.post_to(&self.url(call.model), &body).await?;
        response.into_completion(call.prompt)
    }
}
