//! Live adapter for the `OpenAI` image generation API.

use std::time::Duration;

use reqwest::Client;

use crate::ports::image_provider::{ImageProvider, ProviderReply, ProviderRequestBody, SendFuture};

/// Default endpoint: the Responses API, which serves `gpt-image-1`.
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/responses";

/// Display name used in error messages.
pub const PROVIDER_NAME: &str = "OpenAI";

/// Live `OpenAI` provider that posts to the configured endpoint.
pub struct OpenAiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiProvider {
    /// Create a new `OpenAI` provider.
    ///
    /// `timeout` bounds the whole call; `None` waits as long as the provider takes.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        api_key: String,
        endpoint: String,
        timeout: Option<Duration>,
    ) -> Result<Self, reqwest::Error> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, endpoint, api_key })
    }
}

impl ImageProvider for OpenAiProvider {
    fn send(&self, body: &ProviderRequestBody) -> SendFuture<'_> {
        let body = body.clone();
        Box::pin(async move {
            let response = self
                .client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&body)
                .send()
                .await?;

            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(ProviderReply { status, body })
        })
    }
}
