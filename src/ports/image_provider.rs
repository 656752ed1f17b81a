//! Image provider port for the outbound generation call.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// The JSON payload sent to the image provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequestBody {
    /// The resolved model identifier (e.g., `"gpt-image-1"`).
    pub model: String,
    /// The user's prompt, sent exactly as typed.
    pub prompt: String,
    /// Pixel dimensions (`"WIDTHxHEIGHT"`).
    pub size: String,
    /// Reference image URL for edits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Edit mask URL. Only present alongside `image`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

/// A provider response as received, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderReply {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl ProviderReply {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Boxed future type returned by [`ImageProvider::send`].
pub type SendFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ProviderReply, GenerationError>> + Send + 'a>>;

/// Sends generation requests to an external image API.
pub trait ImageProvider: Send + Sync {
    /// Send one request. Implementations must not retry.
    fn send(&self, body: &ProviderRequestBody) -> SendFuture<'_>;
}
