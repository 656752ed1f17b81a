//! Canned provider for unit tests.

use std::sync::{Arc, Mutex};

use crate::error::GenerationError;
use crate::ports::image_provider::{ImageProvider, ProviderReply, ProviderRequestBody, SendFuture};

/// Answers every call with the same reply and keeps the bodies it was sent.
pub(crate) struct StubProvider {
    reply: Result<ProviderReply, String>,
    sent: Arc<Mutex<Vec<ProviderRequestBody>>>,
}

impl StubProvider {
    /// Reply with `status` and `body` to every call.
    pub(crate) fn replying(status: u16, body: impl Into<String>) -> Self {
        Self { reply: Ok(ProviderReply { status, body: body.into() }), sent: Arc::default() }
    }

    /// Fail every call with a transport error.
    pub(crate) fn unreachable(message: &str) -> Self {
        Self { reply: Err(message.to_string()), sent: Arc::default() }
    }

    /// Shared handle to the bodies sent so far.
    pub(crate) fn sent(&self) -> Arc<Mutex<Vec<ProviderRequestBody>>> {
        Arc::clone(&self.sent)
    }
}

impl ImageProvider for StubProvider {
    fn send(&self, body: &ProviderRequestBody) -> SendFuture<'_> {
        self.sent.lock().unwrap().push(body.clone());
        let reply = self.reply.clone().map_err(GenerationError::Transport);
        Box::pin(async move { reply })
    }
}
