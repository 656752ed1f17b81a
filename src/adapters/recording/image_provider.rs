//! Recording adapter for the `ImageProvider` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::{PROVIDER_PORT, SEND_METHOD};
use crate::ports::image_provider::{ImageProvider, ProviderRequestBody, SendFuture};

/// Records provider interactions while delegating to an inner implementation.
pub struct RecordingImageProvider {
    inner: Arc<dyn ImageProvider>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageProvider {
    /// Creates a new recording provider wrapping the given implementation.
    pub fn new(inner: Arc<dyn ImageProvider>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageProvider for RecordingImageProvider {
    fn send(&self, body: &ProviderRequestBody) -> SendFuture<'_> {
        let body = body.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.send(&body).await;
            record_result(&recorder, PROVIDER_PORT, SEND_METHOD, &body, &result);
            result
        })
    }
}
