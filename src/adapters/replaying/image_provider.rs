//! Replaying adapter for the `ImageProvider` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::{PROVIDER_PORT, SEND_METHOD};
use crate::error::GenerationError;
use crate::ports::image_provider::{ImageProvider, ProviderReply, ProviderRequestBody, SendFuture};

/// Serves recorded provider replies from a cassette.
pub struct ReplayingImageProvider {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageProvider {
    /// Create a replaying provider backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageProvider for ReplayingImageProvider {
    fn send(&self, _body: &ProviderRequestBody) -> SendFuture<'_> {
        let output = next_output(&self.replayer, PROVIDER_PORT, SEND_METHOD);
        Box::pin(async move {
            let output = output.map_err(GenerationError::Transport)?;
            replay_result::<ProviderReply>(output)
                .map_err(|e| GenerationError::Transport(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn body() -> ProviderRequestBody {
        ProviderRequestBody {
            model: "gpt-image-1".into(),
            prompt: "a cat".into(),
            size: "1024x1024".into(),
            image: None,
            mask: None,
        }
    }

    #[tokio::test]
    async fn replays_then_reports_exhaustion() {
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions: vec![Interaction {
                seq: 0,
                port: PROVIDER_PORT.into(),
                method: SEND_METHOD.into(),
                input: json!({}),
                output: json!({"Ok": {"status": 403, "body": "denied"}}),
            }],
        };
        let provider =
            ReplayingImageProvider::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))));

        let reply = provider.send(&body()).await.unwrap();
        assert_eq!(reply, ProviderReply { status: 403, body: "denied".into() });

        let err = provider.send(&body()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(ref m) if m.contains("Cassette exhausted")));
    }
}
