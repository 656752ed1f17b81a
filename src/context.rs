//! Service context that wires config and port adapters into a gateway.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::openai::{OpenAiProvider, PROVIDER_NAME};
use crate::adapters::recording::image_provider::RecordingImageProvider;
use crate::adapters::replaying::image_provider::ReplayingImageProvider;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::AppError;
use crate::gateway::GenerationGateway;
use crate::model::resolve_model;
use crate::ports::ImageProvider;

/// Bundles the generation gateway with whatever it was built from.
pub struct ServiceContext {
    /// The shared generation gateway.
    pub gateway: Arc<GenerationGateway>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = self.recorder.lock().map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        if recorder.is_empty() {
            tracing::warn!("No provider calls were recorded");
        } else {
            tracing::debug!("Writing {} recorded interactions", recorder.len());
        }
        recorder.save().map_err(|e| format!("Failed to write cassette: {e}"))
    }
}

impl ServiceContext {
    /// Create a context that calls the live provider.
    ///
    /// A missing API key is not an error here; the gateway reports it per
    /// request.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, AppError> {
        let provider = live_provider(config)?;
        Ok(Self { gateway: Arc::new(gateway(config, provider)) })
    }

    /// Create a recording context that wraps the live provider with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), AppError> {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = PathBuf::from(".imagegen/cassettes").join(&timestamp);

        let commit = get_commit_hash();
        let path = output_dir.join("image_provider.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-image_provider"),
            &commit,
        )));

        let provider = live_provider(config)?.map(|live| {
            Arc::new(RecordingImageProvider::new(live, Arc::clone(&recorder)))
                as Arc<dyn ImageProvider>
        });

        let ctx = Self { gateway: Arc::new(gateway(config, provider)) };
        let session = RecordingSession { recorder };

        Ok((ctx, session))
    }

    /// Create a replaying context from a cassette file. No API key is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(config: &Config, path: &Path) -> Result<Self, AppError> {
        let replayer = load_cassette(path)
            .map_err(|e| AppError::Config(format!("Failed to load cassette: {e}")))?;
        let provider: Arc<dyn ImageProvider> =
            Arc::new(ReplayingImageProvider::new(Arc::new(Mutex::new(replayer))));
        Ok(Self { gateway: Arc::new(gateway(config, Some(provider))) })
    }
}

fn live_provider(config: &Config) -> Result<Option<Arc<dyn ImageProvider>>, AppError> {
    let Some(key) = config.openai_key() else {
        tracing::warn!(
            "No {PROVIDER_NAME} API key. Set OPENAI_API_KEY or add [keys] openai to the config file."
        );
        return Ok(None);
    };
    let provider =
        OpenAiProvider::new(key, config.provider.endpoint.clone(), config.provider.timeout())?;
    Ok(Some(Arc::new(provider)))
}

fn gateway(config: &Config, provider: Option<Arc<dyn ImageProvider>>) -> GenerationGateway {
    GenerationGateway::new(resolve_model(&config.provider.model), PROVIDER_NAME, provider)
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
