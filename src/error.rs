//! Error types for imagegen.

use thiserror::Error;

/// Category of a failed generation, used for status mapping and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request itself was unusable.
    InvalidInput,
    /// The deployment is missing something, such as the provider API key.
    Misconfigured,
    /// The provider answered with a non-success status.
    ProviderError,
    /// The provider answered 2xx but no image URL could be found.
    UnparsableResponse,
    /// The provider could not be reached.
    TransportError,
}

/// Errors that can occur while generating a single image.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The request was rejected before any provider call.
    #[error("{0}")]
    InvalidInput(String),

    /// No API key is configured for the provider.
    #[error("{provider} API key not set")]
    Misconfigured {
        /// The provider name.
        provider: String,
    },

    /// The provider returned a non-2xx response.
    #[error("{provider} error ({status})")]
    Provider {
        /// The provider name.
        provider: String,
        /// HTTP status returned by the provider.
        status: u16,
        /// Response body, parsed as JSON when possible, otherwise the raw text.
        details: serde_json::Value,
    },

    /// The provider succeeded but the body matched no known response shape.
    #[error("No image URL in response")]
    UnparsableResponse {
        /// The entire response body.
        raw: serde_json::Value,
    },

    /// A network error occurred reaching the provider.
    #[error("Failed to reach image provider: {0}")]
    Transport(String),
}

impl GenerationError {
    /// The category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_) => ErrorKind::InvalidInput,
            Self::Misconfigured { .. } => ErrorKind::Misconfigured,
            Self::Provider { .. } => ErrorKind::ProviderError,
            Self::UnparsableResponse { .. } => ErrorKind::UnparsableResponse,
            Self::Transport(_) => ErrorKind::TransportError,
        }
    }

    /// The provider's HTTP status, when the provider answered with an error.
    #[must_use]
    pub fn provider_status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic payload forwarded to the caller, if any.
    #[must_use]
    pub fn raw_details(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Provider { details, .. } => Some(details),
            Self::UnparsableResponse { raw } => Some(raw),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(error_chain(&e))
    }
}

/// Render an error followed by each of its causes, separated by `": "`.
#[must_use]
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Process-level errors: startup, configuration and I/O.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    /// A one-shot generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}
