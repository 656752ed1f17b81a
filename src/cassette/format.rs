//! On-disk cassette format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session of port interactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name, usually `<timestamp>-<port>`.
    pub name: String,
    /// When the recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Interactions in recording order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording.
    pub seq: u64,
    /// Port name (e.g., `"image_provider"`).
    pub port: String,
    /// Method name (e.g., `"send"`).
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized result, as `{"Ok": ...}` or `{"Err": "..."}`.
    pub output: serde_json::Value,
}
