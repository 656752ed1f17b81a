//! Record/replay infrastructure for deterministic testing.

pub mod config;
pub mod format;
pub mod recorder;
pub mod replayer;

/// Port name under which provider calls are recorded.
pub const PROVIDER_PORT: &str = "image_provider";

/// Method name under which provider calls are recorded.
pub const SEND_METHOD: &str = "send";
