//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::adapters::live::openai::OPENAI_API_URL;
use crate::model::DEFAULT_MODEL;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API key configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Image provider settings.
    #[serde(default)]
    pub provider: ProviderConfig,

    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
}

/// API key configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// `OpenAI` API key.
    pub openai: Option<String>,
}

/// Image provider settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model name or short alias.
    pub model: String,
    /// Endpoint receiving the generation request.
    pub endpoint: String,
    /// Upper bound on one provider call. Unset means no timeout.
    pub timeout_secs: Option<u64>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: OPENAI_API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ProviderConfig {
    /// The configured timeout, if any.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the `OpenAI` API key, preferring environment variable.
    ///
    /// Empty values count as unset.
    #[must_use]
    pub fn openai_key(&self) -> Option<String> {
        resolve_key(std::env::var("OPENAI_API_KEY").ok(), self.keys.openai.as_deref())
    }

    /// Get the server port, preferring the `PORT` environment variable.
    #[must_use]
    pub fn port(&self) -> u16 {
        std::env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(self.server.port)
    }
}

/// Pick the environment value over the file value; blank values count as unset.
fn resolve_key(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    from_env
        .filter(|k| !k.trim().is_empty())
        .or_else(|| from_file.map(str::to_string))
        .filter(|k| !k.trim().is_empty())
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `IMAGEGEN_CONFIG` environment variable
/// 3. `~/.config/imagegen/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("IMAGEGEN_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/imagegen/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/imagegen/config.toml")
    } else {
        PathBuf::from("imagegen.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.openai.is_none());
        assert_eq!(config.provider.model, "gpt-image-1");
        assert_eq!(config.provider.endpoint, "https://api.openai.com/v1/responses");
        assert!(config.provider.timeout().is_none());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.provider.model, "gpt-image-1");
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("imagegen_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
openai = "test-openai-key"

[provider]
model = "gpt-1"
endpoint = "http://localhost:9999/v1/responses"
timeout_secs = 90

[server]
host = "0.0.0.0"
port = 3000
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.openai.as_deref(), Some("test-openai-key"));
        assert_eq!(config.provider.model, "gpt-1");
        assert_eq!(config.provider.endpoint, "http://localhost:9999/v1/responses");
        assert_eq!(config.provider.timeout(), Some(Duration::from_secs(90)));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.provider.model, "gpt-image-1");
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("imagegen_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn key_from_file_when_env_unset() {
        assert_eq!(resolve_key(None, Some("from-file")).as_deref(), Some("from-file"));
    }

    #[test]
    fn env_key_wins_over_file() {
        assert_eq!(
            resolve_key(Some("from-env".into()), Some("from-file")).as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn blank_keys_count_as_unset() {
        assert_eq!(resolve_key(Some("  ".into()), Some("from-file")).as_deref(), Some("from-file"));
        assert!(resolve_key(None, Some("  ")).is_none());
        assert!(resolve_key(Some(String::new()), None).is_none());
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
