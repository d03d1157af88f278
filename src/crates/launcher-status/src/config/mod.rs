//! Status polling configuration.
//!
//! Configuration is resolved in layers, later layers win:
//! - built-in defaults
//! - an optional YAML/JSON file (format picked from the extension)
//! - `LAUNCHER_STATUS_*` environment variables
//!
//! # Example
//!
//! ```rust,ignore
//! use launcher_status::config::StatusConfig;
//!
//! let config = StatusConfig::load(Some("status.yaml".as_ref()))?;
//! println!("polling {} every {:?}", config.endpoint, config.poll_interval());
//! ```

mod env;

pub use env::{override_key, read_override, read_override_parsed};

use crate::error::{Result, StatusError};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Default status endpoint
pub const DEFAULT_ENDPOINT: &str = "https://status.mojang.com/check";

/// Default refresh interval: five minutes
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 300;

/// Default request timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 2500;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "LAUNCHER_STATUS_";

/// Configuration for the status client and poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusConfig {
    /// Status endpoint URL.
    pub endpoint: String,

    /// Seconds between scheduled fetches.
    pub poll_interval_secs: u64,

    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    /// User agent sent with each request.
    pub user_agent: Option<String>,
}

impl StatusConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: Some(default_user_agent()),
        }
    }

    /// Set the status endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the poll interval (whole seconds).
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_secs = interval.as_secs();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the user agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parsed endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(&self.endpoint).map_err(|e| {
            StatusError::Config(format!("Invalid endpoint '{}': {}", self.endpoint, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(StatusError::Config(format!(
                "Unsupported endpoint scheme '{}': {}",
                other, self.endpoint
            ))),
        }
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;

        if self.poll_interval_secs == 0 {
            return Err(StatusError::Config(
                "poll_interval_secs must be non-zero".to_string(),
            ));
        }
        if self.timeout_ms == 0 {
            return Err(StatusError::Config("timeout_ms must be non-zero".to_string()));
        }

        Ok(())
    }

    /// Load a configuration file. Fields missing from the file keep their
    /// defaults, and an empty file yields the defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        Self::parse(&content, format).map_err(|e| match e {
            StatusError::Config(msg) => {
                StatusError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration text in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::new());
        }

        let parsed: std::result::Result<Self, String> = match format {
            ConfigFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| StatusError::Config(format!("invalid {} status config: {}", format, e)))
    }

    /// Apply `<prefix>ENDPOINT`, `<prefix>POLL_INTERVAL_SECS`,
    /// `<prefix>TIMEOUT_MS` and `<prefix>USER_AGENT` when set.
    pub fn apply_env(mut self, prefix: &str) -> Result<Self> {
        if let Some(endpoint) = read_override(prefix, "endpoint")? {
            self.endpoint = endpoint;
        }
        if let Some(secs) = read_override_parsed(prefix, "poll_interval_secs")? {
            self.poll_interval_secs = secs;
        }
        if let Some(ms) = read_override_parsed(prefix, "timeout_ms")? {
            self.timeout_ms = ms;
        }
        if let Some(user_agent) = read_override(prefix, "user_agent")? {
            self.user_agent = Some(user_agent);
        }
        Ok(self)
    }

    /// Resolve defaults, the optional file, then `LAUNCHER_STATUS_*`, and validate.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading status configuration file");
                Self::from_file(path)?
            }
            None => Self::new(),
        };

        let config = base.apply_env(ENV_PREFIX)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn default_user_agent() -> String {
    format!("launcher-status/{}", env!("CARGO_PKG_VERSION"))
}

/// Status config file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// `.yaml`/`.yml` or `.json`, case-insensitive.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(StatusError::Config(format!(
                "{}: status config must be .yaml, .yml or .json",
                path.display()
            ))),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => write!(f, "YAML"),
            Self::Json => write!(f, "JSON"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StatusConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.poll_interval(), Duration::from_secs(300));
        assert_eq!(config.timeout(), Duration::from_millis(2500));
        assert!(config.user_agent.as_deref().unwrap().starts_with("launcher-status/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = StatusConfig::new()
            .with_endpoint("http://localhost:9000/status")
            .with_poll_interval(Duration::from_secs(60))
            .with_timeout(Duration::from_secs(1))
            .with_user_agent("test-agent");

        assert_eq!(config.endpoint, "http://localhost:9000/status");
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.timeout_ms, 1000);
        assert_eq!(config.user_agent.as_deref(), Some("test-agent"));
    }

    #[test]
    fn test_with_timeout_saturates() {
        let config = StatusConfig::new().with_timeout(Duration::MAX);
        assert_eq!(config.timeout_ms, u64::MAX);
    }

    // ------------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------------

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let config = StatusConfig::new().with_endpoint("not a url");
        assert!(matches!(config.validate(), Err(StatusError::Config(_))));

        let config = StatusConfig::new().with_endpoint("ftp://status.example.com/check");
        assert!(matches!(config.validate(), Err(StatusError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_interval() {
        let mut config = StatusConfig::new();
        config.poll_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = StatusConfig::new();
        config.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    // ------------------------------------------------------------------------
    // File loading
    // ------------------------------------------------------------------------

    #[test]
    fn test_load_yaml_partial_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.yaml");
        fs::write(&path, "endpoint: http://127.0.0.1:8080/summary.json\npoll_interval_secs: 120\n")
            .unwrap();

        let config = StatusConfig::from_file(&path).unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:8080/summary.json");
        assert_eq!(config.poll_interval_secs, 120);
        assert_eq!(config.timeout_ms, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_load_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.json");
        fs::write(&path, r#"{"timeout_ms": 750, "user_agent": "json-agent"}"#).unwrap();

        let config = StatusConfig::from_file(&path).unwrap();
        assert_eq!(config.timeout_ms, 750);
        assert_eq!(config.user_agent.as_deref(), Some("json-agent"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.toml");
        fs::write(&path, "endpoint = \"x\"").unwrap();

        let result = StatusConfig::from_file(&path);
        assert!(matches!(result, Err(StatusError::Config(_))));
    }

    #[test]
    fn test_load_empty_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("status.yml");
        fs::write(&path, "\n").unwrap();

        assert_eq!(StatusConfig::from_file(&path).unwrap(), StatusConfig::new());
    }

    #[test]
    fn test_config_format_from_path() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/STATUS.YML")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("status.json")).unwrap(), ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Path::new("status")).is_err());
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = StatusConfig::parse("{\"timeout_ms\": \"soon\"}", ConfigFormat::Json).unwrap_err();
        assert!(err.to_string().contains("invalid JSON status config"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = StatusConfig::from_file("/definitely/not/here/status.yaml");
        assert!(matches!(result, Err(StatusError::Io(_))));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        fs::write(&path, "poll_interval_secs: [not, a, number]").unwrap();

        assert!(StatusConfig::from_file(&path).is_err());
    }

    // ------------------------------------------------------------------------
    // Environment overrides
    // ------------------------------------------------------------------------

    #[test]
    fn test_apply_env_overrides() {
        std::env::set_var("LS_CFG_TEST_A_ENDPOINT", "http://env.example.com/check");
        std::env::set_var("LS_CFG_TEST_A_POLL_INTERVAL_SECS", "30");
        std::env::set_var("LS_CFG_TEST_A_TIMEOUT_MS", "900");

        let config = StatusConfig::new().apply_env("LS_CFG_TEST_A_").unwrap();
        assert_eq!(config.endpoint, "http://env.example.com/check");
        assert_eq!(config.poll_interval_secs, 30);
        assert_eq!(config.timeout_ms, 900);

        std::env::remove_var("LS_CFG_TEST_A_ENDPOINT");
        std::env::remove_var("LS_CFG_TEST_A_POLL_INTERVAL_SECS");
        std::env::remove_var("LS_CFG_TEST_A_TIMEOUT_MS");
    }

    #[test]
    fn test_apply_env_invalid_number() {
        std::env::set_var("LS_CFG_TEST_B_TIMEOUT_MS", "fast");
        let result = StatusConfig::new().apply_env("LS_CFG_TEST_B_");
        assert!(result.is_err());
        std::env::remove_var("LS_CFG_TEST_B_TIMEOUT_MS");
    }

    #[test]
    fn test_apply_env_nothing_set() {
        let config = StatusConfig::new().apply_env("LS_CFG_TEST_UNSET_").unwrap();
        assert_eq!(config, StatusConfig::new());
    }
}
