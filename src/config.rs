//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `EVENTIFY_*` environment variable overrides.

use eventify_core::FeedConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Events backend the clients talk to
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Third-party auth API used for login and signup
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_url")]
    pub url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_auth_url() -> String {
    "https://fakestoreapi.com".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Dashboard feed sizes
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_page_size() -> usize {
    12
}

fn default_chunk_size() -> usize {
    3
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl DashboardConfig {
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            page_size: self.page_size,
            chunk_size: self.chunk_size,
        }
    }
}

/// Analysis table paging
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

fn default_per_page() -> usize {
    eventify_core::analysis::DEFAULT_PER_PAGE
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

/// Where the logged-in user is remembered
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("eventify").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./eventify_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Development backend server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_db_path")]
    pub db_path: String,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("eventify").join("db.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./eventify_db.json".to_string())
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            db_path: default_db_path(),
            cors_origins: vec![
                "http://localhost:8080".to_string(),
                "http://127.0.0.1:8080".to_string(),
            ],
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from an explicit path, or the default locations
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("eventify").join("config.toml")),
            Some(PathBuf::from("/etc/eventify/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Backend overrides
        if let Some(url) = lookup("EVENTIFY_BACKEND_URL") {
            self.backend.url = url;
        }
        if let Some(secs) = lookup("EVENTIFY_REQUEST_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.backend.request_timeout_secs = secs;
            self.auth.request_timeout_secs = secs;
        }

        // Auth overrides
        if let Some(url) = lookup("EVENTIFY_AUTH_URL") {
            self.auth.url = url;
        }

        // Session overrides
        if let Some(path) = lookup("EVENTIFY_SESSION_PATH") {
            self.session.path = path;
        }

        // Server overrides
        if let Some(host) = lookup("EVENTIFY_SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("EVENTIFY_SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(db_path) = lookup("EVENTIFY_DB_PATH") {
            self.server.db_path = db_path;
        }

        // Logging overrides
        if let Some(level) = lookup("EVENTIFY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("EVENTIFY_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Eventify Configuration
#
# Environment variables override these settings:
# - EVENTIFY_BACKEND_URL
# - EVENTIFY_REQUEST_TIMEOUT
# - EVENTIFY_AUTH_URL
# - EVENTIFY_SESSION_PATH
# - EVENTIFY_SERVER_HOST
# - EVENTIFY_SERVER_PORT
# - EVENTIFY_DB_PATH
# - EVENTIFY_LOG_LEVEL
# - EVENTIFY_LOG_FORMAT

[backend]
# Events backend URL
url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[auth]
# Auth API used for login and signup
url = "https://fakestoreapi.com"
request_timeout_secs = 30

[dashboard]
# Events shown before scrolling
page_size = 12

# Events added per "load more"
chunk_size = 3

[analysis]
# Rows per page of the analysis table
per_page = 4

[session]
# File remembering the logged-in user
path = "~/.local/share/eventify/session.json"

[server]
# Development backend host
host = "127.0.0.1"

# Development backend port
port = 5000

# JSON file holding the events
db_path = "~/.local/share/eventify/db.json"

# Allowed CORS origins
cors_origins = ["http://localhost:8080", "http://127.0.0.1:8080"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/eventify/eventify.log"
"#
    .to_string()
}
