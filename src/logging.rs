//! Logging setup
//!
//! Installs a `tracing` subscriber built from [`LoggingConfig`]. `RUST_LOG`
//! takes precedence over the configured level.

use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable, for development
    Pretty,
    /// One JSON object per line, for production
    Json,
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggingError::Format(s.to_string())),
        }
    }
}

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Unknown log format: {0}. Use pretty or json")]
    Format(String),

    #[error("Invalid log filter {filter:?}: {error}")]
    Filter { filter: String, error: String },

    #[error("Failed to open log file {path}: {error}")]
    File { path: String, error: String },

    #[error("Failed to install subscriber: {0}")]
    Init(String),
}

/// Build the level filter, preferring `RUST_LOG`
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| LoggingError::Filter {
        filter: level.to_string(),
        error: e.to_string(),
    })
}

fn open_log_file(path: &str) -> Result<std::fs::File, LoggingError> {
    let to_error = |e: std::io::Error| LoggingError::File {
        path: path.to_string(),
        error: e.to_string(),
    };

    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}

/// Install the global subscriber
///
/// Logs go to stderr unless a file is configured, so command output on
/// stdout stays clean.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let format: LogFormat = config.format.parse()?;
    let filter = build_filter(&config.level)?;

    let (writer, ansi) = match &config.file {
        Some(path) => (BoxMakeWriter::new(Arc::new(open_log_file(path)?)), false),
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(writer).with_ansi(ansi))
            .try_init(),
    };

    result.map_err(|e| LoggingError::Init(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("json".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!(matches!(
            "xml".parse::<LogFormat>(),
            Err(LoggingError::Format(_))
        ));
    }

    #[test]
    fn test_open_log_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("eventify.log");
        open_log_file(&path.to_string_lossy()).unwrap();
        assert!(path.exists());
    }
}
