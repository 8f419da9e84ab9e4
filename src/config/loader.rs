//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::{LoggerConfig, SinkKind};
use crate::config::validation::{validate_config, ValidationError};
use crate::logger::InvalidLogLevel;

/// Overrides `level`.
pub const ENV_LEVEL: &str = "RNLOG_LEVEL";
/// Overrides `sink.kind` (stdout, stderr, file, tracing).
pub const ENV_SINK: &str = "RNLOG_SINK";
/// Overrides `sink.path`.
pub const ENV_PATH: &str = "RNLOG_PATH";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid environment override {var}={value:?}")]
    Env { var: &'static str, value: String },

    #[error(transparent)]
    Level(InvalidLogLevel),

    #[error("file sink requires a path")]
    MissingPath,

    #[error("Failed to open sink: {0}")]
    Sink(std::io::Error),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file, with environment overrides.
pub fn load_config(path: &Path) -> Result<LoggerConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LoggerConfig = toml::from_str(&content)?;
    finish(config, |var| std::env::var(var).ok())
}

/// Defaults plus environment overrides, validated.
pub fn load_from_env() -> Result<LoggerConfig, ConfigError> {
    finish(LoggerConfig::default(), |var| std::env::var(var).ok())
}

/// Load the file when given, otherwise fall back to [`load_from_env`].
pub fn load(path: Option<&Path>) -> Result<LoggerConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => load_from_env(),
    }
}

fn finish<F>(config: LoggerConfig, lookup: F) -> Result<LoggerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = apply_overrides(config, lookup)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply `RNLOG_*` overrides fetched through `lookup`.
pub fn apply_overrides<F>(mut config: LoggerConfig, lookup: F) -> Result<LoggerConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(level) = lookup(ENV_LEVEL) {
        config.level = level;
    }

    if let Some(kind) = lookup(ENV_SINK) {
        config.sink.kind = match kind.trim().to_ascii_lowercase().as_str() {
            "stdout" => SinkKind::Stdout,
            "stderr" => SinkKind::Stderr,
            "file" => SinkKind::File,
            "tracing" => SinkKind::Tracing,
            _ => {
                return Err(ConfigError::Env {
                    var: ENV_SINK,
                    value: kind,
                })
            }
        };
    }

    if let Some(path) = lookup(ENV_PATH) {
        config.sink.path = Some(path);
    }

    Ok(config)
}
