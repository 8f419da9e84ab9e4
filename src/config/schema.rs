//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files.

use serde::{Deserialize, Serialize};

use crate::config::loader::ConfigError;
use crate::logger::{Logger, Severity};
use crate::sink::{StderrSink, StdoutSink, TracingSink, WriterSink};

/// Root configuration for a logger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Minimum level (trace, debug, info, warn, error).
    ///
    /// Kept as a string so validation can report bad names with context.
    pub level: String,

    /// Output destination.
    pub sink: SinkConfig,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "trace".to_string(),
            sink: SinkConfig::default(),
        }
    }
}

/// Where finished lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Stdout,
    Stderr,
    File,
    Tracing,
}

/// Sink configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Sink type.
    pub kind: SinkKind,

    /// Target file, required when `kind = "file"`.
    pub path: Option<String>,

    /// Append to an existing file instead of truncating it.
    pub append: bool,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            kind: SinkKind::Stdout,
            path: None,
            append: true,
        }
    }
}

impl LoggerConfig {
    /// Parsed threshold. Call after validation.
    pub fn severity(&self) -> Result<Severity, ConfigError> {
        self.level.parse().map_err(ConfigError::Level)
    }

    /// Construct a logger with the configured sink and threshold.
    pub fn build(&self) -> Result<Logger, ConfigError> {
        let threshold = self.severity()?;
        let logger = match self.sink.kind {
            SinkKind::Stdout => Logger::new(StdoutSink),
            SinkKind::Stderr => Logger::new(StderrSink),
            SinkKind::Tracing => Logger::new(TracingSink),
            SinkKind::File => {
                let path = self
                    .sink
                    .path
                    .as_deref()
                    .ok_or(ConfigError::MissingPath)?;
                let sink = WriterSink::file(path, self.sink.append).map_err(ConfigError::Sink)?;
                Logger::new(sink)
            }
        };

        tracing::debug!(
            threshold = %threshold,
            sink = ?self.sink.kind,
            "Logger built from configuration"
        );
        Ok(logger.with_threshold(threshold))
    }
}
