//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the level name maps to a filterable severity
//! - Check file sinks name a usable path
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoggerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::{LoggerConfig, SinkKind};
use crate::logger::Severity;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown level {0:?} (expected trace, debug, info, warn or error)")]
    UnknownLevel(String),

    #[error("file sink requires sink.path")]
    MissingSinkPath,

    #[error("sink.path must not be empty")]
    EmptySinkPath,

    #[error("sink.path is only used by the file sink (kind = {0:?})")]
    UnusedSinkPath(SinkKind),
}

/// Check `config` and report every problem found.
pub fn validate_config(config: &LoggerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.level.parse::<Severity>().is_err() {
        errors.push(ValidationError::UnknownLevel(config.level.clone()));
    }

    match (config.sink.kind, config.sink.path.as_deref()) {
        (SinkKind::File, None) => errors.push(ValidationError::MissingSinkPath),
        (SinkKind::File, Some(path)) if path.trim().is_empty() => {
            errors.push(ValidationError::EmptySinkPath)
        }
        (SinkKind::File, Some(_)) => {}
        (kind, Some(_)) => errors.push(ValidationError::UnusedSinkPath(kind)),
        (_, None) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SinkConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&LoggerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = LoggerConfig {
            level: "notice".into(),
            sink: SinkConfig {
                kind: SinkKind::File,
                path: None,
                append: true,
            },
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownLevel("notice".into()),
                ValidationError::MissingSinkPath,
            ]
        );
    }

    #[test]
    fn test_empty_and_unused_paths() {
        let mut config = LoggerConfig::default();
        config.sink.kind = SinkKind::File;
        config.sink.path = Some("  ".into());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptySinkPath])
        );

        config.sink.kind = SinkKind::Stderr;
        config.sink.path = Some("/tmp/x".into());
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::UnusedSinkPath(SinkKind::Stderr)])
        );
    }

    #[test]
    fn test_level_names_case_insensitive() {
        let config = LoggerConfig {
            level: "WARN".into(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }
}
