//! Severity levels and threshold validation.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used by the unconditional notice family.
pub const LABEL_NOTICE: &str = "NOTICE";

/// Label used by the unconditional fatal family.
pub const LABEL_FATAL: &str = "FATAL";

/// Filterable severity, ordered from most to least verbose.
///
/// NOTICE and FATAL are deliberately absent: they bypass filtering and only
/// exist as labels ([`LABEL_NOTICE`], [`LABEL_FATAL`]).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Verbose tracing output.
    #[default]
    Trace = 0,
    /// Debugging information.
    Debug = 1,
    /// General information.
    Info = 2,
    /// Something unexpected but recoverable.
    Warn = 3,
    /// Failures.
    Error = 4,
}

impl Severity {
    /// Every filterable level in ascending order.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// The exact string written to the `level` field.
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    /// Integer rank used for threshold comparison.
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    pub(crate) const fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Severity::Trace),
            1 => Some(Severity::Debug),
            2 => Some(Severity::Info),
            3 => Some(Severity::Warn),
            4 => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a threshold outside `[TRACE, ERROR]` is requested.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid log level: {value}")]
pub struct InvalidLogLevel {
    /// The rejected input, as given.
    pub value: String,
}

impl InvalidLogLevel {
    fn new(value: impl fmt::Display) -> Self {
        Self {
            value: value.to_string(),
        }
    }
}

// Lets `Severity` itself flow through the same `TryInto` bound as raw input.
impl From<Infallible> for InvalidLogLevel {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Check that `level` lies in the inclusive range `[TRACE, ERROR]`.
///
/// Only threshold configuration calls this; emission paths carry their own
/// fixed level and never re-validate.
pub fn validate_log_level(level: i32) -> Result<(), InvalidLogLevel> {
    if level < Severity::Trace.as_i32() || level > Severity::Error.as_i32() {
        return Err(InvalidLogLevel::new(level));
    }
    Ok(())
}

impl TryFrom<i32> for Severity {
    type Error = InvalidLogLevel;

    fn try_from(level: i32) -> Result<Self, InvalidLogLevel> {
        validate_log_level(level)?;
        u8::try_from(level)
            .ok()
            .and_then(Severity::from_u8)
            .ok_or_else(|| InvalidLogLevel::new(level))
    }
}

impl FromStr for Severity {
    type Err = InvalidLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(InvalidLogLevel::new(s)),
        }
    }
}

impl TryFrom<&str> for Severity {
    type Error = InvalidLogLevel;

    fn try_from(s: &str) -> Result<Self, InvalidLogLevel> {
        s.parse()
    }
}
