//! Leveled, structured JSON logging.
//!
//! Each call produces exactly one JSON line
//! `{"time":"<RFC3339>","level":"<LABEL>","msg":"<message>","items":{...}}`
//! and hands it to a [`Sink`]. `items` is omitted when empty. Lines that
//! cannot be encoded are replaced by [`FALLBACK_LINE`].

pub mod config;
pub mod global;
pub mod logger;
pub mod sink;

pub use config::{ConfigError, LoggerConfig};
pub use global::*;
pub use logger::{
    validate_log_level, InvalidLogLevel, Items, LogRecord, Logger, Severity, FALLBACK_LINE,
};
pub use sink::{MemorySink, Sink, StderrSink, StdoutSink, TracingSink, WriterSink};
