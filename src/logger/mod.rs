//! Leveled JSON logging core.
//!
//! # Data Flow
//! ```text
//! caller
//!     → facade.rs  (threshold check; notice/fatal skip it)
//!     → record.rs  (normalize items, stamp RFC3339 time, encode one JSON line)
//!         └─ encode failure or non-finite float → FALLBACK_LINE
//!     → Sink::write_line
//!     → fatal only: flush sink, exit(1)
//! ```
//!
//! # Design Decisions
//! - Threshold lives in an atomic byte; readers never see a torn value
//! - Filtered calls do no work at all: no clock read, no formatting
//! - Encoding errors never reach the caller
//! - Level validation runs only when the threshold changes

pub mod facade;
mod finite;
mod macros;
pub mod level;
pub mod record;

pub use facade::{Logger, FATAL_EXIT_CODE};
pub use level::{validate_log_level, InvalidLogLevel, Severity, LABEL_FATAL, LABEL_NOTICE};
pub use record::{Items, LogRecord, FALLBACK_LINE};
