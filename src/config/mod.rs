//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or defaults
//!     → loader.rs (parse & deserialize, RNLOG_* env overrides)
//!     → validation.rs (semantic checks)
//!     → LoggerConfig::build() → Logger
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → Logger::set_threshold on the shared logger
//!     → accepted config published on the update channel
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Only the threshold is hot-reloaded; sinks are fixed per logger

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load, load_config, load_from_env, ConfigError};
pub use schema::{LoggerConfig, SinkConfig, SinkKind};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
