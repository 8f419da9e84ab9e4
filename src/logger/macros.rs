//! Format-string conveniences for the `*f` and `*f_item` methods.
//!
//! ```
//! use rnlog::{warnf, Logger, MemorySink};
//! use serde_json::json;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::new(sink.clone());
//!
//! warnf!(logger, "user {} failed", "bob");
//! warnf!(logger, items = &json!({"attempt": 3}); "user {} locked", "bob");
//!
//! assert_eq!(sink.len(), 2);
//! ```

#[macro_export]
macro_rules! tracef {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.tracef_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.tracef(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! debugf {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.debugf_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.debugf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! infof {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.infof_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.infof(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! warnf {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.warnf_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.warnf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! errorf {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.errorf_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.errorf(::core::format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! noticef {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.noticef_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.noticef(::core::format_args!($($arg)+))
    };
}

/// Emits at FATAL and exits the process.
#[macro_export]
macro_rules! fatalf {
    ($logger:expr, items = $items:expr; $($arg:tt)+) => {
        $logger.fatalf_item($items, ::core::format_args!($($arg)+))
    };
    ($logger:expr, $($arg:tt)+) => {
        $logger.fatalf(::core::format_args!($($arg)+))
    };
}
