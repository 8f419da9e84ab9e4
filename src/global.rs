//! Process-wide default logger.
//!
//! The default instance is created lazily on first use, writes to stdout,
//! starts at TRACE and lives for the rest of the process. Its threshold is
//! independent of every other [`Logger`]. The free functions below delegate
//! one-to-one to the instance methods of [`default_logger`].
//!
//! ```
//! rnlog::set_threshold(rnlog::Severity::Info).unwrap();
//! rnlog::debug("not printed");
//! rnlog::infof(format_args!("listening on {}", 8080));
//! ```

use std::fmt::Arguments;
use std::sync::OnceLock;

use serde::Serialize;

use crate::logger::{InvalidLogLevel, Logger, Severity};

static DEFAULT_LOGGER: OnceLock<Logger> = OnceLock::new();

/// The shared stdout logger behind the package-level functions.
pub fn default_logger() -> &'static Logger {
    DEFAULT_LOGGER.get_or_init(Logger::stdout)
}

pub fn set_threshold<L>(level: L) -> Result<(), InvalidLogLevel>
where
    L: TryInto<Severity>,
    InvalidLogLevel: From<L::Error>,
{
    default_logger().set_threshold(level)
}

pub fn threshold() -> Severity {
    default_logger().threshold()
}

pub fn logging<I: Serialize + ?Sized>(level: &str, msg: &str, items: Option<&I>) {
    default_logger().logging(level, msg, items)
}

macro_rules! delegate {
    ($($plain:ident, $fmt:ident, $item:ident, $fmt_item:ident;)+) => {
        $(
            pub fn $plain(msg: &str) {
                default_logger().$plain(msg)
            }

            pub fn $fmt(args: Arguments<'_>) {
                default_logger().$fmt(args)
            }

            pub fn $item<I: Serialize + ?Sized>(items: &I, msg: &str) {
                default_logger().$item(items, msg)
            }

            pub fn $fmt_item<I: Serialize + ?Sized>(items: &I, args: Arguments<'_>) {
                default_logger().$fmt_item(items, args)
            }
        )+
    };
}

delegate! {
    trace, tracef, trace_item, tracef_item;
    debug, debugf, debug_item, debugf_item;
    info, infof, info_item, infof_item;
    warn, warnf, warn_item, warnf_item;
    error, errorf, error_item, errorf_item;
    notice, noticef, notice_item, noticef_item;
}

pub fn fatal(msg: &str) -> ! {
    default_logger().fatal(msg)
}

pub fn fatalf(args: Arguments<'_>) -> ! {
    default_logger().fatalf(args)
}

pub fn fatal_item<I: Serialize + ?Sized>(items: &I, msg: &str) -> ! {
    default_logger().fatal_item(items, msg)
}

pub fn fatalf_item<I: Serialize + ?Sized>(items: &I, args: Arguments<'_>) -> ! {
    default_logger().fatalf_item(items, args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_default_logger_is_a_singleton() {
        assert!(std::ptr::eq(default_logger(), default_logger()));
    }

    #[test]
    fn test_default_threshold_is_independent() {
        let sink = MemorySink::new();
        let other = Logger::new(sink.clone());

        set_threshold(Severity::Error).unwrap();
        assert_eq!(threshold(), Severity::Error);
        assert_eq!(other.threshold(), Severity::Trace);

        other.trace("still emitted");
        assert_eq!(sink.len(), 1);

        assert!(set_threshold(9i32).is_err());
        assert_eq!(threshold(), Severity::Error);
        set_threshold(Severity::Trace).unwrap();
    }
}
