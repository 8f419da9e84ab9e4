//! Output sinks.
//!
//! # Data Flow
//! ```text
//! Logger emission
//!     → record.rs (finished JSON line)
//!     → Sink::write_line (exactly one call per emitted record)
//!         → stream.rs  (stdout / stderr / any io::Write, one locked write per line)
//!         → memory.rs  (in-process buffer)
//!         → bridge.rs  (one tracing event per line)
//! ```
//!
//! # Design Decisions
//! - A sink only has to accept one finished line; framing (newlines) is its job
//! - Any `Fn(&str) + Send + Sync` closure is a sink
//! - Write failures stay inside the sink and are reported through `tracing`

mod bridge;
mod memory;
mod stream;

pub use bridge::TracingSink;
pub use memory::MemorySink;
pub use stream::{StderrSink, StdoutSink, WriterSink};

/// Destination for finished log lines.
pub trait Sink: Send + Sync {
    /// Consume one complete JSON line (without trailing newline).
    fn write_line(&self, line: &str);

    /// Push buffered output to its destination.
    fn flush(&self) {}
}

impl<F> Sink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn write_line(&self, line: &str) {
        self(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_closure_is_a_sink() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let sink = move |line: &str| {
            assert_eq!(line, "hello");
            counter.fetch_add(1, Ordering::SeqCst);
        };

        sink.write_line("hello");
        sink.flush();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_sinks_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<StdoutSink>();
        assert_send_sync::<StderrSink>();
        assert_send_sync::<MemorySink>();
        assert_send_sync::<TracingSink>();
        assert_send_sync::<WriterSink<Vec<u8>>>();
    }
}
