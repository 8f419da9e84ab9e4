//! Bridge into the `tracing` ecosystem.

use crate::sink::Sink;

/// Forwards every finished line as one `tracing` INFO event (target `rnlog`).
///
/// Useful when the host application already runs a `tracing-subscriber`
/// pipeline and wants the JSON lines to travel through it. The line itself
/// carries the real severity label; the event level is fixed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl TracingSink {
    pub fn new() -> Self {
        Self
    }
}

impl Sink for TracingSink {
    fn write_line(&self, line: &str) {
        tracing::info!(target: "rnlog", "{}", line);
    }
}
