//! In-memory sink.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::sink::Sink;

/// Collects lines in a shared buffer. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of every line received so far.
    pub fn lines(&self) -> Vec<String> {
        self.buffer().clone()
    }

    /// Most recent line, if any.
    pub fn last(&self) -> Option<String> {
        self.buffer().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.buffer().len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer().is_empty()
    }

    /// Drop every buffered line.
    pub fn clear(&self) {
        self.buffer().clear();
    }
}

impl Sink for MemorySink {
    fn write_line(&self, line: &str) {
        self.buffer().push(line.to_owned());
    }
}
