//! Shared utilities for integration tests.

use rnlog::{Logger, MemorySink};
use serde_json::Value;

/// Logger writing into a fresh in-memory sink.
#[allow(dead_code)]
pub fn memory_logger() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    (Logger::new(sink.clone()), sink)
}

/// Parse every captured line, failing the test on invalid JSON.
#[allow(dead_code)]
pub fn parsed_lines(sink: &MemorySink) -> Vec<Value> {
    sink.lines()
        .iter()
        .map(|line| {
            serde_json::from_str(line).unwrap_or_else(|e| panic!("invalid JSON line {line:?}: {e}"))
        })
        .collect()
}

/// Parse each line of captured stdout.
#[allow(dead_code)]
pub fn parse_stdout(stdout: &[u8]) -> Vec<Value> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}
