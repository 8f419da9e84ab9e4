//! Stream-backed sinks.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::sink::Sink;

/// Writes each line plus `\n` to standard output.
///
/// This is the sink of the process-wide default logger.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            tracing::warn!(error = %e, "Failed to write log line to stdout");
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

/// Writes each line plus `\n` to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &str) {
        let mut err = io::stderr().lock();
        if let Err(e) = writeln!(err, "{line}") {
            tracing::warn!(error = %e, "Failed to write log line to stderr");
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Sink over any writer; the mutex keeps lines from interleaving.
///
/// The writer is flushed after every line, so buffered writers never hold
/// back a record.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WriterSink<File> {
    /// Open `path` for logging, creating it if missing.
    ///
    /// With `append == false` an existing file is truncated. The file is
    /// unbuffered, so each line reaches the OS as soon as it is written.
    pub fn file(path: impl AsRef<Path>, append: bool) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        // one write_all per line so a shared fd never sees half a record
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        if let Err(e) = writer.write_all(buf.as_bytes()).and_then(|_| writer.flush()) {
            tracing::warn!(error = %e, "Failed to write log line");
        }
    }

    fn flush(&self) {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.flush() {
            tracing::warn!(error = %e, "Failed to flush log writer");
        }
    }
}
