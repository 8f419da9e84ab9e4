//! The leveled JSON logger.

use std::borrow::Cow;
use std::fmt::{self, Arguments};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::logger::level::{InvalidLogLevel, Severity, LABEL_FATAL, LABEL_NOTICE};
use crate::logger::record::{self, Items};
use crate::sink::{Sink, StdoutSink};

/// Exit status used by the fatal family.
pub const FATAL_EXIT_CODE: i32 = 1;

/// Leveled logger writing one JSON line per call to its sink.
///
/// Cheap to share: wrap it in an `Arc` (or use the process-wide
/// [`default_logger`](crate::default_logger)) and call it from any thread.
///
/// # Example
///
/// ```
/// use rnlog::{Logger, MemorySink, Severity};
/// use serde_json::json;
///
/// let sink = MemorySink::new();
/// let logger = Logger::new(sink.clone());
/// logger.set_threshold(Severity::Info).unwrap();
///
/// logger.debug("dropped");
/// logger.info_item(&json!({"id": 42}), "loaded");
///
/// assert_eq!(sink.len(), 1);
/// assert!(sink.lines()[0].contains(r#""items":{"id":42}"#));
/// ```
pub struct Logger {
    threshold: AtomicU8,
    sink: Arc<dyn Sink>,
}

impl Logger {
    /// Create a logger over `sink` with the most permissive threshold (TRACE).
    pub fn new(sink: impl Sink + 'static) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Create a logger over an already shared sink.
    pub fn from_shared(sink: Arc<dyn Sink>) -> Self {
        Self {
            threshold: AtomicU8::new(Severity::Trace as u8),
            sink,
        }
    }

    /// Logger writing to standard output.
    pub fn stdout() -> Self {
        Self::new(StdoutSink)
    }

    /// Builder-style threshold for freshly constructed loggers.
    pub fn with_threshold(self, level: Severity) -> Self {
        self.threshold.store(level as u8, Ordering::Relaxed);
        self
    }

    /// Current minimum severity.
    pub fn threshold(&self) -> Severity {
        // only valid discriminants are ever stored
        Severity::from_u8(self.threshold.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Change the minimum severity.
    ///
    /// Accepts a [`Severity`], a raw `i32` rank or a level name. Raw ranks
    /// outside `[TRACE, ERROR]` and unknown names are rejected and leave the
    /// threshold untouched. The sink is never called.
    pub fn set_threshold<L>(&self, level: L) -> Result<(), InvalidLogLevel>
    where
        L: TryInto<Severity>,
        InvalidLogLevel: From<L::Error>,
    {
        let level: Severity = level.try_into()?;
        self.threshold.store(level as u8, Ordering::Relaxed);
        Ok(())
    }

    /// Whether a call at `level` would currently reach the sink.
    pub fn enabled(&self, level: Severity) -> bool {
        level >= self.threshold()
    }

    /// The sink every emitted line is handed to.
    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    // -- trace ---------------------------------------------------------------

    /// Emit `msg` at TRACE.
    pub fn trace(&self, msg: &str) {
        self.log(Severity::Trace, msg, None::<&Items>);
    }

    /// Emit a formatted message at TRACE; formatting is skipped when filtered.
    pub fn tracef(&self, args: Arguments<'_>) {
        self.logf(Severity::Trace, args, None::<&Items>);
    }

    /// Emit `msg` at TRACE with annotations.
    ///
    /// `items` may be anything that serializes to a JSON object.
    pub fn trace_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.log(Severity::Trace, msg, Some(items));
    }

    /// Emit a formatted message at TRACE with annotations.
    pub fn tracef_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logf(Severity::Trace, args, Some(items));
    }

    // -- debug ---------------------------------------------------------------

    pub fn debug(&self, msg: &str) {
        self.log(Severity::Debug, msg, None::<&Items>);
    }

    pub fn debugf(&self, args: Arguments<'_>) {
        self.logf(Severity::Debug, args, None::<&Items>);
    }

    pub fn debug_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.log(Severity::Debug, msg, Some(items));
    }

    pub fn debugf_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logf(Severity::Debug, args, Some(items));
    }

    // -- info ----------------------------------------------------------------

    pub fn info(&self, msg: &str) {
        self.log(Severity::Info, msg, None::<&Items>);
    }

    pub fn infof(&self, args: Arguments<'_>) {
        self.logf(Severity::Info, args, None::<&Items>);
    }

    pub fn info_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.log(Severity::Info, msg, Some(items));
    }

    pub fn infof_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logf(Severity::Info, args, Some(items));
    }

    // -- warn ----------------------------------------------------------------

    pub fn warn(&self, msg: &str) {
        self.log(Severity::Warn, msg, None::<&Items>);
    }

    pub fn warnf(&self, args: Arguments<'_>) {
        self.logf(Severity::Warn, args, None::<&Items>);
    }

    pub fn warn_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.log(Severity::Warn, msg, Some(items));
    }

    pub fn warnf_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logf(Severity::Warn, args, Some(items));
    }

    // -- error ---------------------------------------------------------------

    pub fn error(&self, msg: &str) {
        self.log(Severity::Error, msg, None::<&Items>);
    }

    pub fn errorf(&self, args: Arguments<'_>) {
        self.logf(Severity::Error, args, None::<&Items>);
    }

    pub fn error_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.log(Severity::Error, msg, Some(items));
    }

    pub fn errorf_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logf(Severity::Error, args, Some(items));
    }

    // -- notice (never filtered) ---------------------------------------------

    /// Emit `msg` with the NOTICE label regardless of threshold.
    pub fn notice(&self, msg: &str) {
        self.logging(LABEL_NOTICE, msg, None::<&Items>);
    }

    pub fn noticef(&self, args: Arguments<'_>) {
        self.logging(LABEL_NOTICE, &format_message(args), None::<&Items>);
    }

    pub fn notice_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) {
        self.logging(LABEL_NOTICE, msg, Some(items));
    }

    pub fn noticef_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) {
        self.logging(LABEL_NOTICE, &format_message(args), Some(items));
    }

    // -- fatal (never filtered, terminates) ----------------------------------

    /// Emit `msg` with the FATAL label, then exit the process with status 1.
    ///
    /// The sink has received (and been asked to flush) the line before the
    /// process exits. Destructors of live values do not run.
    pub fn fatal(&self, msg: &str) -> ! {
        self.logging(LABEL_FATAL, msg, None::<&Items>);
        self.terminate()
    }

    pub fn fatalf(&self, args: Arguments<'_>) -> ! {
        self.logging(LABEL_FATAL, &format_message(args), None::<&Items>);
        self.terminate()
    }

    pub fn fatal_item<I: Serialize + ?Sized>(&self, items: &I, msg: &str) -> ! {
        self.logging(LABEL_FATAL, msg, Some(items));
        self.terminate()
    }

    pub fn fatalf_item<I: Serialize + ?Sized>(&self, items: &I, args: Arguments<'_>) -> ! {
        self.logging(LABEL_FATAL, &format_message(args), Some(items));
        self.terminate()
    }

    // -- shared path ---------------------------------------------------------

    /// Build, encode and hand one record to the sink, bypassing the threshold.
    ///
    /// Every emission method ends here. If the record cannot be encoded the
    /// sink receives [`FALLBACK_LINE`](crate::FALLBACK_LINE) instead; the
    /// failure is never returned to the caller.
    pub fn logging<I: Serialize + ?Sized>(&self, level: &str, msg: &str, items: Option<&I>) {
        let line = record::render(level, msg, items);
        self.sink.write_line(&line);
    }

    fn log<I: Serialize + ?Sized>(&self, level: Severity, msg: &str, items: Option<&I>) {
        if !self.enabled(level) {
            return;
        }
        self.logging(level.label(), msg, items);
    }

    fn logf<I: Serialize + ?Sized>(&self, level: Severity, args: Arguments<'_>, items: Option<&I>) {
        if !self.enabled(level) {
            return;
        }
        self.logging(level.label(), &format_message(args), items);
    }

    fn terminate(&self) -> ! {
        self.sink.flush();
        std::process::exit(FATAL_EXIT_CODE)
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("threshold", &self.threshold())
            .finish_non_exhaustive()
    }
}

fn format_message(args: Arguments<'_>) -> Cow<'static, str> {
    match args.as_str() {
        Some(literal) => Cow::Borrowed(literal),
        None => Cow::Owned(args.to_string()),
    }
}
