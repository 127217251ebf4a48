//! Main logger implementation

use super::{
    error::Result, log_context::LogContext, log_record::LogRecord, log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::formatters::Formatter;
use crate::processors::Processor;
use crate::sinks::Sink;
use parking_lot::Mutex;
use std::sync::Arc;

/// The formatter/sink pair a logger writes through
struct Handler {
    formatter: Box<dyn Formatter>,
    sink: Box<dyn Sink>,
}

/// A named logger bound to one assembled pipeline.
///
/// Every logging call runs inline: level filter, enrichment processors
/// in registration order, formatter, sink. Sink I/O errors propagate to
/// the caller; silent log loss is worse than a visible failure.
///
/// The handler sits behind a mutex, so a logger shared across threads
/// serializes its writes; there is no internal queue or worker.
pub struct Logger {
    channel: String,
    min_level: LogLevel,
    processors: Vec<Box<dyn Processor>>,
    handler: Mutex<Handler>,
    metrics: Arc<LoggerMetrics>,
}

impl Logger {
    pub fn new(
        channel: impl Into<String>,
        min_level: LogLevel,
        processors: Vec<Box<dyn Processor>>,
        formatter: Box<dyn Formatter>,
        sink: Box<dyn Sink>,
    ) -> Self {
        Self {
            channel: channel.into(),
            min_level,
            processors,
            handler: Mutex::new(Handler { formatter, sink }),
            metrics: Arc::new(LoggerMetrics::new()),
        }
    }

    /// The channel name this logger was created under
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Minimum level a record must have to be written
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Names of the registered enrichment processors, in run order
    pub fn processor_names(&self) -> Vec<&str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Get the logger metrics for observability
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> Result<()> {
        self.log_with_context(level, message, LogContext::new())
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<()> {
        if level < self.min_level {
            self.metrics.record_filtered();
            return Ok(());
        }

        let record = LogRecord::new(&self.channel, level, message).with_context(context);
        self.dispatch(record)
    }

    fn dispatch(&self, record: LogRecord) -> Result<()> {
        let record = self
            .processors
            .iter()
            .fold(record, |record, processor| processor.process(record));

        let mut handler = self.handler.lock();
        let line = handler.formatter.format(&record)?;
        match handler.sink.write(record.level, &line) {
            Ok(()) => {
                self.metrics.record_emitted();
                Ok(())
            }
            Err(e) => {
                self.metrics.record_write_error();
                Err(e)
            }
        }
    }

    /// Force the sink chain (including any buffer) to write out
    pub fn flush(&self) -> Result<()> {
        self.handler.lock().sink.flush()
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Trace, message)
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Debug, message)
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Info, message)
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Warn, message)
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Error, message)
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) -> Result<()> {
        self.log(LogLevel::Fatal, message)
    }

    /// Helper for structured info logging
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) -> Result<()> {
        self.log_with_context(LogLevel::Info, message, context)
    }

    /// Helper for structured error logging
    pub fn error_with_context(
        &self,
        message: impl Into<String>,
        context: LogContext,
    ) -> Result<()> {
        self.log_with_context(LogLevel::Error, message, context)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Final flush of anything still buffered
        let _ = self.flush();
    }
}
