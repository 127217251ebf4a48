//! Sink implementations
//!
//! A sink is the final destination a formatted log line is written to.
//! Exactly one sink is active per logger instance; the buffering
//! decorator wraps another sink rather than standing alone.

pub mod buffered;
pub mod stream;
pub mod system_log;

pub use buffered::{BufferedSink, OverflowPolicy};
pub use stream::StreamSink;
pub use system_log::SystemLogSink;

use crate::core::{LogLevel, Result};

/// Output destination for formatted log lines.
///
/// Sinks receive the record's level alongside the line: the buffering
/// decorator keys its flush trigger on it and the system log maps it to
/// a syslog severity.
pub trait Sink: Send {
    fn write(&mut self, level: LogLevel, line: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
