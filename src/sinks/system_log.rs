//! System log sink implementation

use super::Sink;
use crate::core::{LogLevel, LoggerError, Result};
use syslog::{Facility, Formatter3164, LoggerBackend};

/// Sink forwarding formatted lines to the host system log.
///
/// The connection is established once at construction and held for the
/// lifetime of the sink. Syslog applies its own line prefix, so this
/// sink forwards lines as-is.
pub struct SystemLogSink {
    writer: syslog::Logger<LoggerBackend, Formatter3164>,
}

impl SystemLogSink {
    /// Connect to the local system log, tagging messages with `process`.
    pub fn new(process: &str) -> Result<Self> {
        let formatter = Formatter3164 {
            facility: Facility::LOG_USER,
            hostname: None,
            process: process.to_owned(),
            pid: std::process::id(),
        };
        let writer = syslog::unix(formatter)
            .map_err(|e| LoggerError::sink("system_log", e.to_string()))?;

        Ok(Self { writer })
    }
}

impl Sink for SystemLogSink {
    fn write(&mut self, level: LogLevel, line: &str) -> Result<()> {
        let result = match level {
            LogLevel::Trace | LogLevel::Debug => self.writer.debug(line),
            LogLevel::Info => self.writer.info(line),
            LogLevel::Warn => self.writer.warning(line),
            LogLevel::Error => self.writer.err(line),
            LogLevel::Fatal => self.writer.crit(line),
        };
        result.map_err(|e| LoggerError::sink("system_log", e.to_string()))
    }

    fn flush(&mut self) -> Result<()> {
        // The syslog connection is unbuffered on our side
        Ok(())
    }

    fn name(&self) -> &str {
        "system_log"
    }
}
