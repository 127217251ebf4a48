//! Log record structure

use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single log event flowing through the pipeline.
///
/// Records are plain values. Enrichment processors consume a record and
/// return a new one; nothing in the pipeline mutates a record another
/// holder can still observe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub channel: String,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub context: LogContext,
    pub extra: LogContext,
}

impl LogRecord {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(channel: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            level,
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            context: LogContext::new(),
            extra: LogContext::new(),
        }
    }

    pub fn with_context(mut self, context: LogContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_extra(mut self, extra: LogContext) -> Self {
        self.extra = extra;
        self
    }

    /// Return a copy of this record with its context replaced by
    /// `transform(context)`. The with-modified-copy building block the
    /// enrichment processors are written in terms of.
    pub fn map_context(mut self, transform: impl FnOnce(LogContext) -> LogContext) -> Self {
        let context = self.context;
        self.context = transform(context);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sanitization() {
        let record = LogRecord::new("app", LogLevel::Info, "line one\nline two\tend\r");
        assert_eq!(record.message, "line one\\nline two\\tend\\r");
    }

    #[test]
    fn test_with_context() {
        let context = LogContext::new().with_field("user_id", 42);
        let record = LogRecord::new("app", LogLevel::Info, "hello").with_context(context);

        assert_eq!(record.context.len(), 1);
        assert!(record.extra.is_empty());
    }

    #[test]
    fn test_map_context_preserves_other_fields() {
        let record = LogRecord::new("app", LogLevel::Warn, "hello")
            .with_context(LogContext::new().with_field("a", 1));

        let mapped = record
            .clone()
            .map_context(|ctx| ctx.with_field("b", 2));

        assert_eq!(mapped.channel, record.channel);
        assert_eq!(mapped.level, record.level);
        assert_eq!(mapped.message, record.message);
        assert_eq!(mapped.context.len(), 2);
        // The original record is untouched
        assert_eq!(record.context.len(), 1);
    }
}
