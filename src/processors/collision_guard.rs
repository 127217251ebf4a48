//! Reserved-field collision guard

use super::Processor;
use crate::core::LogRecord;

/// Context key reserved for the record's own message
pub const RESERVED_MESSAGE_KEY: &str = "message";

/// Key a caller-supplied `message` context field is moved to
pub const RENAMED_MESSAGE_KEY: &str = "custom_message";

/// Moves a caller-supplied `message` context field to `custom_message`.
///
/// The formatter renders the record's own message under that name; a
/// user-supplied context value with the same key would clobber it or
/// render ambiguously.
pub struct CollisionGuard;

impl Processor for CollisionGuard {
    fn process(&self, record: LogRecord) -> LogRecord {
        if !record.context.contains_key(RESERVED_MESSAGE_KEY) {
            return record;
        }
        record.map_context(|mut context| {
            if let Some(value) = context.remove(RESERVED_MESSAGE_KEY) {
                context.add_field(RENAMED_MESSAGE_KEY, value);
            }
            context
        })
    }

    fn name(&self) -> &str {
        "collision_guard"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FieldValue, LogContext, LogLevel};

    fn record_with_context(context: LogContext) -> LogRecord {
        LogRecord::new("app", LogLevel::Info, "actual message").with_context(context)
    }

    #[test]
    fn test_moves_message_to_custom_message() {
        let record = record_with_context(LogContext::new().with_field("message", "x"));

        let guarded = CollisionGuard.process(record);

        assert!(!guarded.context.contains_key("message"));
        assert_eq!(
            guarded.context.get("custom_message"),
            Some(&FieldValue::String("x".to_string()))
        );
    }

    #[test]
    fn test_overwrites_prior_custom_message() {
        let record = record_with_context(
            LogContext::new()
                .with_field("message", "new")
                .with_field("custom_message", "old"),
        );

        let guarded = CollisionGuard.process(record);

        assert_eq!(
            guarded.context.get("custom_message"),
            Some(&FieldValue::String("new".to_string()))
        );
    }

    #[test]
    fn test_no_message_key_leaves_context_identical() {
        let context = LogContext::new()
            .with_field("user", "alice")
            .with_field("attempt", 3);
        let record = record_with_context(context.clone());

        let guarded = CollisionGuard.process(record);

        assert_eq!(guarded.context, context);
    }

    #[test]
    fn test_record_message_untouched() {
        let record = record_with_context(LogContext::new().with_field("message", "x"));

        let guarded = CollisionGuard.process(record);

        assert_eq!(guarded.message, "actual message");
    }
}
