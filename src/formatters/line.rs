//! Line formatter with template-token substitution

use super::Formatter;
use crate::core::{DatePattern, LogRecord, Result};

/// Formats records by substituting `%token%` placeholders in a template.
///
/// Recognized tokens: `%datetime%`, `%channel%`, `%level_name%`,
/// `%message%`, `%context%`, `%extra%`. Unrecognized tokens pass through
/// literally. Context and extra render as space-joined `key=value`
/// pairs.
pub struct LineFormatter {
    template: String,
    datetime: DatePattern,
}

impl LineFormatter {
    pub fn new(template: impl Into<String>, datetime: DatePattern) -> Self {
        Self {
            template: template.into(),
            datetime,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Formatter for LineFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        // %message% is substituted last so tokens inside user-supplied
        // message text are never re-expanded
        let line = self
            .template
            .replace("%datetime%", &self.datetime.format(&record.timestamp))
            .replace("%channel%", &record.channel)
            .replace("%level_name%", record.level.to_str())
            .replace("%context%", &record.context.format_fields())
            .replace("%extra%", &record.extra.format_fields())
            .replace("%message%", &record.message);
        Ok(line)
    }

    fn name(&self) -> &str {
        "line"
    }
}
