//! Elastic Common Schema formatter

use super::Formatter;
use crate::core::{LogRecord, Result};
use serde_json::Value;
use std::collections::BTreeSet;

/// Schema line emitted in every document
const ECS_VERSION: &str = "1.6.0";

/// Timestamp format: ISO 8601 with milliseconds
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Formats records as one ECS-shaped JSON object per line.
///
/// The static tag set is captured at construction and attached to every
/// document. Context and extra fields merge into the document top-level;
/// nested sub-mappings (such as `service`) become JSON objects.
pub struct EcsFormatter {
    tags: BTreeSet<String>,
}

impl EcsFormatter {
    pub fn new(tags: BTreeSet<String>) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }
}

impl Formatter for EcsFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut doc = serde_json::Map::new();

        doc.insert(
            "@timestamp".to_string(),
            Value::String(record.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        );
        doc.insert(
            "ecs.version".to_string(),
            Value::String(ECS_VERSION.to_string()),
        );
        doc.insert(
            "log.level".to_string(),
            Value::String(record.level.to_str().to_ascii_lowercase()),
        );
        doc.insert(
            "log.logger".to_string(),
            Value::String(record.channel.clone()),
        );
        doc.insert("message".to_string(), Value::String(record.message.clone()));

        if !self.tags.is_empty() {
            doc.insert(
                "tags".to_string(),
                Value::Array(
                    self.tags
                        .iter()
                        .map(|tag| Value::String(tag.clone()))
                        .collect(),
                ),
            );
        }

        for (key, value) in record.context.fields() {
            doc.insert(key.clone(), value.to_json_value());
        }
        for (key, value) in record.extra.fields() {
            doc.insert(key.clone(), value.to_json_value());
        }

        Ok(serde_json::to_string(&Value::Object(doc))?)
    }

    fn name(&self) -> &str {
        "ecs"
    }
}
