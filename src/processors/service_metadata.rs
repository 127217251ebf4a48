//! Service metadata injector

use super::Processor;
use crate::config::ServiceIdentity;
use crate::core::{FieldValue, LogRecord};

/// Attaches static service identity fields to every record's context.
///
/// The identity is captured by value when the pipeline is built. Only
/// fields that are present and non-empty in the captured identity are
/// written into the `service` sub-mapping; absent fields leave the
/// context untouched.
pub struct ServiceMetadata {
    identity: ServiceIdentity,
}

impl ServiceMetadata {
    pub fn new(identity: ServiceIdentity) -> Self {
        Self { identity }
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }
}

impl Processor for ServiceMetadata {
    fn process(&self, record: LogRecord) -> LogRecord {
        if self.identity.is_empty() {
            return record;
        }
        let identity = self.identity.clone();
        record.map_context(move |mut context| {
            let service = context.entry_map("service");
            let fields = [
                ("name", &identity.name),
                ("version", &identity.version),
                ("environment", &identity.environment),
                ("type", &identity.service_type),
            ];
            for (key, value) in fields {
                if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                    service.insert(key.to_string(), FieldValue::String(value.to_string()));
                }
            }
            context
        })
    }

    fn name(&self) -> &str {
        "service_metadata"
    }
}
