//! Formatter implementations
//!
//! A formatter serializes a log record into the single line its sink
//! will write. Each pipeline carries exactly one formatter, attached to
//! the sink by the builder.

pub mod ecs;
pub mod line;

pub use ecs::EcsFormatter;
pub use line::LineFormatter;

use crate::core::{LogRecord, Result};

pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;
    fn name(&self) -> &str;
}
