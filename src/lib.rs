//! # Log Pipeline
//!
//! A configuration-driven logging pipeline: a named logger plus a
//! declarative configuration block become an assembled chain of
//! {sink, formatter, enrichment processors, buffering policy} exposing
//! the usual leveled-logging interface.
//!
//! ## Features
//!
//! - **Declarative drivers**: file, system log, and ECS (Elastic Common
//!   Schema) output selected purely by configuration
//! - **Context enrichment**: reserved-field collision guarding and
//!   static service metadata injection
//! - **Buffered writes**: capacity-bounded buffering with a configurable
//!   overflow policy
//! - **Permissive by default**: unknown drivers, outputs, and levels
//!   degrade to documented fallbacks instead of erroring
//!
//! ## Example
//!
//! ```
//! use log_pipeline::LoggingConfig;
//!
//! let config: LoggingConfig = serde_json::from_str(
//!     r#"{
//!         "level": "debug",
//!         "driver": "ecs",
//!         "drivers": { "ecs": { "output": "stdout", "tags": ["web"] } }
//!     }"#,
//! )
//! .unwrap();
//!
//! let logger = log_pipeline::build("app", &config, "storage").unwrap();
//! logger.info("Request processed").unwrap();
//! ```

pub mod config;
pub mod core;
pub mod formatters;
pub mod macros;
pub mod pipeline;
pub mod processors;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{
        DriverConfig, DriverKind, LoggingConfig, OutputTarget, ServiceIdentity, Settings,
    };
    pub use crate::core::{
        DatePattern, FieldValue, LogContext, LogLevel, LogRecord, Logger, LoggerError,
        LoggerMetrics, Result,
    };
    pub use crate::formatters::{EcsFormatter, Formatter, LineFormatter};
    pub use crate::pipeline::{
        build, BufferingPlan, FormatterPlan, PipelinePlan, ProcessorPlan, SinkPlan,
    };
    pub use crate::processors::{CollisionGuard, Processor, ServiceMetadata};
    pub use crate::sinks::{BufferedSink, OverflowPolicy, Sink, StreamSink, SystemLogSink};
}

pub use crate::config::{
    DriverConfig, DriverKind, LoggingConfig, OutputTarget, ServiceIdentity, Settings,
};
pub use crate::core::{
    DatePattern, FieldValue, LogContext, LogLevel, LogRecord, Logger, LoggerError, LoggerMetrics,
    Result,
};
pub use crate::formatters::{EcsFormatter, Formatter, LineFormatter};
pub use crate::pipeline::{build, BufferingPlan, FormatterPlan, PipelinePlan, ProcessorPlan, SinkPlan};
pub use crate::processors::{CollisionGuard, Processor, ServiceMetadata};
pub use crate::sinks::{BufferedSink, OverflowPolicy, Sink, StreamSink, SystemLogSink};
