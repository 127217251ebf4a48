//! Pipeline builder
//!
//! Maps a declarative configuration into a concrete handler chain:
//! which sink, which formatter, which enrichment processors, and
//! whether (and how) writes are buffered.
//!
//! Resolution is split in two. [`PipelinePlan::resolve`] is pure
//! decision logic producing a data description of the chain — no file
//! or syslog handle is touched, so every configuration branch is
//! testable in isolation. [`PipelinePlan::open`] then materializes the
//! plan: it opens the sink, assembles the [`Logger`], and announces the
//! construction with a debug record through the assembled chain.

use crate::config::{DriverKind, LoggingConfig, OutputTarget, ServiceIdentity, Settings};
use crate::core::{DatePattern, LogContext, LogLevel, Logger, LoggerError, Result};
use crate::formatters::{EcsFormatter, Formatter, LineFormatter};
use crate::processors::{CollisionGuard, Processor, ServiceMetadata};
use crate::sinks::{BufferedSink, OverflowPolicy, Sink, StreamSink, SystemLogSink};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Build a logger for `channel` from `config`, with file paths resolved
/// relative to `base_path`.
///
/// # Example
///
/// ```
/// use log_pipeline::LoggingConfig;
///
/// let config: LoggingConfig =
///     serde_json::from_str(r#"{"level":"debug","driver":"ecs"}"#).unwrap();
/// let logger = log_pipeline::build("app", &config, "storage").unwrap();
/// logger.info("pipeline is up").unwrap();
/// ```
pub fn build(channel: &str, config: &LoggingConfig, base_path: impl AsRef<Path>) -> Result<Logger> {
    PipelinePlan::resolve(channel, config, base_path.as_ref())?.open()
}

/// Sink selected by the plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkPlan {
    File(PathBuf),
    Stdout,
    Stderr,
    SystemLog,
}

impl SinkPlan {
    /// The output selector vocabulary: `file`, `stdout`, `stderr`, `php`
    pub fn kind(&self) -> &'static str {
        match self {
            SinkPlan::File(_) => "file",
            SinkPlan::Stdout => "stdout",
            SinkPlan::Stderr => "stderr",
            SinkPlan::SystemLog => "php",
        }
    }
}

/// Formatter selected by the plan
#[derive(Debug, Clone, PartialEq)]
pub enum FormatterPlan {
    Line {
        template: String,
        datetime: DatePattern,
    },
    Ecs {
        tags: BTreeSet<String>,
    },
}

/// Enrichment processor selected by the plan
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorPlan {
    CollisionGuard,
    ServiceMetadata(ServiceIdentity),
}

/// Buffering decorator parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferingPlan {
    /// Line capacity; 0 buffers without an upper bound
    pub capacity: usize,
    pub overflow: OverflowPolicy,
    /// Lines at or above this level flush the buffer immediately
    pub trigger_level: Option<LogLevel>,
}

/// The resolved handler chain for one logger instance.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelinePlan {
    pub channel: String,
    pub level: LogLevel,
    pub sink: SinkPlan,
    pub formatter: FormatterPlan,
    pub processors: Vec<ProcessorPlan>,
    pub buffering: Option<BufferingPlan>,
}

impl PipelinePlan {
    /// Resolve the handler chain for `channel` from `config`.
    ///
    /// Pure decision logic: the only failure is a file path that cannot
    /// be formed. Unrecognized driver and output names degrade to their
    /// documented fallbacks.
    pub fn resolve(channel: &str, config: &LoggingConfig, base_path: &Path) -> Result<Self> {
        let settings = Settings::resolve(config);
        let overflow = if settings.flush_overflow_to_disk {
            OverflowPolicy::FlushToSink
        } else {
            OverflowPolicy::Discard
        };

        match settings.driver {
            DriverKind::Ecs => {
                let sink = match settings.output {
                    OutputTarget::File => SinkPlan::File(resolve_log_file(
                        base_path,
                        &settings.file_path,
                        &settings.file_format,
                    )?),
                    OutputTarget::Stdout => SinkPlan::Stdout,
                    OutputTarget::Stderr => SinkPlan::Stderr,
                    OutputTarget::SystemLog => SinkPlan::SystemLog,
                };

                let mut processors = vec![ProcessorPlan::CollisionGuard];
                if !settings.service.is_empty() {
                    processors.push(ProcessorPlan::ServiceMetadata(settings.service.clone()));
                }

                // Buffering only applies when a line limit is configured
                let buffering = (settings.max_buffered_lines > 0).then(|| BufferingPlan {
                    capacity: settings.max_buffered_lines,
                    overflow,
                    trigger_level: Some(settings.level),
                });

                Ok(Self {
                    channel: channel.to_string(),
                    level: settings.level,
                    sink,
                    formatter: FormatterPlan::Ecs {
                        tags: settings.tags.clone(),
                    },
                    processors,
                    buffering,
                })
            }
            DriverKind::File | DriverKind::Php => {
                let sink = match settings.driver {
                    DriverKind::File => SinkPlan::File(resolve_log_file(
                        base_path,
                        &settings.file_path,
                        &settings.file_format,
                    )?),
                    // Unknown drivers behave like the default one
                    _ => SinkPlan::SystemLog,
                };

                // This branch always buffers, even at capacity 0
                // (unbounded, flushed explicitly or at drop); kept for
                // backward compatibility with existing configurations
                let buffering = Some(BufferingPlan {
                    capacity: settings.max_buffered_lines,
                    overflow,
                    trigger_level: None,
                });

                Ok(Self {
                    channel: channel.to_string(),
                    level: settings.level,
                    sink,
                    formatter: FormatterPlan::Line {
                        template: settings.line_format.clone(),
                        datetime: settings.line_datetime.clone(),
                    },
                    processors: Vec::new(),
                    buffering,
                })
            }
        }
    }

    /// Materialize the plan: open the sink, assemble the logger, and
    /// emit the construction diagnostic through the assembled chain.
    pub fn open(self) -> Result<Logger> {
        let PipelinePlan {
            channel,
            level,
            sink,
            formatter,
            processors,
            buffering,
        } = self;

        let output_kind = sink.kind();

        let raw: Box<dyn Sink> = match &sink {
            SinkPlan::File(path) => Box::new(StreamSink::file(path)?),
            SinkPlan::Stdout => Box::new(StreamSink::stdout()),
            SinkPlan::Stderr => Box::new(StreamSink::stderr()),
            SinkPlan::SystemLog => Box::new(SystemLogSink::new(&channel)?),
        };

        let sink: Box<dyn Sink> = match buffering {
            Some(plan) => {
                let mut buffered = BufferedSink::new(raw, plan.capacity, plan.overflow);
                if let Some(trigger) = plan.trigger_level {
                    buffered = buffered.with_trigger_level(trigger);
                }
                Box::new(buffered)
            }
            None => raw,
        };

        let announce_ecs = matches!(formatter, FormatterPlan::Ecs { .. });
        let formatter: Box<dyn Formatter> = match formatter {
            FormatterPlan::Line { template, datetime } => {
                Box::new(LineFormatter::new(template, datetime))
            }
            FormatterPlan::Ecs { tags } => Box::new(EcsFormatter::new(tags)),
        };

        let processors: Vec<Box<dyn Processor>> = processors
            .into_iter()
            .map(|plan| match plan {
                ProcessorPlan::CollisionGuard => Box::new(CollisionGuard) as Box<dyn Processor>,
                ProcessorPlan::ServiceMetadata(identity) => {
                    Box::new(ServiceMetadata::new(identity)) as Box<dyn Processor>
                }
            })
            .collect();

        let logger = Logger::new(channel, level, processors, formatter, sink);

        // The construction diagnostic goes through the fully assembled
        // chain, not around it
        if announce_ecs {
            let context = LogContext::new()
                .with_field("logger.name", logger.channel())
                .with_field("logger.level", level.to_str().to_ascii_lowercase())
                .with_field("logger.output", output_kind);
            logger.log_with_context(LogLevel::Debug, "Logging pipeline initialized", context)?;
        } else {
            logger.debug("Logger created successfully")?;
        }

        Ok(logger)
    }
}

/// Compute `<base_path>/<file_path>/<formatted date>.log`.
fn resolve_log_file(base_path: &Path, file_path: &str, pattern: &DatePattern) -> Result<PathBuf> {
    let dir = base_path.join(file_path);
    if dir.as_os_str().is_empty() {
        return Err(LoggerError::config(
            "pipeline",
            format!(
                "log directory resolves to an empty path (base '{}', file_path '{}')",
                base_path.display(),
                file_path
            ),
        ));
    }
    Ok(dir.join(format!("{}.log", pattern.format_now())))
}
