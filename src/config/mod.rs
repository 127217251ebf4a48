//! Logging configuration: raw shape and resolution
//!
//! Configuration arrives as an already-parsed nested mapping
//! ([`LoggingConfig`], any serde format). [`Settings::resolve`] turns it
//! into a fully-defaulted, strongly-typed [`Settings`] value before any
//! pipeline decision runs, so defaults live in one place.

use crate::core::{DatePattern, LogLevel};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_DRIVER: &str = "php";
pub const DEFAULT_OUTPUT: &str = "stdout";
pub const DEFAULT_FILE_PATH: &str = "storage/log";
pub const DEFAULT_FILE_FORMAT: &str = "Y-m-d";
pub const DEFAULT_LINE_FORMAT: &str = "[%channel%] [%level_name%] %message% %context% %extra%";
pub const DEFAULT_LINE_DATETIME: &str = "Y-m-d H:i:s";

/// Top-level logging configuration as supplied by the caller.
///
/// Every key is optional; missing keys fall back to documented defaults
/// during resolution and never produce an error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub driver: Option<String>,
    pub drivers: BTreeMap<String, DriverConfig>,
}

/// Options for a single named driver.
///
/// `max_buffered_lines` and `flush_overflow_to_disk` apply to any
/// driver; the rest are read only by the drivers that understand them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub max_buffered_lines: Option<u64>,
    pub flush_overflow_to_disk: Option<bool>,
    pub file_path: Option<String>,
    pub file_format: Option<String>,
    pub line_format: Option<String>,
    pub line_datetime: Option<String>,
    pub output: Option<String>,
    pub tags: Option<BTreeSet<String>>,
    pub service: Option<ServiceIdentity>,
}

/// Static service identity attached to every record by the
/// service-metadata processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceIdentity {
    pub name: Option<String>,
    pub version: Option<String>,
    pub environment: Option<String>,
    #[serde(rename = "type")]
    pub service_type: Option<String>,
}

impl ServiceIdentity {
    fn field_set(value: &Option<String>) -> bool {
        value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// True when no field is present and non-empty
    pub fn is_empty(&self) -> bool {
        !(Self::field_set(&self.name)
            || Self::field_set(&self.version)
            || Self::field_set(&self.environment)
            || Self::field_set(&self.service_type))
    }
}

/// Driver kind after name resolution.
///
/// Unknown driver names resolve to `Php`: an unrecognized driver behaves
/// exactly like the default one instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    Php,
    File,
    Ecs,
}

impl DriverKind {
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("ecs") {
            DriverKind::Ecs
        } else if name.eq_ignore_ascii_case("file") {
            DriverKind::File
        } else {
            DriverKind::Php
        }
    }
}

/// Output target for the ecs driver.
///
/// Unknown selector values resolve to `Stdout`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    File,
    Stdout,
    Stderr,
    SystemLog,
}

impl OutputTarget {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "file" => OutputTarget::File,
            "stdout" => OutputTarget::Stdout,
            "stderr" => OutputTarget::Stderr,
            "php" => OutputTarget::SystemLog,
            _ => OutputTarget::Stdout,
        }
    }
}

/// Fully-defaulted settings, the input to pipeline resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub level: LogLevel,
    pub driver: DriverKind,
    pub max_buffered_lines: usize,
    pub flush_overflow_to_disk: bool,
    pub file_path: String,
    pub file_format: DatePattern,
    pub line_format: String,
    pub line_datetime: DatePattern,
    pub output: OutputTarget,
    pub tags: BTreeSet<String>,
    pub service: ServiceIdentity,
}

impl Settings {
    /// Resolve a raw configuration into concrete settings.
    ///
    /// The selected driver's sub-config is looked up case-insensitively;
    /// unparseable or unknown values fall back to their defaults.
    pub fn resolve(config: &LoggingConfig) -> Self {
        let driver_name = config.driver.as_deref().unwrap_or(DEFAULT_DRIVER);
        let driver = DriverKind::from_name(driver_name);
        let sub = driver_config(config, driver_name).cloned().unwrap_or_default();

        let level = config
            .level
            .as_deref()
            .and_then(|value| value.parse().ok())
            .unwrap_or_default();

        Self {
            level,
            driver,
            max_buffered_lines: sub.max_buffered_lines.unwrap_or(0) as usize,
            flush_overflow_to_disk: sub.flush_overflow_to_disk.unwrap_or(false),
            file_path: sub
                .file_path
                .unwrap_or_else(|| DEFAULT_FILE_PATH.to_string()),
            file_format: DatePattern::new(
                sub.file_format
                    .unwrap_or_else(|| DEFAULT_FILE_FORMAT.to_string()),
            ),
            line_format: sub
                .line_format
                .unwrap_or_else(|| DEFAULT_LINE_FORMAT.to_string()),
            line_datetime: DatePattern::new(
                sub.line_datetime
                    .unwrap_or_else(|| DEFAULT_LINE_DATETIME.to_string()),
            ),
            output: OutputTarget::from_name(sub.output.as_deref().unwrap_or(DEFAULT_OUTPUT)),
            tags: sub.tags.unwrap_or_default(),
            service: sub.service.unwrap_or_default(),
        }
    }
}

fn driver_config<'a>(config: &'a LoggingConfig, name: &str) -> Option<&'a DriverConfig> {
    config.drivers.get(name).or_else(|| {
        config
            .drivers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}
