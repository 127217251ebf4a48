//! Integration tests for the logging pipeline
//!
//! These tests verify:
//! - Driver selection and fallback behavior
//! - File path resolution
//! - End-to-end record flow through enrichment, formatting, and sinks
//! - Construction diagnostics
//! - Buffered write behavior at the logger level

use chrono::Utc;
use log_pipeline::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config(value: serde_json::Value) -> LoggingConfig {
    serde_json::from_value(value).expect("valid config")
}

#[test]
fn test_default_config_plan() {
    let plan = PipelinePlan::resolve("app", &LoggingConfig::default(), Path::new("/srv/app"))
        .expect("plan resolves");

    assert_eq!(plan.sink, SinkPlan::SystemLog);
    assert_eq!(plan.level, LogLevel::Error);
    assert!(plan.processors.is_empty());
    assert!(matches!(plan.formatter, FormatterPlan::Line { .. }));

    let buffering = plan.buffering.expect("non-ecs pipelines always buffer");
    assert_eq!(buffering.capacity, 0);
    assert_eq!(buffering.trigger_level, None);
}

#[test]
fn test_file_driver_path_matches_convention() {
    let cfg = config(json!({
        "driver": "file",
        "drivers": { "file": { "file_path": "logs/app", "file_format": "Y-m-d" } }
    }));

    let plan =
        PipelinePlan::resolve("app", &cfg, Path::new("/srv/app")).expect("plan resolves");

    let expected = Path::new("/srv/app")
        .join("logs/app")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    assert_eq!(plan.sink, SinkPlan::File(expected));
}

#[test]
fn test_ecs_stdout_pipeline_shape() {
    // The §-defaults scenario: stdout sink, ECS formatting, both
    // enrichment processors registered
    let cfg = config(json!({
        "level": "debug",
        "driver": "ecs",
        "drivers": {
            "ecs": {
                "output": "stdout",
                "tags": ["svcA"],
                "service": { "name": "orders" }
            }
        }
    }));

    let plan =
        PipelinePlan::resolve("orders", &cfg, Path::new("/srv/app")).expect("plan resolves");

    assert_eq!(plan.sink, SinkPlan::Stdout);
    assert_eq!(plan.sink.kind(), "stdout");
    assert_eq!(plan.level, LogLevel::Debug);
    assert_eq!(plan.processors.len(), 2);
    assert_eq!(plan.processors[0], ProcessorPlan::CollisionGuard);
    assert!(matches!(
        plan.processors[1],
        ProcessorPlan::ServiceMetadata(_)
    ));
    assert!(matches!(plan.formatter, FormatterPlan::Ecs { .. }));
    assert_eq!(plan.buffering, None);

    let logger = plan.open().expect("stdout pipeline opens");
    assert_eq!(
        logger.processor_names(),
        vec!["collision_guard", "service_metadata"]
    );
}

#[test]
fn test_empty_base_and_file_path_fail_fast() {
    let cfg = config(json!({
        "driver": "file",
        "drivers": { "file": { "file_path": "" } }
    }));

    let result = PipelinePlan::resolve("app", &cfg, Path::new(""));
    assert!(matches!(
        result,
        Err(LoggerError::InvalidConfiguration { .. })
    ));
}

#[test]
fn test_file_driver_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "level": "debug",
        "driver": "file",
        "drivers": { "file": { "file_path": "logs" } }
    }));

    let logger = log_pipeline::build("app", &cfg, dir.path()).expect("pipeline builds");
    logger.error("disk failing").expect("write succeeds");
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");

    // Construction diagnostic went through the chain first
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Logger created successfully"));
    assert!(lines[0].starts_with("[app] [DEBUG]"));
    assert!(lines[1].starts_with("[app] [ERROR] disk failing"));
}

#[test]
fn test_file_driver_diagnostic_filtered_at_default_level() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "driver": "file",
        "drivers": { "file": { "file_path": "logs" } }
    }));

    let logger = log_pipeline::build("app", &cfg, dir.path()).expect("pipeline builds");
    logger.error("boom").expect("write succeeds");
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");

    // Default level is error, so the debug diagnostic was filtered
    assert!(!content.contains("Logger created successfully"));
    assert!(content.contains("boom"));
    assert_eq!(logger.metrics().records_filtered(), 1);
}

#[test]
fn test_ecs_file_driver_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "level": "debug",
        "driver": "ecs",
        "drivers": {
            "ecs": {
                "output": "file",
                "file_path": "logs",
                "tags": ["svcA"],
                "service": { "name": "orders" }
            }
        }
    }));

    let logger = log_pipeline::build("orders", &cfg, dir.path()).expect("pipeline builds");
    logger
        .info_with_context(
            "user login",
            LogContext::new()
                .with_field("message", "caller supplied")
                .with_field("user", "alice"),
        )
        .expect("write succeeds");
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    // Construction diagnostic, through the assembled chain
    let init: serde_json::Value = serde_json::from_str(lines[0]).expect("valid JSON");
    assert_eq!(init["message"], "Logging pipeline initialized");
    assert_eq!(init["log.level"], "debug");
    assert_eq!(init["logger.name"], "orders");
    assert_eq!(init["logger.level"], "debug");
    assert_eq!(init["logger.output"], "file");
    assert_eq!(init["tags"], json!(["svcA"]));
    // The diagnostic is enriched like any other record
    assert_eq!(init["service"]["name"], "orders");

    // Application record: collision guard and service injection applied
    let record: serde_json::Value = serde_json::from_str(lines[1]).expect("valid JSON");
    assert_eq!(record["message"], "user login");
    assert_eq!(record["custom_message"], "caller supplied");
    assert!(record.get("message").unwrap() != &json!("caller supplied"));
    assert_eq!(record["user"], "alice");
    assert_eq!(record["service"]["name"], "orders");
    assert_eq!(record["log.logger"], "orders");
}

#[test]
fn test_dropping_logger_flushes_buffered_lines() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "driver": "file",
        "drivers": { "file": { "file_path": "logs" } }
    }));

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));

    {
        let logger = log_pipeline::build("app", &cfg, dir.path()).expect("pipeline builds");
        logger.error("held until shutdown").expect("write succeeds");

        // Unbounded buffer: nothing on disk before the flush
        let before = fs::read_to_string(&log_file).unwrap_or_default();
        assert!(!before.contains("held until shutdown"));
    }

    let content = fs::read_to_string(&log_file).expect("log file exists");
    assert!(content.contains("held until shutdown"));
}

#[test]
fn test_bounded_buffer_discards_overflow_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "driver": "file",
        "drivers": { "file": { "file_path": "logs", "max_buffered_lines": 3 } }
    }));

    let logger = log_pipeline::build("app", &cfg, dir.path()).expect("pipeline builds");
    for i in 0..5 {
        logger.error(format!("message {}", i)).expect("write succeeds");
    }
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");
    let lines: Vec<&str> = content.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("message 0"));
    assert!(lines[2].contains("message 2"));
}

#[test]
fn test_bounded_buffer_flushes_overflow_to_disk_end_to_end() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "driver": "file",
        "drivers": {
            "file": {
                "file_path": "logs",
                "max_buffered_lines": 3,
                "flush_overflow_to_disk": true
            }
        }
    }));

    let logger = log_pipeline::build("app", &cfg, dir.path()).expect("pipeline builds");
    for i in 0..5 {
        logger.error(format!("message {}", i)).expect("write succeeds");
    }
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");

    for i in 0..5 {
        assert!(content.contains(&format!("message {}", i)));
    }
}

#[test]
fn test_custom_line_format() {
    let dir = TempDir::new().expect("temp dir");
    let cfg = config(json!({
        "level": "info",
        "driver": "file",
        "drivers": {
            "file": {
                "file_path": "logs",
                "line_format": "%level_name%|%channel%|%message%"
            }
        }
    }));

    let logger = log_pipeline::build("billing", &cfg, dir.path()).expect("pipeline builds");
    logger.warn("low balance").expect("write succeeds");
    logger.flush().expect("flush succeeds");

    let log_file = dir
        .path()
        .join("logs")
        .join(format!("{}.log", Utc::now().format("%Y-%m-%d")));
    let content = fs::read_to_string(&log_file).expect("log file exists");
    assert!(content.contains("WARN|billing|low balance"));
}

#[test]
fn test_config_constructed_without_serde() {
    let cfg = LoggingConfig {
        level: Some("debug".to_string()),
        driver: Some("ecs".to_string()),
        drivers: Default::default(),
    };

    let plan =
        PipelinePlan::resolve("app", &cfg, Path::new("/srv/app")).expect("plan resolves");
    assert_eq!(plan.sink, SinkPlan::Stdout);
    assert_eq!(plan.level, LogLevel::Debug);
}
