use rask_logger::{ErrorKey, ErrorValue, Fields, Level, Logger, MemorySink, Payload};
use serde_json::Value;
use std::io;

#[derive(Debug, thiserror::Error)]
#[error("upstream timed out after {0}ms")]
struct TimeoutError(u64);

fn capture() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder("unit-tests")
        .level(Level::Debug)
        .env_level(None::<String>)
        .sink(sink.clone())
        .build()
        .unwrap();
    (logger, sink)
}

fn assert_serialized(value: &Value, name: &str, message: &str) {
    assert_eq!(value["name"], name);
    assert_eq!(value["message"], message);
    let stack = value["stack"].as_str().unwrap();
    assert!(
        stack.starts_with(&format!("{name}: {message}\n    at")),
        "stack: {stack}"
    );
    assert_eq!(value.as_object().unwrap().len(), 3);
}

#[test]
fn test_bare_error_payload() {
    let (logger, sink) = capture();
    let err = TimeoutError(500);

    logger.error_with("request failed", Payload::error(&err));

    let record = sink.last().unwrap().into_value();
    assert_serialized(&record["err"], "TimeoutError", "upstream timed out after 500ms");
    assert_eq!(record["msg"], "request failed");
}

#[test]
fn test_error_nested_under_err_key() {
    let (logger, sink) = capture();
    let err = io::Error::other("connection reset");

    logger.warn_with(
        "retrying",
        Fields::new()
            .with("attempt", 2)
            .with_error(ErrorKey::Err, &err),
    );

    let record = sink.last().unwrap().into_value();
    assert_serialized(&record["err"], "Error", "connection reset");
    assert_eq!(record["attempt"], 2);
}

#[test]
fn test_error_nested_under_error_key() {
    let (logger, sink) = capture();
    let err = TimeoutError(30);

    logger.info_with(
        "slow",
        Fields::new()
            .with("route", "/health")
            .with_error(ErrorKey::Error, &err),
    );

    let record = sink.last().unwrap().into_value();
    assert_serialized(&record["error"], "TimeoutError", "upstream timed out after 30ms");
    assert_eq!(record["route"], "/health");
    assert!(record.get("err").is_none());
}

#[test]
fn test_trait_object_error_with_explicit_name() {
    let (logger, sink) = capture();
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(TimeoutError(1));

    logger.fatal_with("boom", ErrorValue::named("TimeoutError", boxed.as_ref()));

    let record = sink.last().unwrap().into_value();
    assert_serialized(&record["err"], "TimeoutError", "upstream timed out after 1ms");
}

#[test]
fn test_boxed_trait_object_error_keeps_error_name() {
    let (logger, sink) = capture();
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(TimeoutError(250));

    logger.error_with("request failed", Payload::error(boxed.as_ref()));

    let record = sink.last().unwrap().into_value();
    assert_serialized(&record["err"], "Error", "upstream timed out after 250ms");
}

#[test]
fn test_stack_starts_at_caller() {
    let (logger, sink) = capture();

    logger.warn_with("retrying", Payload::error(&TimeoutError(5)));

    let record = sink.last().unwrap().into_value();
    let stack = record["err"]["stack"].as_str().unwrap();
    let first_frame = stack.lines().nth(1).unwrap();
    assert!(!first_frame.contains("rask_logger::domain::payload::"), "stack: {stack}");
    assert!(!first_frame.contains("std::backtrace"), "stack: {stack}");
}

#[test]
fn test_suppressed_call_writes_nothing() {
    let sink = MemorySink::new();
    let logger = Logger::builder("unit-tests")
        .level(Level::Silent)
        .sink(sink.clone())
        .build()
        .unwrap();

    logger.error_with("hidden", Payload::error(&io::Error::other("x")));
    assert!(sink.is_empty());
}
