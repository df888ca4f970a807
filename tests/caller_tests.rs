//! 调用方追踪测试
//!
//! 放在独立的测试 crate 中，保证调用方的函数不在日志库的模块路径下

use jsonlog::args;
use jsonlog::log::{Configs, Logger, SharedBuffer, WriterAppender};
use serde_json::Value;
use std::sync::Arc;

fn traced_logger(configs: Configs) -> (Logger, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let logger = Logger::with_sink(Arc::new(WriterAppender::new(buffer.clone())));
    logger.set_configs(Configs {
        trace_caller: Some(true),
        ..Default::default()
    });
    logger.set_configs(configs);
    (logger, buffer)
}

fn last_record(buffer: &SharedBuffer) -> Value {
    let lines = buffer.lines();
    serde_json::from_str(lines.last().unwrap()).unwrap()
}

/// 项目自己封装的日志函数
#[inline(never)]
fn audit(logger: &Logger, event: &str) {
    logger.info(args!["audit", event]);
}

#[inline(never)]
fn audit_twice_wrapped(logger: &Logger, event: &str) {
    audit(logger, event);
}

#[test]
fn test_reports_direct_caller() {
    let (logger, buffer) = traced_logger(Configs::default());

    logger.info(args!["direct"]);

    let record = last_record(&buffer);
    let function = record["function"].as_str().unwrap();
    let file = record["file"].as_str().unwrap();
    assert!(function.ends_with("test_reports_direct_caller"), "{}", function);
    assert!(file.contains("caller_tests.rs:"), "{}", file);
}

#[test]
fn test_without_single_point_tracing_reports_wrapper() {
    let (logger, buffer) = traced_logger(Configs::default());

    audit(&logger, "login");

    let record = last_record(&buffer);
    assert!(record["function"].as_str().unwrap().ends_with("audit"));
    assert_eq!(record["message"], "audit login");
}

#[test]
fn test_single_point_tracing_skips_wrapper() {
    let (logger, buffer) = traced_logger(Configs {
        single_point_tracing: Some(true),
        ..Default::default()
    });

    audit(&logger, "login");

    let record = last_record(&buffer);
    let function = record["function"].as_str().unwrap();
    assert!(
        function.ends_with("test_single_point_tracing_skips_wrapper"),
        "{}",
        function
    );
}

#[test]
fn test_caller_skip_for_nested_wrappers() {
    let (logger, buffer) = traced_logger(Configs::default());
    logger.set_caller_skip(2);

    audit_twice_wrapped(&logger, "logout");

    let record = last_record(&buffer);
    let function = record["function"].as_str().unwrap();
    assert!(
        function.ends_with("test_caller_skip_for_nested_wrappers"),
        "{}",
        function
    );
}

#[test]
fn test_disabled_tracing_omits_fields() {
    let (logger, buffer) = traced_logger(Configs {
        trace_caller: Some(false),
        ..Default::default()
    });

    logger.info(args!["quiet"]);

    let record = last_record(&buffer);
    assert!(record.get("file").is_none());
    assert!(record.get("function").is_none());
}
