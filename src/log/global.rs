use crate::cfg::TypeOptions;
use crate::log::appender::LogAppender;
use crate::log::color::CustomColors;
use crate::log::error::{LogError, PanicRecord};
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::message::Arg;
use crate::log::settings::{Configs, Settings};
use once_cell::sync::Lazy;
use std::sync::Arc;

/// 进程级默认 Logger
///
/// 默认以紧凑 JSON 输出到标准输出，阈值为 info
static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(Logger::default);

/// 获取默认 Logger
pub fn default_logger() -> &'static Logger {
    &DEFAULT_LOGGER
}

// ========== 默认 logger 的配置 ==========

pub fn set_configs(configs: Configs) {
    default_logger().set_configs(configs)
}

pub fn settings() -> Arc<Settings> {
    default_logger().settings()
}

pub fn level() -> LogLevel {
    default_logger().level()
}

pub fn log_level(name: &str) {
    default_logger().log_level(name)
}

pub fn log_writer(sink: Arc<dyn LogAppender>) {
    default_logger().log_writer(sink)
}

pub fn set_output(options: &TypeOptions) -> Result<(), LogError> {
    default_logger().set_output(options)
}

pub fn enable_json_pretty_print() {
    default_logger().enable_json_pretty_print()
}

pub fn disable_json_pretty_print() {
    default_logger().disable_json_pretty_print()
}

pub fn enable_trace_caller() {
    default_logger().enable_trace_caller()
}

pub fn disable_trace_caller() {
    default_logger().disable_trace_caller()
}

pub fn enable_single_point_tracing() {
    default_logger().enable_single_point_tracing()
}

pub fn disable_single_point_tracing() {
    default_logger().disable_single_point_tracing()
}

pub fn set_caller_skip(depth: usize) {
    default_logger().set_caller_skip(depth)
}

pub fn enable_colors() {
    default_logger().enable_colors()
}

pub fn disable_colors() {
    default_logger().disable_colors()
}

pub fn set_custom_colors(colors: CustomColors) {
    default_logger().set_custom_colors(colors)
}

pub fn enable_obscure_sensitive_data<I, S>(params: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    default_logger().enable_obscure_sensitive_data(params)
}

pub fn disable_obscure_sensitive_data() {
    default_logger().disable_obscure_sensitive_data()
}

pub fn set_sensitive_params<I, S>(params: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    default_logger().set_sensitive_params(params)
}

// ========== 默认 logger 的日志入口 ==========

/// 使用默认 logger 记录日志
#[track_caller]
pub fn log(level: LogLevel, args: Vec<Arg>) {
    default_logger().log(level, args)
}

/// 使用默认 logger 记录 TRACE 级别日志
#[track_caller]
pub fn trace(args: Vec<Arg>) {
    default_logger().trace(args)
}

/// 使用默认 logger 记录 DEBUG 级别日志
#[track_caller]
pub fn debug(args: Vec<Arg>) {
    default_logger().debug(args)
}

/// 使用默认 logger 记录 INFO 级别日志
#[track_caller]
pub fn info(args: Vec<Arg>) {
    default_logger().info(args)
}

/// 使用默认 logger 记录 WARN 级别日志
#[track_caller]
pub fn warn(args: Vec<Arg>) {
    default_logger().warn(args)
}

/// 使用默认 logger 记录 ERROR 级别日志
#[track_caller]
pub fn error(args: Vec<Arg>) {
    default_logger().error(args)
}

/// 使用默认 logger 渲染 PANIC 级别记录，不写入
#[track_caller]
pub fn panic(args: Vec<Arg>) -> PanicRecord {
    default_logger().panic(args)
}

/// 使用默认 logger 写入 FATAL 级别记录，不退出进程
#[track_caller]
pub fn emit_fatal(args: Vec<Arg>) {
    default_logger().emit_fatal(args)
}

/// 使用默认 logger 写入 FATAL 级别记录后退出进程
#[track_caller]
pub fn fatal(args: Vec<Arg>) -> ! {
    default_logger().fatal(args)
}
