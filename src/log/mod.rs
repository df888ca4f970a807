//! 日志模块
//!
//! 每次日志调用输出一条 JSON 记录：`{"level", "message", "time", "file"?, "function"?}`。
//!
//! # 特性
//!
//! - 七个级别：trace, debug, info, warn, error, panic, fatal
//! - 参数数量和类型不限：单个参数做 JSON 识别，合法 JSON 以原生值嵌入；
//!   首个参数含 `%` 时按 printf 风格格式化；其余情况用空格拼接
//! - 敏感字段脱敏、缩进输出、级别颜色、调用方追踪
//! - 配置保存在可原子替换的快照中，并发读写安全
//!
//! # 快速开始
//!
//! ```rust,no_run
//! use jsonlog::log::{self, Configs};
//! use jsonlog::{info, warn};
//!
//! fn main() -> anyhow::Result<()> {
//!     log::set_configs(Configs::from_json(r#"
//!         {
//!             LogLevel: "debug",
//!             ObscureSensitiveData: true,
//!             SensitiveParams: ["password"],
//!             Output: {
//!                 type: "ConsoleAppender",
//!                 options: { target: "stderr" }
//!             }
//!         }
//!     "#)?);
//!
//!     info!(r#"{"user":"alice","password":"secret"}"#);
//!     warn!("%d retries left", 2);
//!
//!     Ok(())
//! }
//! ```

pub mod appender;
pub mod bridge;
pub mod caller;
pub mod color;
pub mod error;
pub mod formatter;
pub mod global;
pub mod level;
pub mod log_record;
pub mod logger;
pub mod macros;
pub mod message;
pub mod printf;
pub mod redactor;
pub mod settings;

// 重新导出核心类型
pub use appender::{
    register_appenders, ConsoleAppender, ConsoleAppenderConfig, ConsoleTarget, FileAppender,
    FileAppenderConfig, LogAppender, SharedBuffer, WriterAppender,
};
pub use bridge::{init_log_bridge, LogBridge};
pub use caller::{resolve_caller, Caller};
pub use color::{Color, CustomColors, LevelColors, NamedColor};
pub use error::{LogError, PanicRecord};
pub use formatter::{JsonFormatter, JsonFormatterConfig, LogFormatter};
pub use level::LogLevel;
pub use log_record::LogRecord;
pub use logger::Logger;
pub use message::{compose_message, Arg, Payload};
pub use redactor::{Redactor, MASK};
pub use settings::{Configs, Settings};

// 默认 logger 的配置和日志入口
pub use global::{
    debug, default_logger, disable_colors, disable_json_pretty_print,
    disable_obscure_sensitive_data, disable_single_point_tracing, disable_trace_caller,
    emit_fatal, enable_colors, enable_json_pretty_print, enable_obscure_sensitive_data,
    enable_single_point_tracing, enable_trace_caller, error, fatal, info, level, log, log_level,
    log_writer, panic, set_caller_skip, set_configs, set_custom_colors, set_output,
    set_sensitive_params, settings, trace, warn,
};
