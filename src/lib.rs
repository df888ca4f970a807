//! jsonlog - 结构化 JSON 日志库
//!
//! 每次日志调用输出一条 JSON 记录，参数数量和类型不限，合法的 JSON 参数以原生值嵌入记录。
//!
//! ## 模块
//!
//! - **cfg**: 组件配置（`TypeOptions` + Trait 注册表，按配置创建输出目标）
//! - **log**: 日志管线（级别过滤、消息归一化、脱敏、渲染、输出）
//!
//! ## 设计理念
//!
//! - 🧩 **结构化输出**: 记录始终是合法的 JSON，不会出现转义后的 JSON 字符串
//! - 🔒 **并发安全**: 配置保存在原子替换的快照中
//! - 🛡️ **不打断调用方**: 除 panic 和 fatal 外，日志调用不会失败

pub mod cfg;
pub mod log;

// 重新导出主要的公共 API
pub use cfg::{create_trait_from_type_options, register_trait, TypeOptions};

pub use self::log::{
    Arg, Color, Configs, CustomColors, LogAppender, LogError, LogFormatter, LogLevel, LogRecord,
    Logger, PanicRecord, Settings,
};
