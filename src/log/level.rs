use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 日志级别
///
/// 数值越大越严重，阈值过滤按数值比较
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// 最详细的日志
    Trace = 1,
    /// 调试信息
    Debug = 2,
    /// 一般信息
    #[default]
    Info = 3,
    /// 警告信息
    Warn = 4,
    /// 错误信息
    Error = 5,
    /// 渲染后交给调用方决定是否 panic
    Panic = 6,
    /// 输出后终止进程
    Fatal = 7,
}

impl LogLevel {
    pub const ALL: [LogLevel; 7] = [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Panic,
        LogLevel::Fatal,
    ];

    /// 按名称解析级别，无法识别时回退为 Info，从不失败
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }

    /// 级别的数值排名
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// 记录中使用的级别标签
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Panic => "panic",
            LogLevel::Fatal => "fatal",
        }
    }

    /// 在阈值为 `threshold` 时该级别是否输出
    pub fn enabled_at(self, threshold: LogLevel) -> bool {
        self.rank() >= threshold.rank()
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "panic" => Ok(LogLevel::Panic),
            "fatal" => Ok(LogLevel::Fatal),
            _ => Err(format!("invalid log level: {}", s)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<::log::Level> for LogLevel {
    fn from(level: ::log::Level) -> Self {
        match level {
            ::log::Level::Error => LogLevel::Error,
            ::log::Level::Warn => LogLevel::Warn,
            ::log::Level::Info => LogLevel::Info,
            ::log::Level::Debug => LogLevel::Debug,
            ::log::Level::Trace => LogLevel::Trace,
        }
    }
}
