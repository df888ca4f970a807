use crate::log::level::LogLevel;
use serde::Serialize;
use serde_json::Value;

/// 记录中的时间格式，精确到秒
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";

/// 日志记录
///
/// 每次调用生成一条，序列化后即丢弃。字段按 level、message、time、file、function 的顺序输出，
/// file 和 function 只在开启调用方追踪时出现。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// 日志级别
    pub level: LogLevel,
    /// 归一化后的消息，合法 JSON 以原生值嵌入
    pub message: Value,
    /// 本地时间
    pub time: String,
    /// 源文件路径
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// 函数名
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
}

impl LogRecord {
    /// 创建新的日志记录，时间取当前本地时间
    pub fn new(level: LogLevel, message: Value) -> Self {
        Self {
            level,
            message,
            time: chrono::Local::now().format(TIME_FORMAT).to_string(),
            file: None,
            function: None,
        }
    }

    /// 设置调用方信息
    pub fn with_caller(mut self, file: impl Into<String>, function: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self.function = Some(function.into());
        self
    }

    /// 覆盖时间
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }
}
