use thiserror::Error;

/// 日志管线中可以被调用方匹配的错误
///
/// 各级别的日志入口不会返回错误，只有 `try_log` 和 `set_output` 这类显式方法会暴露它们
#[derive(Debug, Error)]
pub enum LogError {
    /// 记录渲染失败
    #[error("failed to render log record: {0:#}")]
    Render(anyhow::Error),

    /// 写入输出目标失败
    #[error("failed to write log record: {0:#}")]
    Sink(anyhow::Error),

    /// 按配置创建输出目标失败
    #[error("failed to create log output: {0:#}")]
    Output(anyhow::Error),
}

/// panic 级别渲染出的记录
///
/// panic 级别不写输出目标，而是把渲染结果交给调用方，由调用方决定是否调用 [`PanicRecord::raise`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{record}")]
pub struct PanicRecord {
    record: String,
}

impl PanicRecord {
    pub fn new(record: String) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &str {
        &self.record
    }

    pub fn into_inner(self) -> String {
        self.record
    }

    /// 以渲染后的记录作为 payload 触发 panic
    pub fn raise(self) -> ! {
        std::panic::panic_any(self.record)
    }
}
