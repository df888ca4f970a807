use crate::log::global::default_logger;
use crate::log::level::LogLevel;
use crate::log::logger::Logger;
use crate::log::message::Arg;

/// 把 `log` 门面的记录转发到 Logger
///
/// 每条记录的格式化结果作为单个字符串参数进入管线，合法的 JSON 文本会以原生值嵌入
pub struct LogBridge {
    logger: &'static Logger,
}

impl LogBridge {
    pub fn new(logger: &'static Logger) -> Self {
        Self { logger }
    }
}

impl Default for LogBridge {
    fn default() -> Self {
        Self::new(default_logger())
    }
}

impl ::log::Log for LogBridge {
    fn enabled(&self, metadata: &::log::Metadata) -> bool {
        LogLevel::from(metadata.level()).enabled_at(self.logger.level())
    }

    fn log(&self, record: &::log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = match record.args().as_str() {
            Some(text) => text.to_string(),
            None => record.args().to_string(),
        };
        self.logger
            .log(LogLevel::from(record.level()), vec![Arg::Text(message)]);
    }

    fn flush(&self) {
        if let Err(err) = self.logger.settings().sink().flush() {
            eprintln!("jsonlog: failed to flush log output: {:#}", err);
        }
    }
}

/// 把默认 Logger 安装为 `log` 门面的实现
///
/// 门面的最大级别设为 Trace，实际过滤按默认 Logger 当前的阈值动态进行
pub fn init_log_bridge() -> Result<(), ::log::SetLoggerError> {
    ::log::set_boxed_logger(Box::new(LogBridge::default()))?;
    ::log::set_max_level(::log::LevelFilter::Trace);
    Ok(())
}
