use crate::log::appender::LogAppender;
use anyhow::Result;
use serde::Deserialize;
use smart_default::SmartDefault;
use std::io::{self, Write};

/// 输出的标准流
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, SmartDefault)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    #[default]
    Stdout,
    Stderr,
}

/// ConsoleAppender 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct ConsoleAppenderConfig {
    /// 输出到标准输出还是标准错误
    pub target: ConsoleTarget,
}

/// 终端输出器
///
/// 写入前锁定标准流，同一时刻只有一条记录在写
#[derive(Debug, Default)]
pub struct ConsoleAppender {
    config: ConsoleAppenderConfig,
}

impl ConsoleAppender {
    pub fn new(config: ConsoleAppenderConfig) -> Self {
        Self { config }
    }

    pub fn target(&self) -> ConsoleTarget {
        self.config.target
    }
}

impl LogAppender for ConsoleAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        match self.config.target {
            ConsoleTarget::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{}", formatted_message)?;
                stdout.flush()?;
            }
            ConsoleTarget::Stderr => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{}", formatted_message)?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match self.config.target {
            ConsoleTarget::Stdout => io::stdout().flush()?,
            ConsoleTarget::Stderr => io::stderr().flush()?,
        }
        Ok(())
    }
}

crate::impl_from!(ConsoleAppenderConfig => ConsoleAppender);
crate::impl_box_from!(ConsoleAppender => dyn LogAppender);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_appender_append() {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig::default());

        let result = appender.append("Test message");
        assert!(result.is_ok());
    }

    #[test]
    fn test_console_appender_stderr() -> Result<()> {
        let appender = ConsoleAppender::new(ConsoleAppenderConfig {
            target: ConsoleTarget::Stderr,
        });

        appender.append("Test message")?;
        appender.flush()?;
        Ok(())
    }

    #[test]
    fn test_console_appender_from_config() {
        let config: ConsoleAppenderConfig = serde_json::from_str(r#"{"target": "stderr"}"#).unwrap();

        let appender = ConsoleAppender::from(config);
        assert_eq!(appender.target(), ConsoleTarget::Stderr);
        assert_eq!(ConsoleAppender::default().target(), ConsoleTarget::Stdout);
    }
}
