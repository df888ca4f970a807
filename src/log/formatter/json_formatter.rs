use crate::log::color::{CustomColors, LevelColors};
use crate::log::formatter::LogFormatter;
use crate::log::log_record::LogRecord;
use anyhow::Result;
use serde::Deserialize;
use serde::Serialize;
use smart_default::SmartDefault;

/// 缩进宽度为三个空格
const INDENT: &[u8] = b"   ";

/// JsonFormatter 配置
#[derive(Debug, Clone, Deserialize, PartialEq, SmartDefault)]
#[serde(default)]
pub struct JsonFormatterConfig {
    /// 是否缩进输出
    #[default = false]
    pub pretty_print: bool,

    /// 是否用级别颜色包裹输出
    #[default = false]
    pub colors: bool,

    /// 覆盖默认的级别颜色
    pub custom_colors: CustomColors,
}

/// JSON 格式化器
///
/// 每条记录输出为一个 JSON 对象，可选缩进和颜色。缩进和颜色可以同时开启。
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    pretty_print: bool,
    colors: bool,
    level_colors: LevelColors,
}

impl JsonFormatter {
    pub fn new(config: JsonFormatterConfig) -> Self {
        Self {
            pretty_print: config.pretty_print,
            colors: config.colors,
            level_colors: LevelColors::default().with_custom(&config.custom_colors),
        }
    }

    pub fn level_colors(&self) -> &LevelColors {
        &self.level_colors
    }

    fn to_json(&self, record: &LogRecord) -> Result<String> {
        if !self.pretty_print {
            return Ok(serde_json::to_string(record)?);
        }

        let mut buf = Vec::with_capacity(256);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        record.serialize(&mut serializer)?;
        Ok(String::from_utf8(buf)?)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(JsonFormatterConfig::default())
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let json = self.to_json(record)?;
        if self.colors {
            Ok(self.level_colors.get(record.level).paint(&json))
        } else {
            Ok(json)
        }
    }
}

crate::impl_from!(JsonFormatterConfig => JsonFormatter);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::color::{Color, NamedColor, RESET};
    use crate::log::level::LogLevel;
    use serde_json::{json, Value};

    fn record(level: LogLevel) -> LogRecord {
        LogRecord::new(level, json!({"user": "alice", "ids": [1, 2]}))
            .with_time("2024-01-02 03:04:05 +0000")
    }

    #[test]
    fn test_json_formatter_compact() -> Result<()> {
        let formatter = JsonFormatter::default();

        let formatted = formatter.format(&record(LogLevel::Info))?;
        assert!(!formatted.contains('\n'));

        let value: Value = serde_json::from_str(&formatted)?;
        assert_eq!(value["level"], "info");
        assert_eq!(value["message"]["user"], "alice");
        assert_eq!(value["time"], "2024-01-02 03:04:05 +0000");
        assert!(value.get("file").is_none());
        Ok(())
    }

    #[test]
    fn test_json_formatter_pretty_print() -> Result<()> {
        let formatter = JsonFormatter::new(JsonFormatterConfig {
            pretty_print: true,
            ..Default::default()
        });

        let pretty = formatter.format(&record(LogLevel::Info))?;
        assert!(pretty.starts_with("{\n   \"level\": \"info\""));
        assert!(pretty.contains("\n      \"user\": \"alice\""));

        let compact = JsonFormatter::default().format(&record(LogLevel::Info))?;
        assert_eq!(
            serde_json::from_str::<Value>(&pretty)?,
            serde_json::from_str::<Value>(&compact)?
        );
        Ok(())
    }

    #[test]
    fn test_json_formatter_colors() -> Result<()> {
        let formatter = JsonFormatter::new(JsonFormatterConfig {
            colors: true,
            ..Default::default()
        });

        let formatted = formatter.format(&record(LogLevel::Error))?;
        assert!(formatted.starts_with("\x1b[31m{"));
        assert!(formatted.ends_with(&format!("}}{}", RESET)));

        let formatted = formatter.format(&record(LogLevel::Warn))?;
        assert!(formatted.starts_with("\x1b[33m"));

        let formatted = formatter.format(&record(LogLevel::Info))?;
        assert!(formatted.starts_with(RESET));
        Ok(())
    }

    #[test]
    fn test_json_formatter_custom_colors() -> Result<()> {
        let formatter = JsonFormatter::new(JsonFormatterConfig {
            colors: true,
            custom_colors: CustomColors {
                error: Some(Color::new(NamedColor::Magenta)),
                ..Default::default()
            },
            ..Default::default()
        });

        let formatted = formatter.format(&record(LogLevel::Error))?;
        assert!(formatted.starts_with("\x1b[35m"));
        assert_eq!(
            formatter.level_colors().get(LogLevel::Debug),
            &Color::new(NamedColor::Green)
        );
        Ok(())
    }

    #[test]
    fn test_json_formatter_from_config() {
        let config = JsonFormatterConfig::default();
        let _ = JsonFormatter::from(config);
    }
}
