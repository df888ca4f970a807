// TypeOptions 序列化相关实现

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 类型选项结构
///
/// 用 `type` 指定注册过的组件名，`options` 为该组件的配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypeOptions {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "empty_options")]
    pub options: JsonValue,
}

fn empty_options() -> JsonValue {
    JsonValue::Object(Default::default())
}

impl TypeOptions {
    /// 创建指定类型、空配置的 TypeOptions
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            options: empty_options(),
        }
    }

    /// 从 JSON 字符串创建 TypeOptions（支持 JSON5 格式）
    pub fn from_json(json_str: &str) -> Result<Self> {
        // 使用 json5 解析（支持注释、尾随逗号、未引用的键等）
        Ok(json5::from_str(json_str)?)
    }

    /// 从 YAML 字符串创建 TypeOptions
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// 从 TOML 字符串创建 TypeOptions
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json5() -> Result<()> {
        let opts = TypeOptions::from_json(
            r#"
            {
                // 注释
                type: "ConsoleAppender",
                options: { target: "stderr", },
            }
            "#,
        )?;

        assert_eq!(opts.type_name, "ConsoleAppender");
        assert_eq!(opts.options["target"], "stderr");
        Ok(())
    }

    #[test]
    fn test_from_yaml() -> Result<()> {
        let opts = TypeOptions::from_yaml(
            r#"
type: FileAppender
options:
  file_path: /tmp/app.log
"#,
        )?;

        assert_eq!(opts.type_name, "FileAppender");
        assert_eq!(opts.options["file_path"], "/tmp/app.log");
        Ok(())
    }

    #[test]
    fn test_from_toml() -> Result<()> {
        let opts = TypeOptions::from_toml(
            r#"
type = "ConsoleAppender"

[options]
target = "stdout"
"#,
        )?;

        assert_eq!(opts.type_name, "ConsoleAppender");
        assert_eq!(opts.options["target"], "stdout");
        Ok(())
    }

    #[test]
    fn test_missing_options_defaults_to_empty_object() -> Result<()> {
        let opts = TypeOptions::from_json(r#"{ "type": "ConsoleAppender" }"#)?;
        assert_eq!(opts, TypeOptions::new("ConsoleAppender"));
        assert!(opts.options.is_object());
        Ok(())
    }
}
