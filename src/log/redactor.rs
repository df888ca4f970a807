//! 敏感字段脱敏
//!
//! 对序列化后的 JSON 文本做正则替换，把指定字段的字符串值替换为掩码。
//! 只处理字符串类型的值，数字、布尔和 null 不会被替换。

use regex_lite::{Captures, Regex};
use std::sync::Arc;

/// 替换后的掩码
pub const MASK: &str = "**********";

/// 单个字段的两种匹配模式
#[derive(Debug)]
struct FieldPattern {
    /// 嵌在字符串里的 JSON：`\"field\":\"value\"`
    escaped: Regex,
    /// 普通 JSON：`"field":"value"`
    plain: Regex,
}

impl FieldPattern {
    fn new(field: &str) -> Option<Self> {
        let field = regex_lite::escape(field);
        let escaped = Regex::new(&format!(r#"(\\"{field}\\"\s*:\s*\\")(.*?)(\\")"#)).ok()?;
        let plain = Regex::new(&format!(r#"("{field}"\s*:\s*")(?:[^"\\]|\\.)*(")"#)).ok()?;
        Some(Self { escaped, plain })
    }

    fn apply(&self, text: &str) -> String {
        let text = self.escaped.replace_all(text, |caps: &Captures<'_>| {
            format!("{}{}{}", &caps[1], MASK, &caps[3])
        });
        self.plain
            .replace_all(&text, |caps: &Captures<'_>| {
                format!("{}{}{}", &caps[1], MASK, &caps[2])
            })
            .into_owned()
    }
}

/// 脱敏器
///
/// 字段模式在创建时编译，克隆只增加引用计数
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    fields: Vec<String>,
    patterns: Arc<Vec<FieldPattern>>,
}

impl Redactor {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        fields.sort();
        fields.dedup();

        // 字段名已转义，编译失败只可能来自极端输入，跳过该字段
        let patterns = fields.iter().filter_map(|f| FieldPattern::new(f)).collect();

        Self {
            fields,
            patterns: Arc::new(patterns),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 对 JSON 文本脱敏，依次处理每个字段：先处理转义形式，再处理普通形式
    pub fn redact(&self, json: &str) -> String {
        self.patterns
            .iter()
            .fold(json.to_string(), |text, pattern| pattern.apply(&text))
    }
}

impl PartialEq for Redactor {
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_redact_plain_field() {
        let redactor = Redactor::new(["password"]);
        let out = redactor.redact(r#"{"u":"x","password":"secret"}"#);
        assert_eq!(out, r#"{"u":"x","password":"**********"}"#);
    }

    #[test]
    fn test_redact_with_whitespace() {
        let redactor = Redactor::new(["token"]);
        let out = redactor.redact(r#"{ "token" : "abc", "id": "1" }"#);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!({"token": MASK, "id": "1"}));
    }

    #[test]
    fn test_redact_value_with_escaped_quote() {
        let redactor = Redactor::new(["password"]);
        let out = redactor.redact(r#"{"password":"se\"cr\"et","u":"x"}"#);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value, json!({"password": MASK, "u": "x"}));
    }

    #[test]
    fn test_redact_nested_escaped_json() {
        let redactor = Redactor::new(["password"]);
        let inner = r#"{"password":"secret","u":"x"}"#;
        let outer = serde_json::to_string(&json!({ "body": inner })).unwrap();

        let out = redactor.redact(&outer);
        let value: Value = serde_json::from_str(&out).unwrap();
        let body: Value = serde_json::from_str(value["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({"password": MASK, "u": "x"}));
    }

    #[test]
    fn test_redact_multiple_fields_and_occurrences() {
        let redactor = Redactor::new(["password", "token"]);
        let input = json!({
            "password": "a",
            "token": "b",
            "nested": { "password": "c", "name": "d" },
            "list": [ { "token": "e" } ]
        })
        .to_string();

        let value: Value = serde_json::from_str(&redactor.redact(&input)).unwrap();
        assert_eq!(
            value,
            json!({
                "password": MASK,
                "token": MASK,
                "nested": { "password": MASK, "name": "d" },
                "list": [ { "token": MASK } ]
            })
        );
    }

    #[test]
    fn test_non_string_values_are_untouched() {
        let redactor = Redactor::new(["pin"]);
        let input = r#"{"pin":1234,"ok":true}"#;
        assert_eq!(redactor.redact(input), input);
    }

    #[test]
    fn test_field_name_suffix_does_not_match() {
        let redactor = Redactor::new(["password"]);
        let input = r#"{"old_password":"keep"}"#;
        assert_eq!(redactor.redact(input), input);
    }

    #[test]
    fn test_field_name_with_metacharacters() {
        let redactor = Redactor::new(["api.key", "a+b"]);
        let out = redactor.redact(r#"{"api.key":"k","apixkey":"v","a+b":"c","aab":"d"}"#);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({"api.key": MASK, "apixkey": "v", "a+b": MASK, "aab": "d"})
        );
    }

    #[test]
    fn test_empty_redactor_is_identity() {
        let redactor = Redactor::default();
        assert!(redactor.is_empty());
        assert_eq!(redactor.redact(r#"{"a":"b"}"#), r#"{"a":"b"}"#);
    }

    #[test]
    fn test_fields_deduplicated() {
        let redactor = Redactor::new(["b", "a", "b"]);
        assert_eq!(redactor.fields(), ["a".to_string(), "b".to_string()]);
        assert_eq!(redactor, Redactor::new(["a", "b"]));
    }
}
