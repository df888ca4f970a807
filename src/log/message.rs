//! 日志参数的归一化
//!
//! 调用方传入的任意参数先转换为 [`Arg`]，再按参数个数和首个参数归类为 [`Payload`]，
//! 最后由 [`compose_message`] 生成记录中的 `message` 值。

use crate::log::printf::{has_directive, sprintf};
use crate::log::redactor::Redactor;
use serde::ser::{self, Impossible, Serialize};
use serde_json::Value;
use std::fmt;

/// 单个日志参数
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// 字符串参数，保留原文
    Text(String),
    /// 其他可序列化的值
    Value(Value),
}

impl Arg {
    /// 从任意可序列化的值构造参数，序列化为字符串的值归为 `Text`
    ///
    /// 序列化失败时退化为描述错误的文本，不会丢弃这次日志调用。
    /// NaN 和无穷大归为文本（`NaN`、`inf`、`-inf`）
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Self {
        if let Ok(float) = value.serialize(NonFiniteFloat) {
            return Arg::Text(float.to_string());
        }
        match serde_json::to_value(value) {
            Ok(Value::String(text)) => Arg::Text(text),
            Ok(value) => Arg::Value(value),
            Err(err) => Arg::Text(format!("<unserializable: {}>", err)),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Arg::Text(text.into())
    }

    /// 使用 `Display` 的结果作为文本参数，用于没有实现 `Serialize` 的类型
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Arg::Text(value.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Arg::Value(Value::Null))
    }

    /// 格式化错误信息中使用的类型名
    pub fn type_name(&self) -> &'static str {
        match self {
            Arg::Text(_) => "string",
            Arg::Value(Value::Null) => "null",
            Arg::Value(Value::Bool(_)) => "bool",
            Arg::Value(Value::Number(n)) if n.is_f64() => "float",
            Arg::Value(Value::Number(_)) => "int",
            Arg::Value(Value::String(_)) => "string",
            Arg::Value(Value::Array(_)) => "array",
            Arg::Value(Value::Object(_)) => "object",
        }
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Text(text) => f.write_str(text),
            Arg::Value(Value::String(text)) => f.write_str(text),
            Arg::Value(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Arg {
    fn from(text: &str) -> Self {
        Arg::Text(text.to_string())
    }
}

impl From<String> for Arg {
    fn from(text: String) -> Self {
        Arg::Text(text)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Arg::Text(text),
            value => Arg::Value(value),
        }
    }
}

/// 只接受非有限浮点数（可包在 `Some` 或 newtype 中）的序列化器
struct NonFiniteFloat;

#[derive(Debug)]
struct NotNonFinite;

impl fmt::Display for NotNonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("not a non-finite float")
    }
}

impl std::error::Error for NotNonFinite {}

impl ser::Error for NotNonFinite {
    fn custom<T: fmt::Display>(_: T) -> Self {
        NotNonFinite
    }
}

macro_rules! reject {
    ($($method:ident($($ty:ty),*);)*) => {
        $(
            fn $method(self, $(_: $ty),*) -> Result<Self::Ok, Self::Error> {
                Err(NotNonFinite)
            }
        )*
    };
}

impl ser::Serializer for NonFiniteFloat {
    type Ok = f64;
    type Error = NotNonFinite;
    type SerializeSeq = Impossible<f64, NotNonFinite>;
    type SerializeTuple = Impossible<f64, NotNonFinite>;
    type SerializeTupleStruct = Impossible<f64, NotNonFinite>;
    type SerializeTupleVariant = Impossible<f64, NotNonFinite>;
    type SerializeMap = Impossible<f64, NotNonFinite>;
    type SerializeStruct = Impossible<f64, NotNonFinite>;
    type SerializeStructVariant = Impossible<f64, NotNonFinite>;

    fn serialize_f32(self, v: f32) -> Result<f64, NotNonFinite> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<f64, NotNonFinite> {
        if v.is_finite() {
            Err(NotNonFinite)
        } else {
            Ok(v)
        }
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<f64, NotNonFinite> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        value: &T,
    ) -> Result<f64, NotNonFinite> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<f64, NotNonFinite> {
        Err(NotNonFinite)
    }

    reject! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_none();
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
    }

    fn serialize_seq(self, _: Option<usize>) -> Result<Self::SerializeSeq, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_tuple(self, _: usize) -> Result<Self::SerializeTuple, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleStruct, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeTupleVariant, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_map(self, _: Option<usize>) -> Result<Self::SerializeMap, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStruct, NotNonFinite> {
        Err(NotNonFinite)
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<Self::SerializeStructVariant, NotNonFinite> {
        Err(NotNonFinite)
    }
}

/// 一次日志调用的全部参数
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 没有参数
    Empty,
    /// 单个参数，需要做 JSON 识别和脱敏
    Single(Arg),
    /// 首个参数是包含格式化指令的字符串
    Format { template: String, args: Vec<Arg> },
    /// 多个参数用空格拼接
    Chain(Vec<Arg>),
}

impl From<Vec<Arg>> for Payload {
    fn from(args: Vec<Arg>) -> Self {
        let mut iter = args.into_iter();
        let Some(first) = iter.next() else {
            return Payload::Empty;
        };
        let rest: Vec<Arg> = iter.collect();
        if rest.is_empty() {
            return Payload::Single(first);
        }

        match first {
            Arg::Text(template) if has_directive(&template) => Payload::Format {
                template,
                args: rest,
            },
            first => {
                let mut args = Vec::with_capacity(rest.len() + 1);
                args.push(first);
                args.extend(rest);
                Payload::Chain(args)
            }
        }
    }
}

/// 生成记录中的 `message` 值
///
/// 传入 `redactor` 表示脱敏已启用且字段集非空。合法的 JSON 会以原生值嵌入，
/// 不会再被转义成字符串。
pub fn compose_message(payload: Payload, redactor: Option<&Redactor>) -> Value {
    match payload {
        Payload::Empty => Value::String(String::new()),
        Payload::Single(arg) => adapt(arg, redactor),
        Payload::Format { template, args } => Value::String(sprintf(&template, &args)),
        Payload::Chain(args) => Value::String(chain(&args)),
    }
}

fn adapt(arg: Arg, redactor: Option<&Redactor>) -> Value {
    match (arg, redactor) {
        (Arg::Text(text), redactor) => {
            let text = match redactor {
                Some(redactor) => redactor.redact(&text),
                None => text,
            };
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        }
        (Arg::Value(value), Some(redactor)) => {
            let redacted = redactor.redact(&value.to_string());
            serde_json::from_str(&redacted).unwrap_or(Value::String(redacted))
        }
        (Arg::Value(value), None) => value,
    }
}

fn chain(args: &[Arg]) -> String {
    args.iter()
        .filter(|arg| !arg.is_null())
        .map(|arg| arg.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::redactor::MASK;
    use serde_json::json;
    use std::collections::HashMap;

    fn payload(args: Vec<Arg>) -> Payload {
        Payload::from(args)
    }

    #[test]
    fn test_arg_from_serialize() {
        assert_eq!(Arg::from_serialize("a"), Arg::Text("a".to_string()));
        assert_eq!(Arg::from_serialize(&1), Arg::Value(json!(1)));
        assert_eq!(Arg::from_serialize(&'c'), Arg::Text("c".to_string()));
        assert_eq!(Arg::from_serialize(&None::<i32>), Arg::Value(Value::Null));
        assert_eq!(Arg::from_serialize(&vec![1, 2]), Arg::Value(json!([1, 2])));
    }

    #[test]
    fn test_non_finite_floats_become_text() {
        assert_eq!(Arg::from_serialize(&f64::NAN), Arg::Text("NaN".to_string()));
        assert_eq!(
            Arg::from_serialize(&Some(f32::INFINITY)),
            Arg::Text("inf".to_string())
        );
        assert_eq!(Arg::from_serialize(&f64::NEG_INFINITY), Arg::Text("-inf".to_string()));
        assert_eq!(Arg::from_serialize(&1.5), Arg::Value(json!(1.5)));

        let args = vec!["ratio".into(), Arg::from_serialize(&f64::NAN)];
        assert_eq!(compose_message(payload(args), None), json!("ratio NaN"));
    }

    #[test]
    fn test_arg_from_unserializable_value_degrades_to_text() {
        let mut map = HashMap::new();
        map.insert((1, 2), "x");
        match Arg::from_serialize(&map) {
            Arg::Text(text) => assert!(text.starts_with("<unserializable")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_payload_classification() {
        assert_eq!(payload(vec![]), Payload::Empty);
        assert_eq!(payload(vec!["a".into()]), Payload::Single("a".into()));
        assert_eq!(
            payload(vec!["%d left".into(), json!(2).into()]),
            Payload::Format {
                template: "%d left".to_string(),
                args: vec![json!(2).into()],
            }
        );
        assert_eq!(
            payload(vec!["a".into(), json!(1).into()]),
            Payload::Chain(vec!["a".into(), json!(1).into()])
        );
        // 首个参数不是字符串时不做格式化
        assert_eq!(
            payload(vec![json!(1).into(), "%d".into()]),
            Payload::Chain(vec![json!(1).into(), "%d".into()])
        );
    }

    #[test]
    fn test_compose_empty() {
        assert_eq!(compose_message(Payload::Empty, None), json!(""));
    }

    #[test]
    fn test_compose_chain() {
        let args = vec!["a".into(), json!(1).into(), "b".into()];
        assert_eq!(compose_message(payload(args), None), json!("a 1 b"));

        let args = vec![
            "user".into(),
            Value::Null.into(),
            json!({"id": 7}).into(),
            json!(true).into(),
        ];
        assert_eq!(
            compose_message(payload(args), None),
            json!(r#"user {"id":7} true"#)
        );
    }

    #[test]
    fn test_compose_format_is_final_text() {
        let args = vec!["%d left".into(), json!(2).into()];
        assert_eq!(compose_message(payload(args), None), json!("2 left"));

        // 格式化结果即使是合法 JSON 也不再解析或脱敏
        let redactor = Redactor::new(["password"]);
        let args = vec![r#"{"password":"%s"}"#.into(), "secret".into()];
        assert_eq!(
            compose_message(payload(args), Some(&redactor)),
            json!(r#"{"password":"secret"}"#)
        );
    }

    #[test]
    fn test_compose_single_json_string_is_native() {
        let message = compose_message(payload(vec![r#"{"a":[1,2],"b":"c"}"#.into()]), None);
        assert_eq!(message, json!({"a": [1, 2], "b": "c"}));
    }

    #[test]
    fn test_compose_single_plain_string() {
        let message = compose_message(payload(vec!["hello world".into()]), None);
        assert_eq!(message, json!("hello world"));
    }

    #[test]
    fn test_compose_single_value_without_redaction() {
        let message = compose_message(payload(vec![json!({"password": "x"}).into()]), None);
        assert_eq!(message, json!({"password": "x"}));
    }

    #[test]
    fn test_compose_single_string_with_redaction() {
        let redactor = Redactor::new(["password"]);
        let message = compose_message(
            payload(vec![r#"{"u":"x","password":"secret"}"#.into()]),
            Some(&redactor),
        );
        assert_eq!(message, json!({"u": "x", "password": MASK}));
    }

    #[test]
    fn test_compose_single_value_with_redaction() {
        #[derive(serde::Serialize)]
        struct Login {
            user: String,
            password: String,
            attempts: u32,
        }

        let redactor = Redactor::new(["password"]);
        let login = Login {
            user: "bob".to_string(),
            password: "hunter2".to_string(),
            attempts: 3,
        };
        let message = compose_message(
            payload(vec![Arg::from_serialize(&login)]),
            Some(&redactor),
        );
        assert_eq!(
            message,
            json!({"user": "bob", "password": MASK, "attempts": 3})
        );
    }

    #[test]
    fn test_compose_nested_escaped_json_with_redaction() {
        let redactor = Redactor::new(["password"]);
        let inner = r#"{"password":"secret"}"#;
        let message = compose_message(
            payload(vec![json!({ "body": inner }).into()]),
            Some(&redactor),
        );
        let body: Value = serde_json::from_str(message["body"].as_str().unwrap()).unwrap();
        assert_eq!(body, json!({"password": MASK}));
    }
}
