use crate::cfg::TypeOptions;
use crate::log::appender::{create_appender_from_options, ConsoleAppender, LogAppender};
use crate::log::color::CustomColors;
use crate::log::formatter::{JsonFormatter, JsonFormatterConfig};
use crate::log::level::LogLevel;
use crate::log::redactor::Redactor;
use anyhow::Result;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::sync::Arc;

/// 批量配置
///
/// 所有字段都是可选的，未设置的字段保持当前值不变。单项设置方法也是构造一个
/// 只有一个字段的 `Configs` 再应用。
///
/// 文本配置同时接受 snake_case 字段名和 PascalCase 别名：
///
/// ```
/// use jsonlog::log::Configs;
///
/// let configs = Configs::from_json(r#"{
///     LogLevel: "debug",
///     JSONPrettyPrint: true,
///     SensitiveParams: ["password"],
/// }"#).unwrap();
/// assert_eq!(configs.log_level.as_deref(), Some("debug"));
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Configs {
    /// 级别阈值，无法识别的名称回退为 info
    #[serde(alias = "LogLevel")]
    pub log_level: Option<String>,

    #[serde(alias = "JSONPrettyPrint")]
    pub json_pretty_print: Option<bool>,

    #[serde(alias = "TraceCaller")]
    pub trace_caller: Option<bool>,

    /// 开启时额外跳过一层调用栈，关闭时不跳过
    #[serde(alias = "SinglePointTracing")]
    pub single_point_tracing: Option<bool>,

    /// 额外跳过的调用栈层数，优先于 `single_point_tracing`
    #[serde(alias = "CallerSkip")]
    pub caller_skip: Option<usize>,

    #[serde(alias = "Colors")]
    pub colors: Option<bool>,

    #[serde(alias = "CustomColors")]
    pub custom_colors: Option<CustomColors>,

    #[serde(alias = "ObscureSensitiveData")]
    pub obscure_sensitive_data: Option<bool>,

    #[serde(alias = "SensitiveParams")]
    pub sensitive_params: Option<Vec<String>>,

    /// 输出目标，文本配置中以 `{ type, options }` 形式给出
    #[serde(alias = "Output", deserialize_with = "deserialize_output")]
    pub output: Option<Arc<dyn LogAppender>>,
}

impl Configs {
    /// 从 JSON 字符串解析（支持 JSON5 格式）
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(json5::from_str(json)?)
    }

    /// 从 YAML 字符串解析
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// 从 TOML 字符串解析
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }
}

fn deserialize_output<'de, D>(deserializer: D) -> Result<Option<Arc<dyn LogAppender>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(options) = Option::<TypeOptions>::deserialize(deserializer)? else {
        return Ok(None);
    };
    let appender = create_appender_from_options(&options)
        .map_err(|err| D::Error::custom(format!("{:#}", err)))?;
    Ok(Some(Arc::from(appender)))
}

impl fmt::Debug for Configs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configs")
            .field("log_level", &self.log_level)
            .field("json_pretty_print", &self.json_pretty_print)
            .field("trace_caller", &self.trace_caller)
            .field("single_point_tracing", &self.single_point_tracing)
            .field("caller_skip", &self.caller_skip)
            .field("colors", &self.colors)
            .field("custom_colors", &self.custom_colors)
            .field("obscure_sensitive_data", &self.obscure_sensitive_data)
            .field("sensitive_params", &self.sensitive_params)
            .field("output", &self.output.as_ref().map(|_| "<dyn LogAppender>"))
            .finish()
    }
}

/// 一份不可变的配置快照
///
/// 每次日志调用读取一份快照，设置方法基于当前快照生成新快照再原子替换，
/// 读取方不会看到修改了一半的配置。
#[derive(Clone)]
pub struct Settings {
    level: LogLevel,
    sink: Arc<dyn LogAppender>,
    json_pretty_print: bool,
    colors: bool,
    custom_colors: CustomColors,
    trace_caller: bool,
    caller_skip: usize,
    obscure_sensitive_data: bool,
    redactor: Redactor,
    formatter: Arc<JsonFormatter>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            sink: Arc::new(ConsoleAppender::default()),
            json_pretty_print: false,
            colors: false,
            custom_colors: CustomColors::default(),
            trace_caller: false,
            caller_skip: 0,
            obscure_sensitive_data: false,
            redactor: Redactor::default(),
            formatter: Arc::new(JsonFormatter::default()),
        }
    }
}

impl Settings {
    /// 应用批量配置，返回新的快照
    pub fn with_configs(&self, configs: &Configs) -> Settings {
        let mut next = self.clone();

        if let Some(name) = &configs.log_level {
            next.level = LogLevel::from_name(name);
        }
        if let Some(sink) = &configs.output {
            next.sink = Arc::clone(sink);
        }
        if let Some(enabled) = configs.trace_caller {
            next.trace_caller = enabled;
        }
        if let Some(enabled) = configs.single_point_tracing {
            next.caller_skip = usize::from(enabled);
        }
        if let Some(skip) = configs.caller_skip {
            next.caller_skip = skip;
        }
        if let Some(enabled) = configs.obscure_sensitive_data {
            next.obscure_sensitive_data = enabled;
        }
        if let Some(params) = &configs.sensitive_params {
            next.redactor = Redactor::new(params.iter().cloned());
        }

        let formatter_changed = configs.json_pretty_print.is_some()
            || configs.colors.is_some()
            || configs.custom_colors.is_some();
        if let Some(enabled) = configs.json_pretty_print {
            next.json_pretty_print = enabled;
        }
        if let Some(enabled) = configs.colors {
            next.colors = enabled;
        }
        if let Some(custom) = &configs.custom_colors {
            next.custom_colors = next.custom_colors.merge(custom);
        }
        if formatter_changed {
            next.formatter = Arc::new(JsonFormatter::new(JsonFormatterConfig {
                pretty_print: next.json_pretty_print,
                colors: next.colors,
                custom_colors: next.custom_colors,
            }));
        }

        next
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn sink(&self) -> &Arc<dyn LogAppender> {
        &self.sink
    }

    pub fn json_pretty_print(&self) -> bool {
        self.json_pretty_print
    }

    pub fn colors(&self) -> bool {
        self.colors
    }

    pub fn custom_colors(&self) -> &CustomColors {
        &self.custom_colors
    }

    pub fn trace_caller(&self) -> bool {
        self.trace_caller
    }

    pub fn single_point_tracing(&self) -> bool {
        self.caller_skip > 0
    }

    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    pub fn obscure_sensitive_data(&self) -> bool {
        self.obscure_sensitive_data
    }

    pub fn sensitive_params(&self) -> &[String] {
        self.redactor.fields()
    }

    pub fn formatter(&self) -> &JsonFormatter {
        &self.formatter
    }

    /// 该级别在当前阈值下是否输出
    pub fn should_emit(&self, level: LogLevel) -> bool {
        level.enabled_at(self.level)
    }

    /// 脱敏开启且字段集非空时返回脱敏器
    pub fn active_redactor(&self) -> Option<&Redactor> {
        if self.obscure_sensitive_data && !self.redactor.is_empty() {
            Some(&self.redactor)
        } else {
            None
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("level", &self.level)
            .field("json_pretty_print", &self.json_pretty_print)
            .field("colors", &self.colors)
            .field("custom_colors", &self.custom_colors)
            .field("trace_caller", &self.trace_caller)
            .field("caller_skip", &self.caller_skip)
            .field("obscure_sensitive_data", &self.obscure_sensitive_data)
            .field("sensitive_params", &self.redactor.fields())
            .finish_non_exhaustive()
    }
}
