use crate::cfg::TypeOptions;
use crate::log::appender::{create_appender_from_options, LogAppender};
use crate::log::caller::resolve_caller;
use crate::log::color::CustomColors;
use crate::log::error::{LogError, PanicRecord};
use crate::log::formatter::LogFormatter;
use crate::log::level::LogLevel;
use crate::log::log_record::LogRecord;
use crate::log::message::{compose_message, Arg, Payload};
use crate::log::settings::{Configs, Settings};
use arc_swap::ArcSwap;
use std::panic::Location;
use std::sync::Arc;

/// 核心日志器
///
/// 持有一份可原子替换的配置快照。每次调用读取一份快照，依次完成级别过滤、
/// 消息归一化和脱敏、记录渲染，最后写入输出目标。
pub struct Logger {
    settings: ArcSwap<Settings>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(Configs::default())
    }
}

impl Logger {
    pub fn new(configs: Configs) -> Self {
        Self {
            settings: ArcSwap::from_pointee(Settings::default().with_configs(&configs)),
        }
    }

    /// 创建输出到指定目标的 Logger，其余配置取默认值
    pub fn with_sink(sink: Arc<dyn LogAppender>) -> Self {
        Self::new(Configs {
            output: Some(sink),
            ..Default::default()
        })
    }

    /// 当前配置快照
    pub fn settings(&self) -> Arc<Settings> {
        self.settings.load_full()
    }

    /// 当前级别阈值
    pub fn level(&self) -> LogLevel {
        self.settings.load().level()
    }

    /// 应用批量配置，未设置的字段保持不变
    pub fn set_configs(&self, configs: Configs) {
        self.settings.rcu(|current| current.with_configs(&configs));
    }

    // ========== 单项设置 ==========

    /// 设置级别阈值，无法识别的名称回退为 info
    pub fn log_level(&self, name: &str) {
        self.set_configs(Configs {
            log_level: Some(name.to_string()),
            ..Default::default()
        });
    }

    /// 设置输出目标
    pub fn log_writer(&self, sink: Arc<dyn LogAppender>) {
        self.set_configs(Configs {
            output: Some(sink),
            ..Default::default()
        });
    }

    /// 按 `{ type, options }` 创建并设置输出目标
    pub fn set_output(&self, options: &TypeOptions) -> Result<(), LogError> {
        let sink = create_appender_from_options(options).map_err(LogError::Output)?;
        self.log_writer(Arc::from(sink));
        Ok(())
    }

    pub fn enable_json_pretty_print(&self) {
        self.set_configs(Configs {
            json_pretty_print: Some(true),
            ..Default::default()
        });
    }

    pub fn disable_json_pretty_print(&self) {
        self.set_configs(Configs {
            json_pretty_print: Some(false),
            ..Default::default()
        });
    }

    pub fn enable_trace_caller(&self) {
        self.set_configs(Configs {
            trace_caller: Some(true),
            ..Default::default()
        });
    }

    pub fn disable_trace_caller(&self) {
        self.set_configs(Configs {
            trace_caller: Some(false),
            ..Default::default()
        });
    }

    /// 调用方追踪时额外跳过一层，用于项目自己封装的日志函数
    pub fn enable_single_point_tracing(&self) {
        self.set_configs(Configs {
            single_point_tracing: Some(true),
            ..Default::default()
        });
    }

    pub fn disable_single_point_tracing(&self) {
        self.set_configs(Configs {
            single_point_tracing: Some(false),
            ..Default::default()
        });
    }

    /// 设置额外跳过的调用栈层数，用于多层封装
    pub fn set_caller_skip(&self, depth: usize) {
        self.set_configs(Configs {
            caller_skip: Some(depth),
            ..Default::default()
        });
    }

    pub fn enable_colors(&self) {
        self.set_configs(Configs {
            colors: Some(true),
            ..Default::default()
        });
    }

    pub fn disable_colors(&self) {
        self.set_configs(Configs {
            colors: Some(false),
            ..Default::default()
        });
    }

    /// 按级别叠加颜色覆盖，未设置的级别保留之前的覆盖
    pub fn set_custom_colors(&self, colors: CustomColors) {
        self.set_configs(Configs {
            custom_colors: Some(colors),
            ..Default::default()
        });
    }

    /// 开启脱敏并设置敏感字段
    pub fn enable_obscure_sensitive_data<I, S>(&self, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_configs(Configs {
            obscure_sensitive_data: Some(true),
            sensitive_params: Some(params.into_iter().map(Into::into).collect()),
            ..Default::default()
        });
    }

    pub fn disable_obscure_sensitive_data(&self) {
        self.set_configs(Configs {
            obscure_sensitive_data: Some(false),
            ..Default::default()
        });
    }

    pub fn set_sensitive_params<I, S>(&self, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_configs(Configs {
            sensitive_params: Some(params.into_iter().map(Into::into).collect()),
            ..Default::default()
        });
    }

    // ========== 日志入口 ==========

    /// 记录日志，级别低于阈值时丢弃
    ///
    /// 只负责输出，panic 和 fatal 级别的特殊行为见 [`Logger::panic`] 和 [`Logger::fatal`]。
    /// 写入失败时输出到标准错误，不会返回给调用方。
    #[track_caller]
    pub fn log(&self, level: LogLevel, args: Vec<Arg>) {
        if let Err(err) = self.try_log(level, args) {
            eprintln!("jsonlog: {}", err);
        }
    }

    /// 与 [`Logger::log`] 相同，但把写入失败返回给调用方
    #[track_caller]
    pub fn try_log(&self, level: LogLevel, args: Vec<Arg>) -> Result<(), LogError> {
        let location = Location::caller();
        let settings = self.settings.load();
        if !settings.should_emit(level) {
            return Ok(());
        }

        let rendered = render(&settings, level, args, location);
        settings.sink().append(&rendered).map_err(LogError::Sink)
    }

    /// 渲染一条记录但不写入，忽略级别阈值
    #[track_caller]
    pub fn compose(&self, level: LogLevel, args: Vec<Arg>) -> String {
        let location = Location::caller();
        render(&self.settings.load(), level, args, location)
    }

    #[track_caller]
    pub fn trace(&self, args: Vec<Arg>) {
        self.log(LogLevel::Trace, args)
    }

    #[track_caller]
    pub fn debug(&self, args: Vec<Arg>) {
        self.log(LogLevel::Debug, args)
    }

    #[track_caller]
    pub fn info(&self, args: Vec<Arg>) {
        self.log(LogLevel::Info, args)
    }

    #[track_caller]
    pub fn warn(&self, args: Vec<Arg>) {
        self.log(LogLevel::Warn, args)
    }

    #[track_caller]
    pub fn error(&self, args: Vec<Arg>) {
        self.log(LogLevel::Error, args)
    }

    /// 渲染 panic 级别的记录并交给调用方，不写入输出目标
    ///
    /// ```should_panic
    /// use jsonlog::{args, log::Logger};
    ///
    /// let logger = Logger::default();
    /// logger.panic(args!["unrecoverable state"]).raise();
    /// ```
    #[track_caller]
    pub fn panic(&self, args: Vec<Arg>) -> PanicRecord {
        PanicRecord::new(self.compose(LogLevel::Panic, args))
    }

    /// 写入 fatal 级别的记录并刷新，忽略级别阈值，不退出进程
    #[track_caller]
    pub fn emit_fatal(&self, args: Vec<Arg>) {
        let location = Location::caller();
        let settings = self.settings.load();
        let rendered = render(&settings, LogLevel::Fatal, args, location);
        let sink = settings.sink();
        if let Err(err) = sink.append(&rendered).and_then(|_| sink.flush()) {
            eprintln!("jsonlog: {}", LogError::Sink(err));
        }
    }

    /// 写入 fatal 级别的记录后以状态码 1 退出进程
    #[track_caller]
    pub fn fatal(&self, args: Vec<Arg>) -> ! {
        self.emit_fatal(args);
        std::process::exit(1)
    }
}

/// 渲染一条记录，不做 I/O
fn render(
    settings: &Settings,
    level: LogLevel,
    args: Vec<Arg>,
    location: &'static Location<'static>,
) -> String {
    let message = compose_message(Payload::from(args), settings.active_redactor());
    let mut record = LogRecord::new(level, message);
    if settings.trace_caller() {
        let caller = resolve_caller(settings.caller_skip(), location);
        record = record.with_caller(caller.file, caller.function);
    }

    match settings.formatter().format(&record) {
        Ok(rendered) => rendered,
        Err(err) => {
            eprintln!("jsonlog: {}", LogError::Render(err));
            fallback(record)
        }
    }
}

/// 渲染失败时输出紧凑格式，消息退化为字符串
fn fallback(mut record: LogRecord) -> String {
    record.message = serde_json::Value::String(record.message.to_string());
    serde_json::to_string(&record).unwrap_or_else(|_| {
        format!(
            r#"{{"level":"{}","message":"","time":"{}"}}"#,
            record.level, record.time
        )
    })
}
