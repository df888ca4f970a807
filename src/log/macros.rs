//! 日志宏
//!
//! 参数可以是任意实现了 `serde::Serialize` 的表达式，数量不限。
//! 宏写入默认 logger，实例方法使用 [`args!`](crate::args) 构造参数列表。
//!
//! # 示例
//!
//! ```rust,no_run
//! use jsonlog::{info, warn, error};
//!
//! info!("application started");
//! warn!("%d retries left", 2);
//! error!("request failed", 503, "upstream");
//! info!(r#"{"user":"alice","action":"login"}"#);
//! ```

/// 构造日志参数列表
///
/// ```
/// use jsonlog::{args, log::Arg};
///
/// let list = args!["a", 1];
/// assert_eq!(list[0], Arg::Text("a".to_string()));
/// assert!(args![].is_empty());
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<$crate::log::Arg>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$($crate::log::Arg::from_serialize(&$arg)),+]
    };
}

/// 记录 TRACE 级别日志
#[macro_export]
macro_rules! trace {
    ($($arg:expr),* $(,)?) => {
        $crate::log::trace($crate::args![$($arg),*])
    };
}

/// 记录 DEBUG 级别日志
#[macro_export]
macro_rules! debug {
    ($($arg:expr),* $(,)?) => {
        $crate::log::debug($crate::args![$($arg),*])
    };
}

/// 记录 INFO 级别日志
///
/// ```ignore
/// info!("user logged in");
/// info!("user %s logged in from %s", name, ip);
/// info!(login_event);
/// ```
#[macro_export]
macro_rules! info {
    ($($arg:expr),* $(,)?) => {
        $crate::log::info($crate::args![$($arg),*])
    };
}

/// 记录 WARN 级别日志
#[macro_export]
macro_rules! warn {
    ($($arg:expr),* $(,)?) => {
        $crate::log::warn($crate::args![$($arg),*])
    };
}

/// 记录 ERROR 级别日志
#[macro_export]
macro_rules! error {
    ($($arg:expr),* $(,)?) => {
        $crate::log::error($crate::args![$($arg),*])
    };
}

/// 渲染 PANIC 级别记录并返回 [`PanicRecord`](crate::log::PanicRecord)，不写入输出
///
/// ```should_panic
/// let record = jsonlog::panic_log!("invariant broken", 42);
/// record.raise();
/// ```
#[macro_export]
macro_rules! panic_log {
    ($($arg:expr),* $(,)?) => {
        $crate::log::panic($crate::args![$($arg),*])
    };
}

/// 写入 FATAL 级别记录后以状态码 1 退出进程
#[macro_export]
macro_rules! fatal {
    ($($arg:expr),* $(,)?) => {
        $crate::log::fatal($crate::args![$($arg),*])
    };
}

#[cfg(test)]
mod tests {
    use crate::log::appender::{ConsoleAppender, SharedBuffer, WriterAppender};
    use crate::log::Arg;
    use serde_json::{json, Value};
    use serial_test::serial;
    use std::sync::Arc;

    #[test]
    fn test_args_macro() {
        let list = crate::args!["a", 1, 2.5, true, None::<i32>, json!({"k": "v"}),];
        assert_eq!(
            list,
            vec![
                Arg::Text("a".to_string()),
                Arg::Value(json!(1)),
                Arg::Value(json!(2.5)),
                Arg::Value(json!(true)),
                Arg::Value(Value::Null),
                Arg::Value(json!({"k": "v"})),
            ]
        );
    }

    #[test]
    #[serial]
    fn test_level_macros_write_to_default_logger() {
        let buffer = SharedBuffer::new();
        crate::log::log_writer(Arc::new(WriterAppender::new(buffer.clone())));
        crate::log::log_level("trace");

        crate::trace!();
        crate::debug!("a", 1, "b");
        crate::info!("%s=%d", "x", 3);
        crate::warn!(json!({"ok": false}));
        crate::error!("failed",);

        let messages: Vec<Value> = buffer
            .lines()
            .iter()
            .map(|line| serde_json::from_str::<Value>(line).unwrap()["message"].clone())
            .collect();
        assert_eq!(
            messages,
            vec![
                json!(""),
                json!("a 1 b"),
                json!("x=3"),
                json!({"ok": false}),
                json!("failed"),
            ]
        );

        crate::log::log_writer(Arc::new(ConsoleAppender::default()));
        crate::log::log_level("info");
    }

    #[test]
    #[serial]
    fn test_panic_log_macro() {
        let record = crate::panic_log!("bad", 1);
        let value: Value = serde_json::from_str(record.record()).unwrap();
        assert_eq!(value["level"], "panic");
        assert_eq!(value["message"], "bad 1");
    }
}
