//! 调用方追踪
//!
//! 从当前调用栈向外查找第一个不属于日志库的函数，作为日志的调用方。
//! 开启单点追踪时再额外跳过若干层，让项目自己封装的日志函数对输出透明。

use std::panic::Location;

/// 属于日志管线本身的符号前缀
const INTERNAL_PREFIXES: [&str; 3] = ["backtrace::", "jsonlog::log::", "log::"];

/// 解析出的调用方
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// `路径:行号`
    pub file: String,
    /// 不带哈希后缀的函数全名
    pub function: String,
}

impl Caller {
    /// 只用编译期位置构造，函数名为空
    pub fn from_location(location: &Location<'_>) -> Self {
        Self {
            file: format!("{}:{}", location.file(), location.line()),
            function: String::new(),
        }
    }
}

/// 解析调用方
///
/// `location` 是日志入口通过 `#[track_caller]` 得到的调用位置，调用栈无法解析
/// 或层数不够时作为兜底
pub fn resolve_caller(extra_skip: usize, location: &'static Location<'static>) -> Caller {
    let backtrace = backtrace::Backtrace::new();

    let mut remaining = extra_skip;
    for symbol in backtrace.frames().iter().flat_map(|frame| frame.symbols()) {
        let Some(name) = symbol.name() else {
            continue;
        };
        let function = format!("{:#}", name);
        if is_internal(&function) {
            continue;
        }
        if remaining > 0 {
            remaining -= 1;
            continue;
        }

        let file = match (symbol.filename(), symbol.lineno()) {
            (Some(path), Some(line)) => format!("{}:{}", path.display(), line),
            (Some(path), None) => path.display().to_string(),
            _ if extra_skip == 0 => format!("{}:{}", location.file(), location.line()),
            _ => String::new(),
        };
        return Caller { file, function };
    }

    Caller::from_location(location)
}

fn is_internal(function: &str) -> bool {
    let name = function.trim_start_matches(['<', '&']);
    if name.contains("::tests::") {
        return false;
    }
    INTERNAL_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_internal() {
        assert!(is_internal("jsonlog::log::logger::Logger::try_log"));
        assert!(is_internal("<jsonlog::log::bridge::LogBridge as log::Log>::log"));
        assert!(is_internal("backtrace::backtrace::trace"));
        assert!(is_internal("log::__private_api::log_impl"));
        assert!(!is_internal("app::handlers::create_user"));
        assert!(!is_internal("jsonlog::log::caller::tests::test_resolve_caller"));
        assert!(!is_internal("<app::Service as app::Handler>::handle"));
    }

    #[test]
    fn test_from_location() {
        let location = Location::caller();
        let caller = Caller::from_location(location);
        assert!(caller.file.starts_with(file!()));
        assert!(caller.function.is_empty());
    }

    #[inline(never)]
    fn resolve_here() -> Caller {
        resolve_caller(0, Location::caller())
    }

    #[test]
    fn test_resolve_caller_reports_this_function() {
        let caller = resolve_here();
        assert!(caller.function.ends_with("resolve_here"), "{:?}", caller);
        assert!(caller.file.contains("caller.rs"), "{:?}", caller);
    }

    #[inline(never)]
    fn wrapper() -> Caller {
        resolve_caller(1, Location::caller())
    }

    #[test]
    fn test_resolve_caller_skips_wrapper() {
        let caller = wrapper();
        assert!(
            caller.function.ends_with("test_resolve_caller_skips_wrapper"),
            "{:?}",
            caller
        );
    }

    #[test]
    fn test_resolve_caller_falls_back_when_stack_exhausted() {
        let caller = resolve_caller(10_000, Location::caller());
        assert!(caller.file.contains("caller.rs"));
        assert!(caller.function.is_empty());
    }
}
