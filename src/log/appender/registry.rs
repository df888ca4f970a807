use crate::cfg::{create_trait_from_type_options, register_trait, TypeOptions};
use crate::log::appender::LogAppender;
use crate::log::appender::{
    console_appender::{ConsoleAppender, ConsoleAppenderConfig},
    file_appender::{FileAppender, FileAppenderConfig},
};
use anyhow::{anyhow, Result};
use once_cell::sync::OnceCell;

static REGISTERED: OnceCell<()> = OnceCell::new();

/// 注册所有 Appender 实现，重复调用只注册一次
pub fn register_appenders() -> Result<()> {
    REGISTERED
        .get_or_try_init(|| {
            register_trait::<ConsoleAppender, dyn LogAppender, ConsoleAppenderConfig>(
                "ConsoleAppender",
            )?;
            register_trait::<FileAppender, dyn LogAppender, FileAppenderConfig>("FileAppender")?;
            Ok::<(), anyhow::Error>(())
        })
        .map(|_| ())
        .map_err(|err| anyhow!("failed to register appenders: {}", err))
}

/// 从 TypeOptions 创建 Appender
pub fn create_appender_from_options(options: &TypeOptions) -> Result<Box<dyn LogAppender>> {
    register_appenders()?;
    create_trait_from_type_options(options)
}
