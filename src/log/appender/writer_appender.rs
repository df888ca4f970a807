use crate::log::appender::LogAppender;
use anyhow::{anyhow, Result};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// 任意 `Write` 目标的输出器
///
/// 用于把日志写到调用方提供的字节流，例如网络连接或内存缓冲区
pub struct WriterAppender {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl WriterAppender {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl fmt::Debug for WriterAppender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterAppender").finish_non_exhaustive()
    }
}

impl LogAppender for WriterAppender {
    fn append(&self, formatted_message: &str) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("writer lock poisoned"))?;
        writeln!(writer, "{}", formatted_message)?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| anyhow!("writer lock poisoned"))?;
        writer.flush()?;
        Ok(())
    }
}

/// 可克隆的内存缓冲区，克隆之间共享同一份内容
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前内容，非 UTF-8 字节按替换字符处理
    pub fn contents(&self) -> String {
        match self.inner.lock() {
            Ok(buf) => String::from_utf8_lossy(&buf).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    /// 按行拆分当前内容
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buf) = self.inner.lock() {
            buf.clear();
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "buffer lock poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
