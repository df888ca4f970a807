use anyhow::Result;

/// 日志输出器 trait
///
/// 每次 `append` 写入一条完整记录并以换行结尾。实现需要自行串行化并发写入，
/// 避免不同记录的内容交错。
pub trait LogAppender: Send + Sync {
    /// 输出一条日志
    fn append(&self, formatted_message: &str) -> Result<()>;

    /// 刷新缓冲区（默认实现为空操作）
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
