use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use super::constants::DEFAULT_CHUNK_SIZE;

/// 一次下载的可调参数。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// 分片大小（字节），至少为 1
    pub chunk_size: u64,
    /// 参与 worker 数量计算的处理单元数；`None` 时取 `available_parallelism`
    pub parallelism: Option<NonZeroUsize>,
    /// 单个 HTTP 请求的超时；`None` 表示不限
    pub request_timeout: Option<Duration>,
    /// 输出文件所在目录
    pub output_dir: PathBuf,
    /// worker 线程栈大小（字节）；`None` 时使用标准库默认值
    pub worker_stack_size: Option<usize>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            parallelism: None,
            request_timeout: None,
            output_dir: PathBuf::from("."),
            worker_stack_size: None,
        }
    }
}

impl DownloadConfig {
    pub fn chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn parallelism(mut self, units: NonZeroUsize) -> Self {
        self.parallelism = Some(units);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn worker_stack_size(mut self, bytes: usize) -> Self {
        self.worker_stack_size = Some(bytes);
        self
    }

    /// 实际参与计算的处理单元数。
    pub(crate) fn processing_units(&self) -> usize {
        self.parallelism
            .or_else(|| std::thread::available_parallelism().ok())
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}
