//! 整个下载流程对外的错误类型；每个变体对应一个固定的进程退出码。

use std::path::PathBuf;

use thiserror::Error;

use crate::internal::transfer::structs::TransferError;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("传输后端初始化失败: {0}")]
    Bootstrap(#[source] TransferError),

    #[error("获取文件大小失败: {0}")]
    Probe(#[source] TransferError),

    #[error("打开输出文件 {path} 失败: {source}")]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("worker-{worker} 传输初始化失败: {source}")]
    TransferInit {
        worker: usize,
        #[source]
        source: TransferError,
    },

    #[error("worker-{worker} 线程创建失败: {source}")]
    ThreadStart {
        worker: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("worker-{worker} 下载区间 [{offset}, {end}) 失败: {source}", end = .offset + .size)]
    Fetch {
        worker: usize,
        offset: u64,
        size: u64,
        #[source]
        source: TransferError,
    },

    #[error("worker-{worker} 线程异常退出")]
    WorkerPanicked { worker: usize },

    #[error("控制中心尚未初始化")]
    NotInitialized,
}

impl DownloadError {
    /// 进程退出码：0 保留给成功，2 保留给命令行参数错误。
    pub fn exit_code(&self) -> u8 {
        match self {
            DownloadError::Bootstrap(_) => 3,
            DownloadError::Probe(_) => 4,
            DownloadError::FileOpen { .. } => 5,
            DownloadError::TransferInit { .. } => 6,
            DownloadError::ThreadStart { .. } => 7,
            DownloadError::Fetch { .. } => 8,
            DownloadError::WorkerPanicked { .. } => 9,
            DownloadError::NotInitialized => 10,
        }
    }
}
