//! # range_fetch
//!
//! 并行分段下载引擎：探测远程文件大小与 Range 支持，把文件切成连续区间分给多个 worker 线程，
//! 每个分片直接写到输出文件的最终位置，下载完成后无需合并。

/// 内部实现模块
mod internal;

#[cfg(test)]
mod tests;

/// 核心入口
pub use internal::control_center::ControlCenter;
pub use internal::control_center::download_config::DownloadConfig;
pub use internal::control_center::download_error::DownloadError;
pub use internal::control_center::download_progress::DownloadProgress;
pub use internal::control_center::download_target::DownloadTarget;
pub use internal::transfer::structs::ProtocolKind;

/// 分区计算（纯函数），便于调用方预览分区方案
pub mod partition {
    use crate::internal;
    pub use internal::control_center::constants::*;
    pub use internal::control_center::partition::*;
}

/// 传输协作者：接口、协议注册表与 HTTP 实现。自定义协议实现 `TransferBackend` 后
/// 通过 [`ControlCenter::with_backend`] 注入。
pub mod transfer {
    use crate::internal;
    pub use internal::transfer::http::{HttpBackend, HttpTransfer};
    pub use internal::transfer::structs::*;
    pub use internal::transfer::traits::*;
}

pub mod worker {
    use crate::internal;
    pub use internal::worker::{Job, Worker, WorkerState};
}

pub mod output_file {
    use crate::internal;
    pub use internal::output_file::OutputFile;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
