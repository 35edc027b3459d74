//! 传输协作者接口：控制中心只通过这两个 trait 与具体协议打交道。
//!
//! - [`TransferBackend`]：每种协议一个实现，负责元数据探测，并为每个 worker 生产一个 [`Transfer`]；
//! - [`Transfer`]：一条逻辑「连接槽位」，由单个 worker 独占，按顺序拉取该 worker 的所有分片。

use crate::internal::output_file::OutputFile;
use crate::internal::transfer::structs::{ProbeInfo, TransferError};

/// 单个 worker 使用的传输实例。
///
/// worker 的 job 队列共享同一个实例（`Arc`），但不同 worker 之间不共享。
pub trait Transfer: Send + Sync {
    /// worker 启动前调用；失败会中止整个下载。
    fn init(&mut self) -> Result<(), TransferError>;

    /// 拉取 `[offset, offset + length)` 并写入 `output` 的同一位置。
    ///
    /// 实现必须恰好写入 `length` 字节，且不得触碰该区间以外的字节。
    fn fetch(
        &self,
        output: &OutputFile,
        offset: u64,
        length: u64,
    ) -> Result<(), TransferError>;
}

/// 某一种协议的传输后端。
pub trait TransferBackend: Send + Sync {
    /// 只获取大小与 Range 支持情况，不下载正文。
    fn probe(&self, url: &str) -> Result<ProbeInfo, TransferError>;

    /// 为一个 worker 创建全新的、尚未初始化的传输实例。
    fn new_transfer(&self, url: &str) -> Box<dyn Transfer>;
}
