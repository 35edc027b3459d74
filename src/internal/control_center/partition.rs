//! 分区计算：worker 数量、每个 worker 的连续区间、区间内的固定大小分片。
//!
//! 全部是纯函数，控制中心与测试共用。对任意文件大小 `F` 与 worker 数 `W`，
//! [`plan_jobs`] 产出的所有区间两两不相交，且并集恰好是 `[0, F)`。

use super::constants::WORKERS_PER_PROCESSING_UNIT;

/// 一段连续字节区间 `[offset, offset + size)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub offset: u64,
    pub size: u64,
}

impl ByteRange {
    pub fn new(offset: u64, size: u64) -> Self {
        Self { offset, size }
    }

    /// 不含上界。
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }
}

/// 决定 worker 数量（至少为 1）。
///
/// - 服务器不支持 Range：只能单流顺序下载，固定 1 个；
/// - 否则先取 `处理单元数 × 2`，若文件不足以让每个 worker 分到一个完整分片，
///   收缩为 `F / chunk_size + 1`；
/// - 最后不超过 `F`，保证 `chunk_size == 1` 时也不会出现空区间的 worker。
pub fn determine_worker_count(
    file_size: u64,
    supports_range: bool,
    processing_units: usize,
    chunk_size: u64,
) -> usize {
    if !supports_range {
        return 1;
    }

    let chunk_size = chunk_size.max(1);
    let provisional = processing_units
        .max(1)
        .saturating_mul(WORKERS_PER_PROCESSING_UNIT);

    let count = if file_size < (provisional as u64).saturating_mul(chunk_size) {
        usize::try_from(file_size / chunk_size + 1).unwrap_or(usize::MAX)
    } else {
        provisional
    };

    let upper = usize::try_from(file_size.max(1)).unwrap_or(usize::MAX);
    count.min(upper).max(1)
}

/// 把 `[0, file_size)` 切成 `worker_count` 段连续区间，最后一段吸收余数。
pub fn worker_ranges(file_size: u64, worker_count: usize) -> Vec<ByteRange> {
    let workers = worker_count.max(1) as u64;
    let base = file_size / workers;

    (0..workers)
        .map(|i| {
            let offset = i * base;
            let size = if i + 1 < workers {
                base
            } else {
                file_size - base * (workers - 1)
            };
            ByteRange::new(offset, size)
        })
        .collect()
}

/// 把一个 worker 的区间切成 `chunk_size` 大小的分片，最后一片吸收余数；空区间没有分片。
pub fn split_into_chunks(range: ByteRange, chunk_size: u64) -> Vec<ByteRange> {
    let chunk_size = chunk_size.max(1);
    let chunk_count = range.size.div_ceil(chunk_size);

    (0..chunk_count)
        .map(|j| {
            let offset = range.offset + j * chunk_size;
            let size = if j + 1 < chunk_count {
                chunk_size
            } else {
                range.size - (chunk_count - 1) * chunk_size
            };
            ByteRange::new(offset, size)
        })
        .collect()
}

/// 完整分区计划：下标为 worker 编号，元素为该 worker 按顺序执行的分片。
pub fn plan_jobs(
    file_size: u64,
    worker_count: usize,
    chunk_size: u64,
) -> Vec<Vec<ByteRange>> {
    worker_ranges(file_size, worker_count)
        .into_iter()
        .map(|range| split_into_chunks(range, chunk_size))
        .collect()
}

/// 按 Range 支持情况生成分区计划：不支持时只有一个 worker、一个覆盖 `[0, F)` 的分片，
/// 因为此时服务器只能从头返回整个文件。
pub fn plan_download(
    file_size: u64,
    supports_range: bool,
    worker_count: usize,
    chunk_size: u64,
) -> Vec<Vec<ByteRange>> {
    if supports_range {
        plan_jobs(file_size, worker_count, chunk_size)
    } else {
        plan_jobs(file_size, 1, file_size)
    }
}
