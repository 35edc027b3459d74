//! 分区常量。

/// 默认分片大小：1MB；分区粒度，与 worker 数量无关。
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

/// 可用处理单元数的超配倍数：下载是 IO 密集型，每个处理单元跑两个 worker。
pub const WORKERS_PER_PROCESSING_UNIT: usize = 2;
