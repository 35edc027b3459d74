//! 分片任务：一段字节区间 + 负责拉取它的传输实例 + 共享的输出文件。

use std::fmt;
use std::sync::Arc;

use crate::internal::control_center::partition::ByteRange;
use crate::internal::output_file::OutputFile;
use crate::internal::transfer::structs::TransferError;
use crate::internal::transfer::traits::Transfer;

/// 不可变的分片描述；由控制中心在分区时创建，被所属 worker 消费一次。
#[derive(Clone)]
pub struct Job {
    range: ByteRange,
    output: Arc<OutputFile>,
    transfer: Arc<dyn Transfer>,
}

impl Job {
    pub fn new(
        range: ByteRange,
        output: Arc<OutputFile>,
        transfer: Arc<dyn Transfer>,
    ) -> Self {
        Self {
            range,
            output,
            transfer,
        }
    }

    pub fn offset(&self) -> u64 {
        self.range.offset
    }

    pub fn size(&self) -> u64 {
        self.range.size
    }

    pub fn range(&self) -> ByteRange {
        self.range
    }

    /// 交给传输实例，写入输出文件的 `[offset, offset + size)`。
    pub(crate) fn execute(&self) -> Result<(), TransferError> {
        self.transfer
            .fetch(&self.output, self.range.offset, self.range.size)
    }
}

impl fmt::Debug for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("offset", &self.range.offset)
            .field("size", &self.range.size)
            .field("output", &self.output.path())
            .finish()
    }
}
