//! worker 线程的执行体：严格按入队顺序执行分片，遇到第一个失败即停止。

use std::collections::VecDeque;

use tracing::{debug, error};

use crate::internal::control_center::download_error::DownloadError;
use crate::internal::control_center::download_progress::DownloadProgress;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::job::Job;

/// 依次执行 `jobs`；失败的分片之后的分片不再执行（不会跳过失败分片继续往后）。
pub(super) fn run_jobs(
    worker_id: usize,
    jobs: VecDeque<Job>,
    progress: Option<UnlockReactiveProperty<DownloadProgress>>,
) -> Result<(), DownloadError> {
    let total = jobs.len();

    for (index, job) in jobs.into_iter().enumerate() {
        if let Err(source) = job.execute() {
            error!(
                worker = worker_id,
                offset = job.offset(),
                size = job.size(),
                skipped = total - index - 1,
                error = %source,
                "分片下载失败，停止该 worker 的剩余分片"
            );
            return Err(DownloadError::Fetch {
                worker: worker_id,
                offset: job.offset(),
                size: job.size(),
                source,
            });
        }

        if let Some(p) = progress.as_ref() {
            p.update_field(|state| state.bytes_done += job.size());
        }
    }

    debug!(worker = worker_id, jobs = total, "worker 已完成全部分片");
    Ok(())
}
