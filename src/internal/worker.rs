//! worker：一个 OS 线程 + 一个有序的分片队列。
//!
//! 队列在启动前通过 [`Worker::set_jobs`] 装入；启动后线程独占队列，按顺序执行，
//! 遇到第一个失败的分片就记录错误并停止。记录的错误通过线程的 `JoinHandle` 返回，
//! 只有在 [`Worker::wait_stop`] 汇合之后才能被读取。

pub mod job;
mod run_loop;
pub mod worker_state;

use std::collections::VecDeque;
use std::thread::{self, JoinHandle};

use tracing::{debug, error, warn};

use crate::internal::control_center::download_error::DownloadError;
use crate::internal::control_center::download_progress::DownloadProgress;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

pub use job::Job;
pub use worker_state::WorkerState;

pub struct Worker {
    id: usize,
    jobs: VecDeque<Job>,
    state: WorkerState,
    handle: Option<JoinHandle<Result<(), DownloadError>>>,
    error: Option<DownloadError>,
    progress: Option<UnlockReactiveProperty<DownloadProgress>>,
    stack_size: Option<usize>,
}

impl Worker {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            jobs: VecDeque::new(),
            state: WorkerState::Created,
            handle: None,
            error: None,
            progress: None,
            stack_size: None,
        }
    }

    /// 每完成一个分片，把其字节数累加到 `progress`。
    pub fn with_progress(
        mut self,
        progress: UnlockReactiveProperty<DownloadProgress>,
    ) -> Self {
        self.progress = Some(progress);
        self
    }

    /// 线程栈大小（字节）；不设置时使用标准库默认值。
    pub fn with_stack_size(mut self, bytes: usize) -> Self {
        self.stack_size = Some(bytes);
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    /// 尚未交给线程的分片数；启动后恒为 0。
    pub fn pending_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// 装入分片队列；启动之后调用无效。
    pub fn set_jobs(&mut self, jobs: impl IntoIterator<Item = Job>) {
        if self.state != WorkerState::Created {
            warn!(worker = self.id, state = ?self.state, "worker 已启动，忽略 set_jobs");
            return;
        }
        self.jobs = jobs.into_iter().collect();
    }

    /// 创建线程执行队列；线程创建失败时 worker 直接进入 `Terminated`。
    pub fn start(&mut self) -> Result<(), DownloadError> {
        if self.state != WorkerState::Created {
            return Ok(());
        }

        let id = self.id;
        let jobs = std::mem::take(&mut self.jobs);
        let progress = self.progress.clone();

        let mut builder = thread::Builder::new().name(format!("range-worker-{id}"));
        if let Some(bytes) = self.stack_size {
            builder = builder.stack_size(bytes);
        }
        let spawned = builder.spawn(move || run_loop::run_jobs(id, jobs, progress));

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                self.state = WorkerState::Running;
                Ok(())
            }
            Err(source) => {
                error!(worker = id, error = %source, "worker 线程创建失败");
                self.state = WorkerState::Terminated;
                Err(DownloadError::ThreadStart { worker: id, source })
            }
        }
    }

    /// 阻塞直到线程结束，并取回它记录的错误；可重复调用。
    pub fn wait_stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            let outcome = match handle.join() {
                Ok(result) => result.err(),
                Err(_) => Some(DownloadError::WorkerPanicked { worker: self.id }),
            };
            debug!(worker = self.id, failed = outcome.is_some(), "worker 已停止");
            self.error = outcome;
        }
        self.state = WorkerState::Terminated;
    }

    /// 汇合后才有意义：该 worker 记录的第一个错误。
    pub fn error(&self) -> Option<&DownloadError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<DownloadError> {
        self.error.take()
    }
}

/// 销毁前必定汇合线程，worker 不会遗留仍在写文件的线程。
impl Drop for Worker {
    fn drop(&mut self) {
        self.wait_stop();
    }
}
