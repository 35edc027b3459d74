//! 控制中心：一次下载的编排者。
//!
//! ## 流程
//!
//! 1. [`ControlCenter::init`]：推导输出文件名、初始化协议后端、探测大小与 Range 支持、打开输出文件；
//! 2. [`ControlCenter::start_work`]：计算 worker 数量与分区，为每个 worker 创建并初始化传输实例、
//!    装入分片队列、启动线程；随后汇合全部已启动的 worker，关闭输出文件，汇总结果。
//!
//! ## 失败策略
//!
//! - 初始化阶段（后端、探测、打开文件）失败：立即返回，不创建任何 worker；
//! - 创建 worker 阶段失败：停止继续创建，但已启动的 worker 仍会被汇合；
//! - 分片失败只影响所在 worker，其他 worker 照常跑完；最终返回按 worker 编号找到的第一个错误。
//!
//! 失败时已写入的部分文件保留在磁盘上，不做清理。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! use range_fetch::{ControlCenter, DownloadConfig, ProtocolKind};
//!
//! let mut center = ControlCenter::new(DownloadConfig::default().output_dir("/tmp"));
//! center.init("https://example.com/big.iso", ProtocolKind::Http, "big.iso")?;
//! center.start_work()?;
//! # Ok::<(), range_fetch::DownloadError>(())
//! ```

pub mod constants;
pub mod download_config;
pub mod download_error;
pub mod download_progress;
pub mod download_target;
pub mod partition;

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::internal::output_file::OutputFile;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;
use crate::internal::transfer::structs::ProtocolKind;
use crate::internal::transfer::traits::{Transfer, TransferBackend};
use crate::internal::worker::{Job, Worker};

use download_config::DownloadConfig;
use download_error::DownloadError;
use download_progress::DownloadProgress;
use download_target::{DownloadTarget, derive_file_name};

pub struct ControlCenter {
    config: DownloadConfig,
    backend: Option<Arc<dyn TransferBackend>>,
    /// 外部注入的后端不随 `init` 重建
    injected_backend: bool,
    /// 当前后端对应的协议
    backend_protocol: Option<ProtocolKind>,
    target: Option<DownloadTarget>,
    output: Option<Arc<OutputFile>>,
    workers: Vec<Worker>,
    progress: UnlockReactiveProperty<DownloadProgress>,
}

impl ControlCenter {
    /// 后端在 `init` 时按协议种类创建。
    pub fn new(config: DownloadConfig) -> Self {
        Self {
            config,
            backend: None,
            injected_backend: false,
            backend_protocol: None,
            target: None,
            output: None,
            workers: Vec::new(),
            progress: UnlockReactiveProperty::new(DownloadProgress::default()),
        }
    }

    /// 使用调用方提供的后端，`init` 中的协议种类只做记录。
    pub fn with_backend(
        config: DownloadConfig,
        backend: Arc<dyn TransferBackend>,
    ) -> Self {
        Self {
            backend: Some(backend),
            injected_backend: true,
            ..Self::new(config)
        }
    }

    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// 探测完成后的下载目标；`init` 成功前为 `None`。
    pub fn target(&self) -> Option<&DownloadTarget> {
        self.target.as_ref()
    }

    /// 下载进度；可在 `init` 之前获取，worker 每完成一个分片更新一次。
    pub fn progress(&self) -> UnlockReactiveProperty<DownloadProgress> {
        self.progress.clone()
    }

    /// 初始化：推导文件名、初始化后端、探测元数据、打开（截断）输出文件。
    pub fn init(
        &mut self,
        url: &str,
        protocol: ProtocolKind,
        output_path: &str,
    ) -> Result<(), DownloadError> {
        // 先作废上一次的目标与输出文件
        self.target = None;
        self.output = None;

        let file_name = derive_file_name(output_path).to_string();
        let path = self.config.output_dir.join(&file_name);
        if file_name.is_empty() {
            return Err(DownloadError::FileOpen {
                path,
                source: io::Error::new(io::ErrorKind::InvalidInput, "输出路径没有文件名"),
            });
        }

        let backend = self.ensure_backend(protocol)?;

        let probe = backend.probe(url).map_err(|e| {
            error!(url, error = %e, "获取文件大小失败");
            DownloadError::Probe(e)
        })?;

        let output = OutputFile::create(&path).map_err(|source| {
            error!(path = %path.display(), error = %source, "打开输出文件失败");
            DownloadError::FileOpen {
                path: path.clone(),
                source,
            }
        })?;

        let target = DownloadTarget {
            url: url.to_string(),
            protocol,
            file_name,
            path,
            size: probe.size,
            supports_range: probe.supports_range,
        };

        debug!(
            file = %target.file_name,
            size = target.size,
            supports_range = target.supports_range,
            "控制中心初始化完成"
        );

        self.progress.update(DownloadProgress {
            bytes_done: 0,
            total: Some(target.size),
        });
        self.output = Some(Arc::new(output));
        self.target = Some(target);
        Ok(())
    }

    fn ensure_backend(
        &mut self,
        protocol: ProtocolKind,
    ) -> Result<Arc<dyn TransferBackend>, DownloadError> {
        // 同一协议只初始化一次，重复 init 复用已有后端
        if self.injected_backend || self.backend_protocol == Some(protocol) {
            if let Some(backend) = &self.backend {
                return Ok(Arc::clone(backend));
            }
        }

        let backend = protocol
            .backend(self.config.request_timeout)
            .map_err(|e| {
                error!(protocol = %protocol, error = %e, "传输后端初始化失败");
                DownloadError::Bootstrap(e)
            })?;
        self.backend = Some(Arc::clone(&backend));
        self.backend_protocol = Some(protocol);
        Ok(backend)
    }

    /// worker 数量；未初始化时为 1。
    pub fn determine_worker_count(&self) -> usize {
        let count = match &self.target {
            Some(target) => partition::determine_worker_count(
                target.size,
                target.supports_range,
                self.config.processing_units(),
                self.config.chunk_size,
            ),
            None => 1,
        };

        if self.target.as_ref().is_some_and(|t| !t.supports_range) {
            debug!("服务器不支持 Range 下载，只创建 1 个 worker");
        }
        debug!(count, "worker 数量");
        count
    }

    /// 分区、启动全部 worker、等待结束并汇总结果。输出文件在这里关闭，只能调用一次。
    pub fn start_work(&mut self) -> Result<(), DownloadError> {
        let target = self.target.clone().ok_or(DownloadError::NotInitialized)?;
        let backend = self.backend.clone().ok_or(DownloadError::NotInitialized)?;
        let output = self.output.take().ok_or(DownloadError::NotInitialized)?;

        let started = self.create_workers(&target, backend.as_ref(), &output);

        // 先汇合所有已启动的 worker，再释放输出文件；任何返回路径都经过这里
        let first_failure = self.wait_stop();
        match output.len() {
            Ok(len) => debug!(file = %output.path().display(), len, "关闭输出文件"),
            Err(e) => warn!(file = %output.path().display(), error = %e, "读取输出文件长度失败"),
        }
        drop(output);

        let result = match (started, first_failure) {
            (Err(e), _) => Err(e),
            (Ok(()), Some(e)) => Err(e),
            (Ok(()), None) => Ok(()),
        };

        match &result {
            Ok(()) => info!(file = %target.path.display(), size = target.size, "下载完成"),
            Err(e) => error!(error = %e, "下载失败"),
        }
        result
    }

    /// 为每个 worker 创建传输实例、装入分片并启动；第一个失败即停止创建。
    fn create_workers(
        &mut self,
        target: &DownloadTarget,
        backend: &dyn TransferBackend,
        output: &Arc<OutputFile>,
    ) -> Result<(), DownloadError> {
        let worker_count = self.determine_worker_count();
        let plan = partition::plan_download(
            target.size,
            target.supports_range,
            worker_count,
            self.config.chunk_size,
        );

        for (id, ranges) in plan.into_iter().enumerate() {
            let mut transfer = backend.new_transfer(&target.url);
            transfer.init().map_err(|source| {
                error!(worker = id, error = %source, "传输初始化失败");
                DownloadError::TransferInit { worker: id, source }
            })?;
            let transfer: Arc<dyn Transfer> = Arc::from(transfer);

            let jobs: VecDeque<Job> = ranges
                .into_iter()
                .map(|range| Job::new(range, Arc::clone(output), Arc::clone(&transfer)))
                .collect();

            debug!(worker = id, jobs = jobs.len(), "启动 worker");

            let mut worker = Worker::new(id).with_progress(self.progress.clone());
            if let Some(bytes) = self.config.worker_stack_size {
                worker = worker.with_stack_size(bytes);
            }
            worker.set_jobs(jobs);
            let started = worker.start();
            self.workers.push(worker);
            started?;
        }

        Ok(())
    }

    /// 按编号依次汇合并销毁全部 worker，返回第一个记录的错误。
    fn wait_stop(&mut self) -> Option<DownloadError> {
        let mut first_failure = None;
        for mut worker in self.workers.drain(..) {
            worker.wait_stop();
            if let Some(e) = worker.take_error() {
                first_failure.get_or_insert(e);
            }
        }
        first_failure
    }

    /// 便捷入口：`init` + `start_work`。
    pub fn run(
        &mut self,
        url: &str,
        protocol: ProtocolKind,
        output_path: &str,
    ) -> Result<(), DownloadError> {
        self.init(url, protocol, output_path)?;
        self.start_work()
    }
}
