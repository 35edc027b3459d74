//! 命令行参数。

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use range_fetch::partition::DEFAULT_CHUNK_SIZE;
use range_fetch::{DownloadConfig, ProtocolKind};
use url::Url;

/// 多线程分段下载：按字节区间并行拉取，直接写入输出文件的最终位置。
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// 要下载的 URL
    pub url: String,

    /// 输出文件名；只取最后一段路径，默认取 URL 路径的最后一段
    #[arg(short, long)]
    pub output: Option<String>,

    /// 输出目录
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// 传输协议
    #[arg(short, long, default_value = "http")]
    pub protocol: ProtocolKind,

    /// 分片大小（字节）
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: u64,

    /// 参与 worker 数量计算的处理单元数，默认取 CPU 数
    #[arg(long)]
    pub parallelism: Option<NonZeroUsize>,

    /// 单个请求的超时秒数，默认不限
    #[arg(long)]
    pub timeout: Option<u64>,

    /// worker 线程栈大小（字节），默认使用标准库默认值
    #[arg(long)]
    pub worker_stack_size: Option<usize>,

    /// 不显示进度条
    #[arg(long)]
    pub no_progress: bool,

    /// 输出更多日志（-v debug，-vv trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// 只输出错误日志
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn to_config(&self) -> DownloadConfig {
        let mut config = DownloadConfig::default()
            .chunk_size(self.chunk_size)
            .output_dir(self.output_dir.clone());
        if let Some(units) = self.parallelism {
            config = config.parallelism(units);
        }
        if let Some(secs) = self.timeout {
            config = config.request_timeout(Duration::from_secs(secs));
        }
        if let Some(bytes) = self.worker_stack_size {
            config = config.worker_stack_size(bytes);
        }
        config
    }

    pub fn output_name(&self) -> String {
        match &self.output {
            Some(output) => output.clone(),
            None => default_output_name(&self.url),
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// URL 路径的最后一段；取不到时用 `index.html`。
pub fn default_output_name(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "index.html".to_string())
}
