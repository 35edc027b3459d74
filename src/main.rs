//! range-fetch 命令行入口。

mod cli;

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use range_fetch::states::unlock_reactive::UnlockReactiveProperty;
use range_fetch::{ControlCenter, DownloadProgress};
use tracing::{debug, info};

use cli::Args;

const PROGRESS_TICK: Duration = Duration::from_millis(100);

fn main() -> ExitCode {
    // 先解析参数，--help 不需要日志
    let args = Args::parse();

    // RUST_LOG 优先于 -v / -q
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "命令行参数");

    let output_name = args.output_name();
    info!(url = %args.url, output = %output_name, protocol = %args.protocol, "开始下载");

    let mut center = ControlCenter::new(args.to_config());
    let progress = center.progress();
    let done = AtomicBool::new(false);

    let result = thread::scope(|scope| {
        if !args.no_progress && !args.quiet {
            scope.spawn(|| render_progress(&progress, &done));
        }
        let result = center.run(&args.url, args.protocol, &output_name);
        done.store(true, Ordering::Release);
        result
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("下载失败: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

/// 轮询进度属性并刷新进度条，直到下载结束。
fn render_progress(progress: &UnlockReactiveProperty<DownloadProgress>, done: &AtomicBool) {
    let pb = ProgressBar::new(0);
    let style = ProgressStyle::with_template(
        "{msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})",
    )
    .map(|s| s.progress_chars("=>-"))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message("下载中");

    while !done.load(Ordering::Acquire) {
        let current = progress.get_or_default();
        if let Some(total) = current.total {
            pb.set_length(total);
        }
        pb.set_position(current.bytes_done);
        thread::sleep(PROGRESS_TICK);
    }

    let last = progress.get_or_default();
    pb.set_position(last.bytes_done);
    pb.finish_with_message("结束");
}
