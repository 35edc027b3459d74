//! HTTP 后端测试：基于本地 wiremock 服务，覆盖探测、Range 拉取与完整下载。
//!
//! 测试函数本身是同步的：控制中心会在 worker 线程上 `block_on`，不能放进已有运行时。

use std::collections::HashSet;
use std::fs;
use std::num::NonZeroUsize;
use std::str::FromStr;

use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::output_file::OutputFile;
use crate::tests::{RangeResponder, http_fixture, random_payload};
use crate::transfer::{HttpBackend, ProbeInfo, Transfer, TransferBackend, TransferError};
use crate::{ControlCenter, DownloadConfig, DownloadError, ProtocolKind};

fn config(dir: &TempDir, units: usize, chunk_size: u64) -> DownloadConfig {
    DownloadConfig::default()
        .output_dir(dir.path())
        .parallelism(NonZeroUsize::new(units).unwrap())
        .chunk_size(chunk_size)
}

// ═══════════════════════════ 协议注册表 ═══════════════════════════

#[test]
fn protocol_names_parse_case_insensitively() {
    assert_eq!(ProtocolKind::from_str("http").unwrap(), ProtocolKind::Http);
    assert_eq!(ProtocolKind::from_str("HTTPS").unwrap(), ProtocolKind::Http);
    assert_eq!(ProtocolKind::Http.to_string(), "HTTP");
    assert!(ProtocolKind::from_str("ftp").is_err());
}

// ═══════════════════════════ 探测 ═══════════════════════════

#[test]
fn probe_reads_size_and_range_support() {
    let fx = http_fixture();
    fx.mount_file("/a.bin", true, RangeResponder::new(random_payload(1234)));

    let backend = HttpBackend::bootstrap(None).unwrap();
    let info = backend.probe(&fx.url("/a.bin")).unwrap();
    assert_eq!(
        info,
        ProbeInfo {
            size: 1234,
            supports_range: true
        }
    );
}

#[test]
fn probe_without_accept_ranges() {
    let fx = http_fixture();
    fx.mount_file("/plain.bin", false, RangeResponder::new(random_payload(64)));

    let backend = HttpBackend::bootstrap(None).unwrap();
    let info = backend.probe(&fx.url("/plain.bin")).unwrap();
    assert_eq!(info.size, 64);
    assert!(!info.supports_range);
}

#[test]
fn probe_follows_redirects() {
    let fx = http_fixture();
    fx.mount_file("/real.bin", true, RangeResponder::new(random_payload(300)));
    let location = fx.url("/real.bin");
    fx.block_on(async {
        Mock::given(method("HEAD"))
            .and(path("/moved.bin"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", location.as_str()))
            .mount(&fx.server)
            .await;
    });

    let backend = HttpBackend::bootstrap(None).unwrap();
    let info = backend.probe(&fx.url("/moved.bin")).unwrap();
    assert_eq!(info.size, 300);
    assert!(info.supports_range);
}

#[test]
fn probe_error_status_fails_init() {
    let fx = http_fixture();
    let dir = TempDir::new().unwrap();

    let mut center = ControlCenter::new(config(&dir, 1, 16));
    let err = center
        .init(&fx.url("/missing.bin"), ProtocolKind::Http, "missing.bin")
        .unwrap_err();

    match err {
        DownloadError::Probe(TransferError::Status(status)) => assert_eq!(status.as_u16(), 404),
        other => panic!("预期 Probe(Status(404))，得到 {other:?}"),
    }
    assert!(!dir.path().join("missing.bin").exists());
}

// ═══════════════════════════ 单个 Transfer ═══════════════════════════

#[test]
fn fetch_before_init_is_rejected() {
    let fx = http_fixture();
    let dir = TempDir::new().unwrap();
    let output = OutputFile::create(dir.path().join("x.bin")).unwrap();

    let backend = HttpBackend::bootstrap(None).unwrap();
    let transfer = backend.new_transfer(&fx.url("/x.bin"));
    let err = transfer.fetch(&output, 0, 4).unwrap_err();
    assert!(matches!(err, TransferError::NotInitialized));
}

#[test]
fn fetch_writes_exact_range() {
    let fx = http_fixture();
    let payload = random_payload(100);
    fx.mount_file("/r.bin", true, RangeResponder::new(payload.clone()));

    let dir = TempDir::new().unwrap();
    let output = OutputFile::create(dir.path().join("r.bin")).unwrap();
    let backend = HttpBackend::bootstrap(None).unwrap();
    let mut transfer = backend.new_transfer(&fx.url("/r.bin"));
    transfer.init().unwrap();

    transfer.fetch(&output, 40, 20).unwrap();
    transfer.fetch(&output, 60, 40).unwrap();

    let written = fs::read(dir.path().join("r.bin")).unwrap();
    assert_eq!(written.len(), 100);
    assert!(written[..40].iter().all(|&b| b == 0), "区间之外不应被写入");
    assert_eq!(&written[40..], &payload[40..]);
}

#[test]
fn short_body_is_an_error() {
    let fx = http_fixture();
    fx.block_on(async {
        Mock::given(method("GET"))
            .and(path("/short.bin"))
            .respond_with(ResponseTemplate::new(206).set_body_bytes(b"ab".to_vec()))
            .mount(&fx.server)
            .await;
    });

    let dir = TempDir::new().unwrap();
    let output = OutputFile::create(dir.path().join("short.bin")).unwrap();
    let backend = HttpBackend::bootstrap(None).unwrap();
    let mut transfer = backend.new_transfer(&fx.url("/short.bin"));
    transfer.init().unwrap();

    let err = transfer.fetch(&output, 0, 4).unwrap_err();
    assert!(matches!(
        err,
        TransferError::ShortBody {
            expected: 4,
            received: 2
        }
    ));
}

#[test]
fn full_body_at_nonzero_offset_is_rejected() {
    let fx = http_fixture();
    let mut responder = RangeResponder::new(random_payload(32));
    responder.ignore_range = true;
    fx.mount_file("/norange.bin", false, responder);

    let dir = TempDir::new().unwrap();
    let output = OutputFile::create(dir.path().join("n.bin")).unwrap();
    let backend = HttpBackend::bootstrap(None).unwrap();
    let mut transfer = backend.new_transfer(&fx.url("/norange.bin"));
    transfer.init().unwrap();

    let err = transfer.fetch(&output, 8, 8).unwrap_err();
    assert!(matches!(err, TransferError::RangeIgnored { offset: 8 }));
}

// ═══════════════════════════ 完整下载 ═══════════════════════════

#[test]
fn download_with_ranges_matches_source() {
    let fx = http_fixture();
    let payload = random_payload(256 * 1024 + 3);
    fx.mount_file("/big.bin", true, RangeResponder::new(payload.clone()));

    let dir = TempDir::new().unwrap();
    let mut center = ControlCenter::new(config(&dir, 2, 16 * 1024));
    center
        .run(&fx.url("/big.bin"), ProtocolKind::Http, "big.bin")
        .unwrap();

    assert_eq!(center.determine_worker_count(), 4);
    assert_eq!(fs::read(dir.path().join("big.bin")).unwrap(), payload);
    assert_eq!(center.progress().get_current().unwrap().bytes_done, payload.len() as u64);
}

#[test]
fn download_without_range_support_uses_single_request() {
    let fx = http_fixture();
    let payload = random_payload(40 * 1024);
    let mut responder = RangeResponder::new(payload.clone());
    responder.ignore_range = true;
    fx.mount_file("/whole.bin", false, responder);

    let dir = TempDir::new().unwrap();
    let mut center = ControlCenter::new(config(&dir, 8, 1024));
    center
        .run(&fx.url("/whole.bin"), ProtocolKind::Http, "whole.bin")
        .unwrap();

    assert_eq!(fs::read(dir.path().join("whole.bin")).unwrap(), payload);

    let gets = fx
        .block_on(fx.server.received_requests())
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.method.as_str() == "GET")
        .count();
    assert_eq!(gets, 1);
}

#[test]
fn failing_range_keeps_other_bytes() {
    let fx = http_fixture();
    let payload = b"0123456789".to_vec();
    let mut responder = RangeResponder::new(payload.clone());
    responder.fail_offsets = HashSet::from([5]);
    fx.mount_file("/ten.bin", true, responder);

    let dir = TempDir::new().unwrap();
    // 2 个 worker：[0,4) [4,5) | [5,9) [9,10)
    let mut center = ControlCenter::new(config(&dir, 1, 4));
    let err = center
        .run(&fx.url("/ten.bin"), ProtocolKind::Http, "ten.bin")
        .unwrap_err();

    match err {
        DownloadError::Fetch {
            worker: 1,
            offset: 5,
            source: TransferError::Status(status),
            ..
        } => assert_eq!(status.as_u16(), 500),
        other => panic!("预期 worker 1 的 Fetch 错误，得到 {other:?}"),
    }

    let written = fs::read(dir.path().join("ten.bin")).unwrap();
    assert_eq!(&written[0..5], &payload[0..5]);
}

#[test]
fn rerun_reuses_backend_and_reproduces_file() {
    let fx = http_fixture();
    let payload = random_payload(8 * 1024);
    fx.mount_file("/again.bin", true, RangeResponder::new(payload.clone()));

    let dir = TempDir::new().unwrap();
    let mut center = ControlCenter::new(config(&dir, 2, 1024));
    let url = fx.url("/again.bin");

    center.run(&url, ProtocolKind::Http, "again.bin").unwrap();
    let first = fs::read(dir.path().join("again.bin")).unwrap();
    center.run(&url, ProtocolKind::Http, "again.bin").unwrap();
    let second = fs::read(dir.path().join("again.bin")).unwrap();

    assert_eq!(first, payload);
    assert_eq!(first, second);
}
