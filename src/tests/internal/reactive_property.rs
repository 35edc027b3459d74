//! 响应式属性测试：基础读写、watch 监听、多线程累加、销毁通知。

use std::thread;
use std::time::{Duration, Instant};

use tokio::time::timeout;

use crate::DownloadProgress;
use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

// ═══════════════════════════ 功能测试 ═══════════════════════════

#[tokio::test]
async fn basic_update_and_read() {
    let prop = UnlockReactiveProperty::new(0u64);
    prop.update(42);
    assert_eq!(prop.get_current().unwrap(), 42);

    prop.update_field(|v| *v += 8);
    assert_eq!(prop.get_current().unwrap(), 50);
    assert_eq!(prop.get_or_default(), 50);
}

#[tokio::test]
async fn watch_receives_updates() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    prop.update(1);
    assert_eq!(watcher.changed().await.unwrap(), 1);

    prop.update(2);
    assert_eq!(watcher.changed().await.unwrap(), 2);
    assert_eq!(watcher.borrow(), Some(2));
}

#[tokio::test]
async fn watcher_sees_progress_from_worker_thread() {
    let prop = UnlockReactiveProperty::new(DownloadProgress {
        bytes_done: 0,
        total: Some(300),
    });
    let mut watcher = prop.watch();

    // 写端是普通线程，和 worker 一样
    let writer = {
        let p = prop.clone();
        thread::spawn(move || {
            for _ in 0..3 {
                thread::sleep(Duration::from_millis(10));
                p.update_field(|s| s.bytes_done += 100);
            }
        })
    };

    loop {
        let state = timeout(Duration::from_secs(2), watcher.changed())
            .await
            .expect("应在超时前收到进度")
            .unwrap();
        if state.bytes_done == 300 {
            assert_eq!(state.pct(), 100.0);
            break;
        }
    }
    writer.join().unwrap();
}

#[tokio::test]
async fn watcher_closed_after_property_dropped() {
    let prop = UnlockReactiveProperty::new(1u8);
    let mut watcher = prop.watch();
    drop(prop);

    let err = watcher.changed().await.unwrap_err();
    assert!(matches!(err, UnlockReactivePropertyError::WatcherClosed));
    assert_eq!(watcher.borrow(), None);
}

// ═══════════════════════════ 并发 ═══════════════════════════

/// 多个线程同时 `update_field` 不会丢失累加。
#[test]
fn concurrent_update_field_is_lossless() {
    const THREADS: u64 = 8;
    const PER_THREAD: u64 = 10_000;

    let prop = UnlockReactiveProperty::new(0u64);
    let start = Instant::now();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let p = prop.clone();
            thread::spawn(move || {
                for _ in 0..PER_THREAD {
                    p.update_field(|v| *v += 1);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    println!(
        "\n── 并发累加 ({THREADS} 线程 × {PER_THREAD} 次) : {:?}",
        start.elapsed()
    );
    assert_eq!(prop.get_current().unwrap(), THREADS * PER_THREAD);
}
