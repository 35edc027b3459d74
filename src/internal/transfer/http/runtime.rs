//! HTTP 后端的一次性全局初始化：驱动 reqwest 异步客户端的 tokio 运行时。
//!
//! 生命周期：`ControlCenter::init` 中创建一次，以 `Arc` 共享给后端与每个 worker 的传输实例，
//! 最后一个持有者（控制中心）释放时销毁一次。worker 线程通过 `block_on` 在自身线程上驱动请求，
//! 运行时的工作线程只负责 IO 驱动与连接池后台任务。

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::internal::transfer::structs::TransferError;

/// IO 驱动线程数；请求本身在 worker 线程上执行，这里不需要太多。
const IO_THREADS: usize = 2;

pub(crate) fn build_runtime() -> Result<Arc<Runtime>, TransferError> {
    let runtime = Builder::new_multi_thread()
        .worker_threads(IO_THREADS)
        .thread_name("range-fetch-io")
        .enable_all()
        .build()
        .map_err(TransferError::Runtime)?;
    Ok(Arc::new(runtime))
}
