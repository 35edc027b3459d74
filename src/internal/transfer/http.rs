//! HTTP(S) 传输后端。
//!
//! - 探测：HEAD 请求取 `Content-Length` 与 `Accept-Ranges`，跟随重定向；
//! - 拉取：每个 worker 一个 [`HttpTransfer`]（独立的 reqwest 客户端即独立连接池），
//!   按 `Range: bytes=a-b` 请求并把响应体流式写入输出文件的对应位置。
//!
//! reqwest 客户端是异步的，worker 是普通 OS 线程，二者之间由 [`runtime`] 中的共享运行时衔接。

mod probe;
pub(crate) mod range_fetch;
mod runtime;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::runtime::Runtime;

use crate::internal::output_file::OutputFile;
use crate::internal::transfer::structs::{ProbeInfo, TransferError};
use crate::internal::transfer::traits::{Transfer, TransferBackend};

use probe::probe_metadata;
use range_fetch::{FetchRangeParams, fetch_range};

fn build_client(request_timeout: Option<Duration>) -> Result<Client, TransferError> {
    let mut builder = Client::builder().http1_only();
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(TransferError::ClientBuild)
}

/// HTTP 协议后端：持有共享运行时与探测用客户端。
pub struct HttpBackend {
    runtime: Arc<Runtime>,
    client: Client,
    request_timeout: Option<Duration>,
}

impl HttpBackend {
    /// 一次性初始化：创建运行时与探测客户端。
    pub fn bootstrap(request_timeout: Option<Duration>) -> Result<Self, TransferError> {
        let runtime = runtime::build_runtime()?;
        let client = build_client(request_timeout)?;
        Ok(Self {
            runtime,
            client,
            request_timeout,
        })
    }
}

impl TransferBackend for HttpBackend {
    fn probe(&self, url: &str) -> Result<ProbeInfo, TransferError> {
        self.runtime.block_on(probe_metadata(&self.client, url))
    }

    fn new_transfer(&self, url: &str) -> Box<dyn Transfer> {
        Box::new(HttpTransfer {
            url: url.to_string(),
            runtime: Arc::clone(&self.runtime),
            request_timeout: self.request_timeout,
            client: None,
        })
    }
}

/// 单个 worker 的 HTTP 传输实例；`init` 之后才持有客户端。
pub struct HttpTransfer {
    url: String,
    runtime: Arc<Runtime>,
    request_timeout: Option<Duration>,
    client: Option<Client>,
}

impl Transfer for HttpTransfer {
    fn init(&mut self) -> Result<(), TransferError> {
        self.client = Some(build_client(self.request_timeout)?);
        Ok(())
    }

    fn fetch(
        &self,
        output: &OutputFile,
        offset: u64,
        length: u64,
    ) -> Result<(), TransferError> {
        let client = self.client.as_ref().ok_or(TransferError::NotInitialized)?;
        self.runtime.block_on(fetch_range(FetchRangeParams {
            client,
            url: &self.url,
            output,
            offset,
            length,
        }))
    }
}
