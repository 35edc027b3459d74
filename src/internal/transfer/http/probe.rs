//! 元数据探测：HEAD 请求，只取大小与 Range 支持情况，自动跟随重定向。

use reqwest::Client;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, HeaderMap};
use tracing::debug;

use crate::internal::transfer::structs::{ProbeInfo, TransferError};

/// 发起 HEAD 请求并解析 `Content-Length` 与 `Accept-Ranges`。
pub(super) async fn probe_metadata(
    client: &Client,
    url: &str,
) -> Result<ProbeInfo, TransferError> {
    let resp = client.head(url).send().await?;
    if !resp.status().is_success() {
        return Err(TransferError::Status(resp.status()));
    }

    let headers = resp.headers();
    let size = content_length(headers)?;
    let supports_range = accepts_byte_ranges(headers);
    if supports_range {
        debug!(url = %resp.url(), "服务器支持 Range 下载");
    }

    Ok(ProbeInfo { size, supports_range })
}

fn content_length(headers: &HeaderMap) -> Result<u64, TransferError> {
    let raw = headers
        .get(CONTENT_LENGTH)
        .ok_or(TransferError::MissingContentLength)?
        .to_str()
        .map_err(|e| TransferError::InvalidContentLength(e.to_string()))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| TransferError::InvalidContentLength(raw.to_string()))
}

/// `Accept-Ranges` 中出现 `bytes`（不区分大小写）即认为支持。
fn accepts_byte_ranges(headers: &HeaderMap) -> bool {
    headers.get_all(ACCEPT_RANGES).iter().any(|value| {
        value.to_str().is_ok_and(|v| {
            v.split(',')
                .any(|unit| unit.trim().eq_ignore_ascii_case("bytes"))
        })
    })
}
