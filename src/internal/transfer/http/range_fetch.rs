//! 单段 Range 下载：发起请求、流式读块、按位置写入输出文件。

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::RANGE;
use reqwest::{Client, StatusCode};

use crate::internal::output_file::OutputFile;
use crate::internal::transfer::structs::TransferError;

/// 生成单个 Range 请求头：`bytes=start-(end-1)`，end 为不含上界。
pub(crate) fn range_header(start: u64, end: u64) -> String {
    let end_inclusive = end.saturating_sub(1);
    format!("bytes={}-{}", start, end_inclusive)
}

/// 拉取单段区间时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct FetchRangeParams<'a> {
    pub client: &'a Client,
    pub url: &'a str,
    pub output: &'a OutputFile,
    pub offset: u64,
    pub length: u64,
}

/// 区间内的写入游标：记录已写字节数，保证不越过区间上界。
struct RangeCursor {
    offset: u64,
    length: u64,
    written: u64,
}

impl RangeCursor {
    fn remaining(&self) -> u64 {
        self.length - self.written
    }

    /// 写入一块数据，超出区间的部分直接丢弃。
    fn write_chunk(
        &mut self,
        output: &OutputFile,
        chunk: Bytes,
    ) -> Result<(), TransferError> {
        let take = (chunk.len() as u64).min(self.remaining()) as usize;
        if take == 0 {
            return Ok(());
        }
        output
            .write_at(self.offset + self.written, &chunk[..take])
            .map_err(TransferError::WriteFile)?;
        self.written += take as u64;
        Ok(())
    }
}

/// 执行单段 Range 下载，恰好写入 `length` 字节。
///
/// 接受 `206`；`200` 仅在 `offset == 0` 时接受（服务器忽略 Range 返回整文件，前 `length` 字节仍然正确）。
pub(super) async fn fetch_range(
    params: FetchRangeParams<'_>,
) -> Result<(), TransferError> {
    if params.length == 0 {
        return Ok(());
    }

    let range = range_header(params.offset, params.offset + params.length);
    let resp = params
        .client
        .get(params.url)
        .header(RANGE, range)
        .send()
        .await?;

    match resp.status() {
        StatusCode::PARTIAL_CONTENT => {}
        StatusCode::OK if params.offset == 0 => {}
        StatusCode::OK => {
            return Err(TransferError::RangeIgnored {
                offset: params.offset,
            });
        }
        status => return Err(TransferError::Status(status)),
    }

    let mut cursor = RangeCursor {
        offset: params.offset,
        length: params.length,
        written: 0,
    };
    let mut stream = resp.bytes_stream();

    while cursor.remaining() > 0 {
        match stream.next().await {
            Some(chunk) => cursor.write_chunk(params.output, chunk?)?,
            None => break,
        }
    }

    if cursor.remaining() > 0 {
        return Err(TransferError::ShortBody {
            expected: params.length,
            received: cursor.written,
        });
    }

    Ok(())
}
