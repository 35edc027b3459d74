//! 传输层错误类型：单个后端在探测、初始化、拉取分片时可能出现的错误。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransferError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("创建 HTTP 客户端失败: {0}")]
    ClientBuild(reqwest::Error),

    #[error("创建传输运行时失败: {0}")]
    Runtime(std::io::Error),

    #[error("服务器返回异常状态码: {0}")]
    Status(reqwest::StatusCode),

    #[error("响应头中缺少 Content-Length")]
    MissingContentLength,

    #[error("无法解析 Content-Length: {0}")]
    InvalidContentLength(String),

    #[error("服务器忽略了 Range 请求，偏移 {offset} 处返回了整文件")]
    RangeIgnored { offset: u64 },

    #[error("响应体过短：期望 {expected} 字节，实际 {received} 字节")]
    ShortBody { expected: u64, received: u64 },

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("传输尚未初始化")]
    NotInitialized,
}
