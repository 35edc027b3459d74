use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::internal::transfer::http::HttpBackend;
use crate::internal::transfer::structs::TransferError;
use crate::internal::transfer::traits::TransferBackend;

/// 传输协议种类；每个变体对应一个 [`TransferBackend`] 实现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProtocolKind {
    /// HTTP / HTTPS
    #[default]
    Http,
}

impl ProtocolKind {
    /// 构建该协议的后端，协议需要的一次性全局初始化在这里完成。
    pub fn backend(
        &self,
        request_timeout: Option<Duration>,
    ) -> Result<Arc<dyn TransferBackend>, TransferError> {
        match self {
            ProtocolKind::Http => Ok(Arc::new(HttpBackend::bootstrap(request_timeout)?)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolKind::Http => "HTTP",
        }
    }
}

impl fmt::Display for ProtocolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 无法识别的协议名。
#[derive(Debug, Clone, Error)]
#[error("不支持的协议: {0}")]
pub struct UnknownProtocol(pub String);

impl FromStr for ProtocolKind {
    type Err = UnknownProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HTTP" | "HTTPS" => Ok(ProtocolKind::Http),
            _ => Err(UnknownProtocol(s.to_string())),
        }
    }
}
