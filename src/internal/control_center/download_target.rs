use std::path::PathBuf;

use crate::internal::transfer::structs::{ProbeInfo, ProtocolKind};

/// 本次下载的目标：初始化时创建，探测完成后不再变化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    pub url: String,
    pub protocol: ProtocolKind,
    /// 输出文件名（取输出路径的最后一段）
    pub file_name: String,
    /// 输出文件完整路径（输出目录 + 文件名）
    pub path: PathBuf,
    /// 文件总大小（字节）
    pub size: u64,
    /// 服务器是否支持 Range 请求
    pub supports_range: bool,
}

impl DownloadTarget {
    pub fn probe_info(&self) -> ProbeInfo {
        ProbeInfo {
            size: self.size,
            supports_range: self.supports_range,
        }
    }
}

/// 取路径的最后一段作为文件名；没有分隔符时原样返回。
pub fn derive_file_name(output_path: &str) -> &str {
    match output_path.rfind(['/', '\\']) {
        Some(pos) => &output_path[pos + 1..],
        None => output_path,
    }
}
