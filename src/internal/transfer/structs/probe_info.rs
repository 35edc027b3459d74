/// 元数据探测结果：文件总大小，以及服务器是否支持 Range 请求。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProbeInfo {
    /// 文件总大小（字节）
    pub size: u64,
    /// 服务器是否支持按字节区间下载
    pub supports_range: bool,
}
