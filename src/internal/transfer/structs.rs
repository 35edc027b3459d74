pub mod probe_info;
pub mod protocol_kind;
pub mod transfer_error;

// 重导出公共类型
pub use probe_info::ProbeInfo;
pub use protocol_kind::{ProtocolKind, UnknownProtocol};
pub use transfer_error::TransferError;
