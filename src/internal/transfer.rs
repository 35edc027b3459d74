//! 传输协作者：协议无关的接口、协议注册表，以及目前唯一的 HTTP 实现。
//!
//! 控制中心只依赖 [`traits`] 中的接口；具体协议由 [`structs::ProtocolKind`] 选择。

pub mod http;
pub mod structs;
pub mod traits;
