pub mod transfer;

pub use transfer::{Transfer, TransferBackend};
