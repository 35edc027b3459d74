//! 测试模块入口：公共夹具在 `lib` 子模块，测试用例在 `internal`。

pub use lib::*;
