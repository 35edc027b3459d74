/// worker 生命周期：`Created → Running → Terminated`，没有重试回退。
///
/// 启动失败的 worker 直接从 `Created` 进入 `Terminated`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Created,
    Running,
    Terminated,
}
