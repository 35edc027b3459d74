//! 输出文件：整个下载过程只打开一次，所有 worker 通过位置写入（按绝对偏移）共享同一个句柄。
//!
//! 各 worker 负责的字节区间在分区阶段就已互不重叠，因此写入时无需加锁。

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// 以「创建 + 截断 + 只写」方式打开的输出文件。
///
/// 由控制中心持有，worker 与 job 只持有 `Arc` 克隆；最后一个引用释放时关闭文件。
#[derive(Debug)]
pub struct OutputFile {
    path: PathBuf,
    file: File,
}

impl OutputFile {
    /// 创建（或截断）输出文件。
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        Ok(Self { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 把 `buf` 完整写到文件的 `offset` 处，不移动共享的文件游标。
    pub fn write_at(&self, offset: u64, buf: &[u8]) -> io::Result<()> {
        write_all_at(&self.file, offset, buf)
    }

    /// 已写入的最大偏移决定文件长度；`start_work` 关闭文件前会记录它。
    pub fn len(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[cfg(unix)]
fn write_all_at(file: &File, offset: u64, buf: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::FileExt;
    file.write_all_at(buf, offset)
}

#[cfg(windows)]
fn write_all_at(file: &File, mut offset: u64, mut buf: &[u8]) -> io::Result<()> {
    use std::os::windows::fs::FileExt;
    while !buf.is_empty() {
        match file.seek_write(buf, offset) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "写入 0 字节",
                ));
            }
            Ok(n) => {
                buf = &buf[n..];
                offset += n as u64;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
