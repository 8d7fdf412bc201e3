//! Process object backed by `/proc/<pid>/mem`

use super::{errno, procfs};
use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::process::ProcessAccess;
use std::fs::{File, OpenOptions};
use std::os::unix::fs::FileExt;

/// An open `/proc/<pid>/mem` file with the rights requested at open time
///
/// Transfers use positioned I/O, so one handle may be shared across threads
/// without a shared file cursor.
pub struct RawProcess {
    mem: Option<File>,
}

impl RawProcess {
    /// Open `pid` requesting `access`
    ///
    /// `VM_READ` and `VM_WRITE` map to the open mode of the `mem` file; the
    /// kernel applies its ptrace access check at open time. Query-only
    /// handles open no file and only confirm the process is alive.
    pub fn open(pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self> {
        let read = access.contains(ProcessAccess::VM_READ);
        let write = access.contains(ProcessAccess::VM_WRITE);

        let mem = if read || write {
            let file = OpenOptions::new()
                .read(read)
                .write(write)
                .open(format!("/proc/{}/mem", pid))
                .map_err(|e| errno::open_error(pid, e))?;
            Some(file)
        } else {
            None
        };

        // A zombie keeps its /proc entry but has no address space left
        let stat = procfs::read_stat(pid).map_err(|e| errno::open_error(pid, e))?;
        if stat.has_exited() {
            return Err(MemoryError::NotFound(format!("PID {} has exited", pid)));
        }

        Ok(RawProcess { mem })
    }

    fn mem(&self, address: Address) -> MemoryResult<&File> {
        self.mem.as_ref().ok_or_else(|| {
            MemoryError::access_denied(address, "handle was opened without memory access rights")
        })
    }

    /// One positioned read
    pub fn read(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.mem(address)?
            .read_at(buffer, address.as_u64())
            .map_err(|e| errno::transfer_error(address, e))
    }

    /// One positioned write
    pub fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        self.mem(address)?
            .write_at(data, address.as_u64())
            .map_err(|e| errno::transfer_error(address, e))
    }

    /// Release the file descriptor
    pub fn close(self) -> MemoryResult<()> {
        drop(self.mem);
        Ok(())
    }
}
