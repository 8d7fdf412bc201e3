//! Process object backed by an `OpenProcess` handle

use crate::core::types::{Address, MemoryError, MemoryResult, ProcessId};
use crate::process::ProcessAccess;
use crate::windows::bindings::kernel32;
use crate::windows::types::Handle;
use winapi::um::winnt::HANDLE;

/// An open process handle with the rights requested at open time
pub struct RawProcess {
    handle: Handle,
}

impl RawProcess {
    /// Open `pid` requesting `access`
    ///
    /// A process that has exited but whose kernel object is still referenced
    /// elsewhere opens successfully on Windows; with query rights that case is
    /// detected and reported as not found.
    pub fn open(pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self> {
        let handle = Handle::new(kernel32::open_process(pid, access.value())?);

        if access.contains(ProcessAccess::QUERY_INFORMATION)
            && !unsafe { kernel32::is_process_running(handle.raw())? }
        {
            handle.close()?;
            return Err(MemoryError::NotFound(format!("PID {} has exited", pid)));
        }

        Ok(RawProcess { handle })
    }

    /// One `ReadProcessMemory` call
    pub fn read(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        unsafe { kernel32::read_process_memory(self.handle.raw(), address, buffer) }
    }

    /// One `WriteProcessMemory` call
    pub fn write(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        unsafe { kernel32::write_process_memory(self.handle.raw(), address, data) }
    }

    /// Release the handle, reporting `CloseHandle` failure
    pub fn close(self) -> MemoryResult<()> {
        self.handle.close()
    }

    /// Raw handle; only valid while `self` is alive
    pub fn raw(&self) -> HANDLE {
        self.handle.raw()
    }
}
