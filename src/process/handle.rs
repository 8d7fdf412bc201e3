//! Owned process handle with RAII release

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::sys;
use std::fmt;
use std::ops::BitOr;
use tracing::debug;

/// Access rights requested when opening a process
///
/// Values follow the Windows `PROCESS_*` access masks. On Linux `VM_READ` and
/// `VM_WRITE` select the open mode of `/proc/<pid>/mem`; the other rights are
/// implied by the kernel's ptrace access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAccess {
    value: u32,
}

impl ProcessAccess {
    /// Query basic process information
    pub const QUERY_INFORMATION: Self = Self { value: 0x0400 };
    /// Read memory
    pub const VM_READ: Self = Self { value: 0x0010 };
    /// Write memory
    pub const VM_WRITE: Self = Self { value: 0x0020 };
    /// Memory operations; `WriteProcessMemory` requires it alongside `VM_WRITE`
    pub const VM_OPERATION: Self = Self { value: 0x0008 };
    /// Wait on the process object; lets an open tell a live process from
    /// one that exited with code 259
    pub const SYNCHRONIZE: Self = Self { value: 0x0010_0000 };
    /// Rights used by the locator: read, write, basic query and synchronize
    pub const READ_WRITE: Self = Self {
        value: 0x0400 | 0x0010 | 0x0020 | 0x0008 | 0x0010_0000,
    };

    /// Combine access rights
    pub fn combine(rights: &[Self]) -> Self {
        rights.iter().fold(Self { value: 0 }, |acc, &right| acc | right)
    }

    /// Whether every bit of `other` is present
    pub const fn contains(&self, other: Self) -> bool {
        self.value & other.value == other.value
    }

    /// Get raw value
    pub const fn value(&self) -> u32 {
        self.value
    }
}

impl BitOr for ProcessAccess {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            value: self.value | rhs.value,
        }
    }
}

/// An open, rights-bearing reference to another process
///
/// The caller owns the handle. It is released exactly once: either through
/// [`close`](Self::close), which reports failure, or when the value is
/// dropped. Nothing checks that the target is still alive; a dead target is
/// discovered when a transfer fails.
pub struct ProcessHandle {
    inner: sys::RawProcess,
    pid: ProcessId,
    access: ProcessAccess,
}

impl ProcessHandle {
    /// Open a process with specified access rights
    pub fn open(pid: ProcessId, access: ProcessAccess) -> MemoryResult<Self> {
        let inner = sys::RawProcess::open(pid, access)?;
        debug!(pid, access = %format!("0x{:X}", access.value()), "opened process handle");
        Ok(ProcessHandle { inner, pid, access })
    }

    /// Open a process for reading memory
    pub fn open_for_read(pid: ProcessId) -> MemoryResult<Self> {
        Self::open(
            pid,
            ProcessAccess::QUERY_INFORMATION | ProcessAccess::VM_READ,
        )
    }

    /// Open a process for reading and writing memory
    pub fn open_for_read_write(pid: ProcessId) -> MemoryResult<Self> {
        Self::open(pid, ProcessAccess::READ_WRITE)
    }

    /// Get the process ID
    pub fn pid(&self) -> ProcessId {
        self.pid
    }

    /// Get the access rights requested at open time
    pub fn access(&self) -> ProcessAccess {
        self.access
    }

    /// Get the raw handle
    ///
    /// # Safety
    /// The returned handle is only valid as long as this ProcessHandle exists
    /// and must not be closed by the caller.
    #[cfg(windows)]
    pub unsafe fn raw(&self) -> winapi::um::winnt::HANDLE {
        self.inner.raw()
    }

    /// Issue one OS read at `address`, returning the number of bytes copied
    ///
    /// This is the raw primitive: a short count is returned as-is. The
    /// accessor functions in [`crate::memory`] turn short counts into errors.
    pub fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        self.inner.read(address, buffer)
    }

    /// Issue one OS write at `address`, returning the number of bytes copied
    pub fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        self.inner.write(address, data)
    }

    /// Release the handle now, reporting failure
    pub fn close(self) -> MemoryResult<()> {
        let pid = self.pid;
        self.inner.close()?;
        debug!(pid, "closed process handle");
        Ok(())
    }
}

impl fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("pid", &self.pid)
            .field("access", &format!("0x{:X}", self.access.value()))
            .finish()
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessHandle(pid={})", self.pid)
    }
}
