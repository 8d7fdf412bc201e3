//! errno mapping onto the crate's error taxonomy

use crate::core::types::{Address, MemoryError, ProcessId};
use std::io;

/// Maps a failure to open or inspect `/proc/<pid>`
pub fn open_error(pid: ProcessId, err: io::Error) -> MemoryError {
    let target = format!("PID {}", pid);
    match err.raw_os_error() {
        Some(libc::ENOENT) | Some(libc::ESRCH) => MemoryError::NotFound(target),
        _ if err.kind() == io::ErrorKind::NotFound => MemoryError::NotFound(target),
        _ => MemoryError::access_denied(target, err.to_string()),
    }
}

/// Maps a failed memory transfer that moved no bytes
///
/// `/proc/<pid>/mem` reports unmapped ranges as `EIO`.
pub fn transfer_error(address: Address, err: io::Error) -> MemoryError {
    match err.raw_os_error() {
        Some(libc::EBADF) => MemoryError::access_denied(
            address,
            "handle was not opened with the rights this transfer needs",
        ),
        Some(libc::ESRCH) => {
            MemoryError::InvalidHandle(format!("target process is gone: {}", err))
        }
        Some(libc::EIO) | Some(libc::EFAULT) => {
            MemoryError::access_denied(address, format!("address not accessible: {}", err))
        }
        _ => MemoryError::access_denied(address, err.to_string()),
    }
}
