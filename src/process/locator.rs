//! Turning a process selector into an open handle

use super::enumerator::{find_process_by_name, get_process_by_pid};
use super::handle::ProcessHandle;
use crate::core::types::{MemoryError, MemoryResult, NameMatch, ProcessId, ProcessInfo};
use tracing::debug;

/// Open the first running process named `name`, using the platform's default
/// name matching (see [`NameMatch::platform_default`])
///
/// The handle carries read, write and query rights. When several processes
/// share the name, the first one in snapshot order wins; that order is
/// whatever the OS reports and implies nothing about start time.
pub fn open_by_name(name: &str) -> MemoryResult<(ProcessHandle, ProcessInfo)> {
    open_by_name_with(name, NameMatch::platform_default())
}

/// [`open_by_name`] with an explicit matching policy
pub fn open_by_name_with(
    name: &str,
    policy: NameMatch,
) -> MemoryResult<(ProcessHandle, ProcessInfo)> {
    let info = find_process_by_name(name, policy)?
        .ok_or_else(|| MemoryError::NotFound(format!("no running process named '{}'", name)))?;

    debug!(pid = info.pid, name = %info.name, ?policy, "matched process by name");
    let handle = ProcessHandle::open_for_read_write(info.pid)?;
    Ok((handle, info))
}

/// Open a process by PID with read, write and query rights, skipping enumeration
pub fn open_by_id(pid: ProcessId) -> MemoryResult<ProcessHandle> {
    ProcessHandle::open_for_read_write(pid)
}

/// [`open_by_id`] plus the process descriptor, in the same shape as [`open_by_name`]
///
/// The handle is opened first, then the descriptor is looked up in a fresh
/// snapshot. A process that exits between the two steps is `NotFound` and
/// its handle is released.
pub fn open_by_id_with_info(pid: ProcessId) -> MemoryResult<(ProcessHandle, ProcessInfo)> {
    let handle = open_by_id(pid)?;
    match get_process_by_pid(pid)? {
        Some(info) => Ok((handle, info)),
        None => {
            handle.close()?;
            Err(MemoryError::NotFound(format!("PID {} has exited", pid)))
        }
    }
}
