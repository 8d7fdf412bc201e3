//! Process enumeration over a point-in-time system snapshot

use crate::core::types::{MemoryResult, NameMatch, ProcessId, ProcessInfo};
use crate::sys;
use tracing::debug;

/// Streaming view of one process snapshot
///
/// The snapshot is taken when the enumerator is created; entries come out in
/// OS-defined order. On Linux the PID list is fixed at creation and each
/// descriptor is read as the iterator reaches it.
pub struct ProcessEnumerator {
    snapshot: sys::ProcessSnapshot,
}

impl ProcessEnumerator {
    /// Take a new snapshot
    pub fn new() -> MemoryResult<Self> {
        Ok(ProcessEnumerator {
            snapshot: sys::ProcessSnapshot::new()?,
        })
    }
}

impl Iterator for ProcessEnumerator {
    type Item = MemoryResult<ProcessInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        self.snapshot.next()
    }
}

/// Enumerate all running processes
pub fn enumerate_processes() -> MemoryResult<Vec<ProcessInfo>> {
    let processes = ProcessEnumerator::new()?.collect::<MemoryResult<Vec<_>>>()?;
    debug!(count = processes.len(), "enumerated processes");
    Ok(processes)
}

/// Find every process whose name matches `name` under `policy`, in snapshot order
pub fn find_processes_by_name(name: &str, policy: NameMatch) -> MemoryResult<Vec<ProcessInfo>> {
    let processes = enumerate_processes()?;
    Ok(processes
        .into_iter()
        .filter(|p| p.name_matches(name, policy))
        .collect())
}

/// Find the first process in snapshot order whose name matches
pub fn find_process_by_name(name: &str, policy: NameMatch) -> MemoryResult<Option<ProcessInfo>> {
    for process in ProcessEnumerator::new()? {
        let process = process?;
        if process.name_matches(name, policy) {
            return Ok(Some(process));
        }
    }
    Ok(None)
}

/// Get a process descriptor by PID
pub fn get_process_by_pid(pid: ProcessId) -> MemoryResult<Option<ProcessInfo>> {
    for process in ProcessEnumerator::new()? {
        let process = process?;
        if process.pid == pid {
            return Ok(Some(process));
        }
    }
    Ok(None)
}
