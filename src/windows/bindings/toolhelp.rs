//! ToolHelp32 process snapshot

use crate::core::types::{MemoryError, MemoryResult, ProcessInfo};
use crate::windows::types::Handle;
use crate::windows::utils::{wide_to_string, ErrorCode};
use std::mem;
use winapi::shared::minwindef::FALSE;
use winapi::um::handleapi::INVALID_HANDLE_VALUE;
use winapi::um::tlhelp32::{
    CreateToolhelp32Snapshot, Process32FirstW, Process32NextW, PROCESSENTRY32W,
    TH32CS_SNAPPROCESS,
};

/// A system-wide process snapshot, walked one entry at a time
pub struct ProcessSnapshot {
    snapshot: Handle,
    started: bool,
    finished: bool,
}

impl ProcessSnapshot {
    /// Take a snapshot of every running process
    pub fn new() -> MemoryResult<Self> {
        let raw = unsafe { CreateToolhelp32Snapshot(TH32CS_SNAPPROCESS, 0) };
        if raw == INVALID_HANDLE_VALUE {
            return Err(MemoryError::EnumerationFailure(format!(
                "CreateToolhelp32Snapshot failed: {}",
                ErrorCode::last_error()
            )));
        }

        Ok(ProcessSnapshot {
            snapshot: Handle::new(raw),
            started: false,
            finished: false,
        })
    }
}

impl Iterator for ProcessSnapshot {
    type Item = MemoryResult<ProcessInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut entry: PROCESSENTRY32W = unsafe { mem::zeroed() };
        entry.dwSize = mem::size_of::<PROCESSENTRY32W>() as u32;

        let success = unsafe {
            if self.started {
                Process32NextW(self.snapshot.raw(), &mut entry)
            } else {
                Process32FirstW(self.snapshot.raw(), &mut entry)
            }
        };
        self.started = true;

        if success == FALSE {
            self.finished = true;
            return walk_error(ErrorCode::last_error()).map(Err);
        }

        Some(Ok(ProcessInfo::new(
            entry.th32ProcessID,
            entry.th32ParentProcessID,
            wide_to_string(&entry.szExeFile),
        )))
    }
}

/// `ERROR_NO_MORE_FILES` ends the walk; any other code fails it
fn walk_error(code: ErrorCode) -> Option<MemoryError> {
    match code {
        ErrorCode::NoMoreFiles => None,
        code => Some(MemoryError::EnumerationFailure(format!(
            "process snapshot walk failed: {}",
            code
        ))),
    }
}
