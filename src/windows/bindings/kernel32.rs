//! Kernel32.dll bindings for process and memory operations

use crate::core::types::{Address, MemoryResult, ProcessId};
use crate::windows::utils::ErrorCode;
use winapi::shared::minwindef::{DWORD, FALSE, LPCVOID, LPVOID};
use winapi::um::handleapi::CloseHandle;
use winapi::um::memoryapi::{ReadProcessMemory, WriteProcessMemory};
use winapi::um::processthreadsapi::{GetExitCodeProcess, OpenProcess};
use winapi::um::synchapi::WaitForSingleObject;
use winapi::um::winbase::WAIT_OBJECT_0;
use winapi::um::winnt::HANDLE;

/// Exit code reported for processes that have not terminated
const STILL_ACTIVE: DWORD = 259;

/// Safe wrapper for OpenProcess
pub fn open_process(pid: ProcessId, desired_access: u32) -> MemoryResult<HANDLE> {
    let handle = unsafe { OpenProcess(desired_access, FALSE, pid) };
    if handle.is_null() {
        Err(ErrorCode::last_error().into_open_error(pid))
    } else {
        Ok(handle)
    }
}

/// Safe wrapper for CloseHandle
///
/// # Safety
/// The handle must be a valid Windows handle that is not closed again
pub unsafe fn close_handle(handle: HANDLE) -> MemoryResult<()> {
    if handle.is_null() {
        return Ok(());
    }

    if CloseHandle(handle) == FALSE {
        Err(ErrorCode::last_error().into_handle_error("CloseHandle"))
    } else {
        Ok(())
    }
}

/// Checks whether the process behind `handle` is still running
///
/// `GetExitCodeProcess` alone cannot tell a live process from one that
/// exited with code 259. When the handle also carries `SYNCHRONIZE`, a
/// zero-timeout wait settles it; without that right the wait fails and the
/// exit code is taken at face value.
///
/// # Safety
/// The handle must be a valid process handle opened with query rights
pub unsafe fn is_process_running(handle: HANDLE) -> MemoryResult<bool> {
    let mut exit_code: DWORD = 0;
    if GetExitCodeProcess(handle, &mut exit_code) == FALSE {
        return Err(ErrorCode::last_error().into_handle_error("GetExitCodeProcess"));
    }
    if exit_code != STILL_ACTIVE {
        return Ok(false);
    }
    Ok(still_running(exit_code, WaitForSingleObject(handle, 0)))
}

/// A signaled process object has exited regardless of its exit code
fn still_running(exit_code: DWORD, wait_result: DWORD) -> bool {
    exit_code == STILL_ACTIVE && wait_result != WAIT_OBJECT_0
}

/// Safe wrapper for ReadProcessMemory
///
/// Returns the number of bytes copied, which may be less than requested when
/// the range crosses into inaccessible memory.
///
/// # Safety
/// The handle must be a valid process handle
pub unsafe fn read_process_memory(
    handle: HANDLE,
    address: Address,
    buffer: &mut [u8],
) -> MemoryResult<usize> {
    let mut bytes_read = 0;

    let result = ReadProcessMemory(
        handle,
        address.as_usize() as LPCVOID,
        buffer.as_mut_ptr() as LPVOID,
        buffer.len(),
        &mut bytes_read,
    );

    if result != FALSE {
        return Ok(bytes_read);
    }

    match ErrorCode::last_error() {
        ErrorCode::PartialCopy if bytes_read > 0 => Ok(bytes_read),
        code => Err(code.into_transfer_error(address, "ReadProcessMemory")),
    }
}

/// Safe wrapper for WriteProcessMemory
///
/// # Safety
/// The handle must be a valid process handle
pub unsafe fn write_process_memory(
    handle: HANDLE,
    address: Address,
    data: &[u8],
) -> MemoryResult<usize> {
    let mut bytes_written = 0;

    let result = WriteProcessMemory(
        handle,
        address.as_usize() as LPVOID,
        data.as_ptr() as LPCVOID,
        data.len(),
        &mut bytes_written,
    );

    if result != FALSE {
        return Ok(bytes_written);
    }

    match ErrorCode::last_error() {
        ErrorCode::PartialCopy if bytes_written > 0 => Ok(bytes_written),
        code => Err(code.into_transfer_error(address, "WriteProcessMemory")),
    }
}
