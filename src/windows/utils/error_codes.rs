//! Windows error code handling utilities
//!
//! Maps `GetLastError` codes onto the crate's error taxonomy.

use crate::core::types::{Address, MemoryError, ProcessId};
use std::fmt;
use winapi::um::errhandlingapi::GetLastError;

/// Windows error codes that carry meaning for process and memory calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success,
    AccessDenied,
    InvalidHandle,
    NoMoreFiles,
    InvalidParameter,
    PartialCopy,
    InvalidAddress,
    NoAccess,
    Unknown(u32),
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => ErrorCode::Success,
            5 => ErrorCode::AccessDenied,
            6 => ErrorCode::InvalidHandle,
            18 => ErrorCode::NoMoreFiles,
            87 => ErrorCode::InvalidParameter,
            299 => ErrorCode::PartialCopy,
            487 => ErrorCode::InvalidAddress,
            998 => ErrorCode::NoAccess,
            _ => ErrorCode::Unknown(code),
        }
    }
}

impl ErrorCode {
    /// Get the last Windows error for the calling thread
    pub fn last_error() -> Self {
        unsafe { ErrorCode::from(GetLastError()) }
    }

    /// Maps a failed `OpenProcess` call
    ///
    /// `OpenProcess` reports a PID with no live process as an invalid parameter.
    pub fn into_open_error(self, pid: ProcessId) -> MemoryError {
        let target = format!("PID {}", pid);
        match self {
            ErrorCode::InvalidParameter => MemoryError::NotFound(target),
            ErrorCode::AccessDenied => {
                MemoryError::access_denied(target, "OpenProcess refused the requested rights")
            }
            code => MemoryError::access_denied(target, format!("OpenProcess failed: {}", code)),
        }
    }

    /// Maps a failed memory transfer that moved no bytes
    pub fn into_transfer_error(self, address: Address, operation: &str) -> MemoryError {
        match self {
            ErrorCode::InvalidHandle => {
                MemoryError::InvalidHandle(format!("{} failed: {}", operation, self))
            }
            code => MemoryError::access_denied(address, format!("{} failed: {}", operation, code)),
        }
    }

    /// Maps a failed call whose only input is a handle
    pub fn into_handle_error(self, operation: &str) -> MemoryError {
        MemoryError::InvalidHandle(format!("{} failed: {}", operation, self))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::Success => write!(f, "Success"),
            ErrorCode::AccessDenied => write!(f, "Access denied"),
            ErrorCode::InvalidHandle => write!(f, "Invalid handle"),
            ErrorCode::NoMoreFiles => write!(f, "No more entries"),
            ErrorCode::InvalidParameter => write!(f, "Invalid parameter"),
            ErrorCode::PartialCopy => write!(f, "Partial copy"),
            ErrorCode::InvalidAddress => write!(f, "Invalid address"),
            ErrorCode::NoAccess => write!(f, "Invalid access to memory location"),
            ErrorCode::Unknown(code) => write!(f, "Unknown error: {}", code),
        }
    }
}
