//! Owned HANDLE wrapper released exactly once

use crate::core::types::MemoryResult;
use crate::windows::bindings::kernel32;
use std::{mem, ptr};
use tracing::warn;
use winapi::um::winnt::HANDLE;

/// Owned Windows HANDLE, closed on drop unless closed explicitly first
pub struct Handle {
    handle: HANDLE,
}

impl Handle {
    /// Take ownership of a raw handle
    pub fn new(handle: HANDLE) -> Self {
        Handle { handle }
    }

    /// Check if handle is null
    pub fn is_null(&self) -> bool {
        self.handle.is_null()
    }

    /// Get the raw handle without giving up ownership
    pub fn raw(&self) -> HANDLE {
        self.handle
    }

    /// Close the handle now, reporting failure to the caller
    pub fn close(mut self) -> MemoryResult<()> {
        let handle = mem::replace(&mut self.handle, ptr::null_mut());
        unsafe { kernel32::close_handle(handle) }
    }
}

impl Drop for Handle {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            if let Err(err) = unsafe { kernel32::close_handle(self.handle) } {
                warn!("failed to close handle {:p}: {}", self.handle, err);
            }
        }
    }
}

// Kernel handles are process-wide values; the kernel serializes access to the object.
unsafe impl Send for Handle {}
unsafe impl Sync for Handle {}
