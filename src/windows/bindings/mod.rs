//! Windows API bindings
//!
//! Low-level FFI wrappers around kernel32 and ToolHelp32.

pub mod kernel32;
pub mod toolhelp;
