//! Windows backend
//!
//! Wraps ToolHelp32 enumeration and the kernel32 process/memory calls. All
//! unsafe FFI is contained in this module.

pub mod bindings;
pub mod process;
pub mod types;
pub mod utils;

pub use bindings::toolhelp::ProcessSnapshot;
pub use process::RawProcess;
