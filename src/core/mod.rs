//! Core module containing the fundamental types used across procmem

pub mod types;

pub use types::{
    Address, ErrorKind, MemoryError, MemoryResult, MemoryValue, NameMatch, ProcessId,
    ProcessInfo, ValueType,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(not(any(target_os = "windows", target_os = "linux")))]
compile_error!("procmem only supports Windows and Linux");

#[cfg(not(target_pointer_width = "64"))]
compile_error!("procmem requires a 64-bit target");
