//! procmem: process discovery and cross-process memory access for Windows and Linux
//!
//! Locate a running process by name or id, open a rights-bearing handle to
//! it, and move bytes or plain-old-data values in and out of its address
//! space.
//!
//! ```no_run
//! use procmem::{memory, process, Address};
//!
//! # fn main() -> procmem::MemoryResult<()> {
//! let (handle, info) = process::open_by_name("game.exe")?;
//! let health: u32 = memory::read_typed(&handle, Address::new(0x7FF6_1234_0000))?;
//! memory::write_typed(&handle, Address::new(0x7FF6_1234_0000), health + 100)?;
//! println!("patched {}", info);
//! handle.close()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod memory;
pub mod process;

#[cfg(windows)]
pub mod windows;
#[cfg(windows)]
use crate::windows as sys;

#[cfg(target_os = "linux")]
pub mod unix;
#[cfg(target_os = "linux")]
use crate::unix as sys;

pub use crate::core::types::{
    Address, ErrorKind, MemoryError, MemoryResult, MemoryValue, NameMatch, ProcessId, ProcessInfo,
    ValueType,
};
pub use memory::{MemoryAccessor, ProcessMemory};
pub use process::{
    enumerate_processes, open_by_id, open_by_id_with_info, open_by_name, open_by_name_with,
    ProcessAccess, ProcessEnumerator, ProcessHandle,
};

pub use bytemuck::Pod;
