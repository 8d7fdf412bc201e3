//! Core type definitions
//!
//! Address wrapper, process descriptors, runtime-typed values and the error
//! taxonomy shared by every other module.

mod address;
mod error;
mod process_info;
mod value;

pub use address::Address;
pub use error::{ErrorKind, MemoryError, MemoryResult};
pub use process_info::{NameMatch, ProcessInfo};
pub use value::{MemoryValue, ValueType};

/// OS process identifier
pub type ProcessId = u32;
