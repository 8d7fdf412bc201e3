//! Linux backend
//!
//! Enumerates processes through `/proc` and moves memory through
//! `/proc/<pid>/mem` positioned reads and writes.

pub mod errno;
pub mod procfs;
pub mod process;

pub use process::RawProcess;
pub use procfs::ProcessSnapshot;
