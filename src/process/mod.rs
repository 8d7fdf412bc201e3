//! Process discovery and handle acquisition
//!
//! Enumerates running processes from a system snapshot and opens
//! rights-bearing handles by name or by identifier.

pub mod enumerator;
pub mod handle;
pub mod locator;

pub use enumerator::{
    enumerate_processes, find_process_by_name, find_processes_by_name, get_process_by_pid,
    ProcessEnumerator,
};
pub use handle::{ProcessAccess, ProcessHandle};
pub use locator::{open_by_id, open_by_id_with_info, open_by_name, open_by_name_with};
