//! `/proc` process enumeration

use crate::core::types::{MemoryError, MemoryResult, ProcessId, ProcessInfo};
use std::fs;
use std::io;
use std::path::Path;

const PROC_ROOT: &str = "/proc";

/// Fields of `/proc/<pid>/stat` this crate cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub pid: ProcessId,
    pub comm: String,
    pub state: char,
    pub parent_pid: ProcessId,
}

impl Stat {
    /// Zombie and dead tasks have released their address space
    pub fn has_exited(&self) -> bool {
        matches!(self.state, 'Z' | 'X' | 'x')
    }
}

/// Parses the contents of `/proc/<pid>/stat`
///
/// `comm` is wrapped in parentheses and may itself contain spaces and
/// parentheses, so the fields after it are located from the last `)`.
pub fn parse_stat(contents: &str) -> Option<Stat> {
    let open = contents.find('(')?;
    let close = contents.rfind(')')?;
    if close < open {
        return None;
    }

    let pid = contents[..open].trim().parse().ok()?;
    let comm = contents[open + 1..close].to_string();

    let mut fields = contents[close + 1..].split_whitespace();
    let state = fields.next()?.chars().next()?;
    let parent_pid = fields.next()?.parse().ok()?;

    Some(Stat {
        pid,
        comm,
        state,
        parent_pid,
    })
}

/// Reads and parses `/proc/<pid>/stat`
pub fn read_stat(pid: ProcessId) -> io::Result<Stat> {
    let path = Path::new(PROC_ROOT).join(pid.to_string()).join("stat");
    let contents = fs::read_to_string(path)?;
    parse_stat(&contents).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed /proc/{}/stat", pid),
        )
    })
}

/// File name of the process executable, if the link is readable
///
/// Falls back to nothing for kernel threads and for processes owned by other
/// users, whose `exe` link is not readable.
fn exe_name(pid: ProcessId) -> Option<String> {
    let target = fs::read_link(Path::new(PROC_ROOT).join(pid.to_string()).join("exe")).ok()?;
    let name = target.file_name()?.to_string_lossy().into_owned();
    Some(
        name.strip_suffix(" (deleted)")
            .map(str::to_string)
            .unwrap_or(name),
    )
}

/// Builds the descriptor for one live process
///
/// The name is the executable's file name when readable, otherwise the
/// kernel's `comm` (truncated to 15 bytes).
pub fn describe(pid: ProcessId) -> io::Result<ProcessInfo> {
    let stat = read_stat(pid)?;
    let name = exe_name(pid).unwrap_or(stat.comm);
    Ok(ProcessInfo::new(stat.pid, stat.parent_pid, name))
}

/// Whether a per-entry failure means the process is simply absent from this
/// caller's view of `/proc`
///
/// Covers processes that exited after the PID list was taken (`ENOENT`,
/// `ESRCH`) and entries hidden from other users by `hidepid` or an LSM
/// (`EPERM`, `EACCES`). Anything else, such as a malformed `stat`, is a real
/// enumeration failure.
fn skippable(err: &io::Error) -> bool {
    matches!(
        err.raw_os_error(),
        Some(libc::ENOENT) | Some(libc::ESRCH) | Some(libc::EPERM) | Some(libc::EACCES)
    ) || matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied
    )
}

fn describe_error(pid: ProcessId, err: io::Error) -> MemoryError {
    MemoryError::EnumerationFailure(format!("cannot describe PID {}: {}", pid, err))
}

/// The PID set present in `/proc` at construction time
///
/// Descriptors are read lazily; a process that exits before its entry is
/// read, or that the caller is not allowed to see, is skipped.
pub struct ProcessSnapshot {
    pids: std::vec::IntoIter<ProcessId>,
}

impl ProcessSnapshot {
    /// List the PIDs currently present under `/proc`
    pub fn new() -> MemoryResult<Self> {
        let entries = fs::read_dir(PROC_ROOT).map_err(|e| {
            MemoryError::EnumerationFailure(format!("cannot read {}: {}", PROC_ROOT, e))
        })?;

        let mut pids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                MemoryError::EnumerationFailure(format!("cannot iterate {}: {}", PROC_ROOT, e))
            })?;
            if let Some(pid) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.parse::<ProcessId>().ok())
            {
                pids.push(pid);
            }
        }

        Ok(ProcessSnapshot {
            pids: pids.into_iter(),
        })
    }
}

impl Iterator for ProcessSnapshot {
    type Item = MemoryResult<ProcessInfo>;

    fn next(&mut self) -> Option<Self::Item> {
        for pid in self.pids.by_ref() {
            match describe(pid) {
                Ok(info) => return Some(Ok(info)),
                Err(err) if skippable(&err) => continue,
                Err(err) => return Some(Err(describe_error(pid, err))),
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ErrorKind;

    #[test]
    fn test_parse_stat() {
        let stat = parse_stat("4321 (game) S 1 4321 4321 0 -1 4194560").unwrap();
        assert_eq!(stat.pid, 4321);
        assert_eq!(stat.comm, "game");
        assert_eq!(stat.state, 'S');
        assert_eq!(stat.parent_pid, 1);
        assert!(!stat.has_exited());
    }

    #[test]
    fn test_parse_stat_with_parens_in_comm() {
        let stat = parse_stat("77 (odd (name) x) Z 12 77 77 0").unwrap();
        assert_eq!(stat.comm, "odd (name) x");
        assert_eq!(stat.state, 'Z');
        assert_eq!(stat.parent_pid, 12);
        assert!(stat.has_exited());
    }

    #[test]
    fn test_parse_stat_malformed() {
        assert!(parse_stat("").is_none());
        assert!(parse_stat("12 no parens S 1").is_none());
        assert!(parse_stat("12 (truncated)").is_none());
        assert!(parse_stat("x (comm) S 1").is_none());
    }

    #[test]
    fn test_vanished_entries_are_skipped() {
        assert!(skippable(&io::Error::from_raw_os_error(libc::ENOENT)));
        assert!(skippable(&io::Error::from_raw_os_error(libc::ESRCH)));
    }

    #[test]
    fn test_hidden_entries_are_skipped() {
        // hidepid=1 answers EPERM for other users' stat files
        assert!(skippable(&io::Error::from_raw_os_error(libc::EPERM)));
        assert!(skippable(&io::Error::from_raw_os_error(libc::EACCES)));
    }

    #[test]
    fn test_other_entry_errors_fail_enumeration() {
        let malformed = io::Error::new(io::ErrorKind::InvalidData, "malformed /proc/9/stat");
        assert!(!skippable(&malformed));
        assert!(!skippable(&io::Error::from_raw_os_error(libc::EIO)));
        assert!(!skippable(&io::Error::from_raw_os_error(libc::EMFILE)));

        let err = describe_error(9, malformed);
        assert_eq!(err.kind(), ErrorKind::EnumerationFailure);
        assert!(err.to_string().contains("cannot describe PID 9"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "procfs not available in Miri")]
    fn test_describe_self() {
        let pid = std::process::id();
        let info = describe(pid).unwrap();
        assert_eq!(info.pid, pid);
        assert!(!info.name.is_empty());

        let exe = std::env::current_exe().unwrap();
        let expected = exe.file_name().unwrap().to_string_lossy();
        assert_eq!(info.name, expected);
    }

    #[test]
    #[cfg_attr(miri, ignore = "procfs not available in Miri")]
    fn test_snapshot_contains_self() {
        let pid = std::process::id();
        let found = ProcessSnapshot::new()
            .unwrap()
            .filter_map(Result::ok)
            .any(|p| p.pid == pid);
        assert!(found);
    }
}
