//! Process descriptor types

use super::ProcessId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of a point-in-time process snapshot
///
/// Descriptors are never refreshed. The process they describe may exit at any
/// moment after the enumeration that produced them returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub pid: ProcessId,
    pub parent_pid: ProcessId,
    pub name: String,
}

impl ProcessInfo {
    /// Creates a new descriptor
    pub fn new(pid: ProcessId, parent_pid: ProcessId, name: impl Into<String>) -> Self {
        ProcessInfo {
            pid,
            parent_pid,
            name: name.into(),
        }
    }

    /// Checks whether this descriptor's name equals `name` under `policy`
    pub fn name_matches(&self, name: &str, policy: NameMatch) -> bool {
        policy.matches(&self.name, name)
    }
}

impl fmt::Display for ProcessInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} (parent {})", self.pid, self.name, self.parent_pid)
    }
}

/// How a process name selector is compared against snapshot names
///
/// Both policies compare whole names; there is no substring matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    /// Byte-for-byte equality
    Exact,
    /// Equality after ASCII case folding
    IgnoreAsciiCase,
}

impl NameMatch {
    /// Case-insensitive on Windows, where executable names follow the file
    /// system's case rules; exact everywhere else.
    pub const fn platform_default() -> Self {
        if cfg!(windows) {
            NameMatch::IgnoreAsciiCase
        } else {
            NameMatch::Exact
        }
    }

    /// Compares a snapshot name against a selector
    pub fn matches(self, candidate: &str, wanted: &str) -> bool {
        match self {
            NameMatch::Exact => candidate == wanted,
            NameMatch::IgnoreAsciiCase => candidate.eq_ignore_ascii_case(wanted),
        }
    }
}

impl Default for NameMatch {
    fn default() -> Self {
        Self::platform_default()
    }
}
