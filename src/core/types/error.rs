//! Error types for process discovery and memory transfers

use super::Address;
use std::fmt;
use thiserror::Error;

/// Main error type for process and memory operations
///
/// Every failure is reported to the immediate caller only; nothing in this
/// crate retries or escalates.
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process enumeration failed: {0}")]
    EnumerationFailure(String),

    #[error("Process not found: {0}")]
    NotFound(String),

    #[error("Access denied to {target}: {reason}")]
    AccessDenied { target: String, reason: String },

    #[error("Partial transfer at {address}: requested {requested} bytes, transferred {transferred}")]
    PartialTransfer {
        address: Address,
        requested: usize,
        transferred: usize,
    },

    #[error("Invalid handle: {0}")]
    InvalidHandle(String),

    #[error("Invalid memory address: {0}")]
    InvalidAddress(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Result type alias for memory operations
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Fieldless category of a [`MemoryError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EnumerationFailure,
    NotFound,
    AccessDenied,
    PartialTransfer,
    InvalidHandle,
    InvalidAddress,
    InvalidValue,
}

impl MemoryError {
    /// Creates an access denied error
    pub fn access_denied(target: impl fmt::Display, reason: impl Into<String>) -> Self {
        MemoryError::AccessDenied {
            target: target.to_string(),
            reason: reason.into(),
        }
    }

    /// Creates a partial transfer error
    pub fn partial_transfer(address: Address, requested: usize, transferred: usize) -> Self {
        MemoryError::PartialTransfer {
            address,
            requested,
            transferred,
        }
    }

    /// Returns the category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MemoryError::EnumerationFailure(_) => ErrorKind::EnumerationFailure,
            MemoryError::NotFound(_) => ErrorKind::NotFound,
            MemoryError::AccessDenied { .. } => ErrorKind::AccessDenied,
            MemoryError::PartialTransfer { .. } => ErrorKind::PartialTransfer,
            MemoryError::InvalidHandle(_) => ErrorKind::InvalidHandle,
            MemoryError::InvalidAddress(_) => ErrorKind::InvalidAddress,
            MemoryError::InvalidValue(_) => ErrorKind::InvalidValue,
        }
    }
}
