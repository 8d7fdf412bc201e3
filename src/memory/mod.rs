//! Cross-process memory access
//!
//! Every operation is a single synchronous transfer against the target's
//! live memory with an all-or-nothing contract: either exactly the requested
//! number of bytes moves, or the call fails. Nothing is cached and nothing is
//! retried.
//!
//! The functions are generic over [`ProcessMemory`], the raw "move some bytes,
//! report how many" primitive. [`ProcessHandle`] implements it against a real
//! process.

pub mod reader;
pub mod writer;

pub use reader::{read_buffer, read_bytes, read_char, read_typed, read_value};
pub use writer::{write_bytes, write_typed, write_value};

use crate::core::types::{Address, MemoryError, MemoryResult, MemoryValue, ValueType};
use crate::process::ProcessHandle;
use bytemuck::Pod;

/// Raw single-call memory transfer against some address space
///
/// Implementations issue exactly one underlying transfer and return the
/// number of bytes moved, which may be less than requested. They do not
/// retry and do not turn short counts into errors.
pub trait ProcessMemory {
    /// Copy bytes from `address` into `buffer`
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize>;

    /// Copy `data` to `address`
    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize>;
}

impl ProcessMemory for ProcessHandle {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        ProcessHandle::read_memory(self, address, buffer)
    }

    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        ProcessHandle::write_memory(self, address, data)
    }
}

impl<M: ProcessMemory + ?Sized> ProcessMemory for &M {
    fn read_memory(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<usize> {
        (**self).read_memory(address, buffer)
    }

    fn write_memory(&self, address: Address, data: &[u8]) -> MemoryResult<usize> {
        (**self).write_memory(address, data)
    }
}

pub(crate) fn ensure_complete(
    address: Address,
    requested: usize,
    transferred: usize,
) -> MemoryResult<()> {
    if transferred == requested {
        Ok(())
    } else {
        Err(MemoryError::partial_transfer(address, requested, transferred))
    }
}

/// Borrowed view over a process for method-style access
///
/// Holds only a reference to the caller's handle; the handle keeps its single
/// owner and stays usable after the accessor is gone.
pub struct MemoryAccessor<'a, M: ?Sized = ProcessHandle> {
    target: &'a M,
}

impl<'a, M: ProcessMemory + ?Sized> MemoryAccessor<'a, M> {
    /// Create an accessor over `target`
    pub fn new(target: &'a M) -> Self {
        MemoryAccessor { target }
    }

    /// Get the underlying target
    pub fn target(&self) -> &'a M {
        self.target
    }

    /// See [`read_typed`]
    pub fn read<T: Pod>(&self, address: Address) -> MemoryResult<T> {
        read_typed(self.target, address)
    }

    /// See [`read_buffer`]
    pub fn read_buffer(&self, address: Address, buffer: &mut [u8]) -> MemoryResult<()> {
        read_buffer(self.target, address, buffer)
    }

    /// See [`read_bytes`]
    pub fn read_bytes(&self, address: Address, size: usize) -> MemoryResult<Vec<u8>> {
        read_bytes(self.target, address, size)
    }

    /// See [`read_char`]
    pub fn read_char(&self, address: Address) -> MemoryResult<u8> {
        read_char(self.target, address)
    }

    /// See [`read_value`]
    pub fn read_value(
        &self,
        address: Address,
        value_type: ValueType,
    ) -> MemoryResult<MemoryValue> {
        read_value(self.target, address, value_type)
    }

    /// See [`write_typed`]
    pub fn write<T: Pod>(&self, address: Address, value: T) -> MemoryResult<()> {
        write_typed(self.target, address, value)
    }

    /// See [`write_bytes`]
    pub fn write_bytes(&self, address: Address, data: &[u8]) -> MemoryResult<()> {
        write_bytes(self.target, address, data)
    }

    /// See [`write_value`]
    pub fn write_value(&self, address: Address, value: &MemoryValue) -> MemoryResult<()> {
        write_value(self.target, address, value)
    }
}
