//! Writing into another process's memory

use super::{ensure_complete, ProcessMemory};
use crate::core::types::{Address, MemoryResult, MemoryValue};
use bytemuck::Pod;
use tracing::trace;

/// Write exactly `data.len()` bytes starting at `address`
///
/// This is the single primitive for blobs and strings: whatever is in `data`
/// is written, nothing is appended. Text needs its terminator included by the
/// caller if the target expects one. A short transfer fails with
/// `PartialTransfer` and leaves the prefix already written in place.
pub fn write_bytes<M>(target: &M, address: Address, data: &[u8]) -> MemoryResult<()>
where
    M: ProcessMemory + ?Sized,
{
    if data.is_empty() {
        return Ok(());
    }

    let transferred = target.write_memory(address, data)?;
    trace!(%address, len = data.len(), transferred, "write");
    ensure_complete(address, data.len(), transferred)
}

/// Write `value` as exactly `size_of::<T>()` raw bytes
pub fn write_typed<T, M>(target: &M, address: Address, value: T) -> MemoryResult<()>
where
    T: Pod,
    M: ProcessMemory + ?Sized,
{
    write_bytes(target, address, bytemuck::bytes_of(&value))
}

/// Write a numeric value whose type is only known at runtime
pub fn write_value<M>(target: &M, address: Address, value: &MemoryValue) -> MemoryResult<()>
where
    M: ProcessMemory + ?Sized,
{
    match *value {
        MemoryValue::U8(v) => write_typed(target, address, v),
        MemoryValue::U16(v) => write_typed(target, address, v),
        MemoryValue::U32(v) => write_typed(target, address, v),
        MemoryValue::U64(v) => write_typed(target, address, v),
        MemoryValue::I8(v) => write_typed(target, address, v),
        MemoryValue::I16(v) => write_typed(target, address, v),
        MemoryValue::I32(v) => write_typed(target, address, v),
        MemoryValue::I64(v) => write_typed(target, address, v),
        MemoryValue::F32(v) => write_typed(target, address, v),
        MemoryValue::F64(v) => write_typed(target, address, v),
    }
}
