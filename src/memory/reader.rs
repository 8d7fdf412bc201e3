//! Reading from another process's memory

use super::{ensure_complete, ProcessMemory};
use crate::core::types::{Address, MemoryResult, MemoryValue, ValueType};
use bytemuck::{Pod, Zeroable};
use tracing::trace;

/// Fill `buffer` with exactly `buffer.len()` bytes starting at `address`
///
/// A short transfer fails with `PartialTransfer`; the buffer contents are
/// then unspecified. An empty buffer succeeds without touching the target.
pub fn read_buffer<M>(target: &M, address: Address, buffer: &mut [u8]) -> MemoryResult<()>
where
    M: ProcessMemory + ?Sized,
{
    if buffer.is_empty() {
        return Ok(());
    }

    let transferred = target.read_memory(address, buffer)?;
    trace!(%address, len = buffer.len(), transferred, "read");
    ensure_complete(address, buffer.len(), transferred)
}

/// Read `size` bytes into a fresh buffer
pub fn read_bytes<M>(target: &M, address: Address, size: usize) -> MemoryResult<Vec<u8>>
where
    M: ProcessMemory + ?Sized,
{
    let mut buffer = vec![0u8; size];
    read_buffer(target, address, &mut buffer)?;
    Ok(buffer)
}

/// Read a value of type `T` from exactly `size_of::<T>()` bytes
///
/// The bytes are taken as the raw bit pattern of `T` in the target's native
/// layout. No endianness conversion and no pointer fix-up happens.
pub fn read_typed<T, M>(target: &M, address: Address) -> MemoryResult<T>
where
    T: Pod,
    M: ProcessMemory + ?Sized,
{
    let mut value = <T as Zeroable>::zeroed();
    read_buffer(target, address, bytemuck::bytes_of_mut(&mut value))?;
    Ok(value)
}

/// Read a single byte
pub fn read_char<M>(target: &M, address: Address) -> MemoryResult<u8>
where
    M: ProcessMemory + ?Sized,
{
    read_typed::<u8, M>(target, address)
}

/// Read a numeric value whose type is only known at runtime
pub fn read_value<M>(
    target: &M,
    address: Address,
    value_type: ValueType,
) -> MemoryResult<MemoryValue>
where
    M: ProcessMemory + ?Sized,
{
    Ok(match value_type {
        ValueType::U8 => MemoryValue::U8(read_typed(target, address)?),
        ValueType::U16 => MemoryValue::U16(read_typed(target, address)?),
        ValueType::U32 => MemoryValue::U32(read_typed(target, address)?),
        ValueType::U64 => MemoryValue::U64(read_typed(target, address)?),
        ValueType::I8 => MemoryValue::I8(read_typed(target, address)?),
        ValueType::I16 => MemoryValue::I16(read_typed(target, address)?),
        ValueType::I32 => MemoryValue::I32(read_typed(target, address)?),
        ValueType::I64 => MemoryValue::I64(read_typed(target, address)?),
        ValueType::F32 => MemoryValue::F32(read_typed(target, address)?),
        ValueType::F64 => MemoryValue::F64(read_typed(target, address)?),
    })
}
