//! Integration tests for typed and raw memory access against the test process

use bytemuck::{Pod, Zeroable};
use pretty_assertions::assert_eq;
use procmem::memory::{
    read_buffer, read_bytes, read_char, read_typed, read_value, write_bytes, write_typed,
    write_value,
};
use procmem::process::{open_by_id, ProcessAccess, ProcessHandle};
use procmem::{Address, ErrorKind, MemoryAccessor, MemoryValue, ValueType};

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
struct Player {
    health: u32,
    armor: u32,
    position: [f32; 3],
}

fn own_handle() -> ProcessHandle {
    open_by_id(std::process::id()).expect("Failed to open current process")
}

fn address_of<T>(slot: &mut T) -> Address {
    Address::from(slot as *mut T)
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_write_u32_then_read() {
    let handle = own_handle();
    let mut slot = Box::new(0u32);
    let address = address_of(&mut *slot);

    write_typed(&handle, address, 100u32).unwrap();
    assert_eq!(read_typed::<u32, _>(&handle, address).unwrap(), 100);
    assert_eq!(unsafe { std::ptr::read_volatile(&*slot) }, 100);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_typed_round_trip_struct() {
    let handle = own_handle();
    let mut slot = Box::new(Player::zeroed());
    let address = address_of(&mut *slot);

    let player = Player {
        health: 250,
        armor: 75,
        position: [1.0, -2.5, 1024.0],
    };
    write_typed(&handle, address, player).unwrap();
    assert_eq!(read_typed::<Player, _>(&handle, address).unwrap(), player);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_bytes_round_trip() {
    let handle = own_handle();
    let mut slot = Box::new([0u8; 32]);
    let address = address_of(&mut *slot);

    let text = b"Hello from procmem\0";
    write_bytes(&handle, address, text).unwrap();

    let mut buffer = [0u8; 19];
    read_buffer(&handle, address, &mut buffer).unwrap();
    assert_eq!(&buffer, text);

    // Nothing past the explicit length was touched
    assert_eq!(read_bytes(&handle, address.offset(19), 13).unwrap(), vec![0u8; 13]);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_read_char() {
    let handle = own_handle();
    let mut slot = Box::new(*b"xyz");
    let address = address_of(&mut *slot);

    assert_eq!(read_char(&handle, address).unwrap(), b'x');
    assert_eq!(read_char(&handle, address.offset(2)).unwrap(), b'z');
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_runtime_typed_values() {
    let handle = own_handle();
    let mut slot = Box::new(0u64);
    let address = address_of(&mut *slot);

    for text in ["-12", "0x7f", "3.25"] {
        for value_type in [ValueType::I32, ValueType::U8, ValueType::F64] {
            let Ok(value) = MemoryValue::parse(value_type, text) else {
                continue;
            };
            write_value(&handle, address, &value).unwrap();
            assert_eq!(read_value(&handle, address, value_type).unwrap(), value);
        }
    }
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_zero_length_transfers() {
    let handle = own_handle();
    write_bytes(&handle, Address::null(), &[]).unwrap();
    read_buffer(&handle, Address::null(), &mut []).unwrap();
    assert!(read_bytes(&handle, Address::null(), 0).unwrap().is_empty());
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_null_address_fails() {
    let handle = own_handle();
    let err = read_typed::<u32, _>(&handle, Address::null()).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::AccessDenied | ErrorKind::PartialTransfer
    ));

    let err = write_typed(&handle, Address::null(), 1u32).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::AccessDenied | ErrorKind::PartialTransfer
    ));
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_read_only_handle_cannot_write() {
    let handle = ProcessHandle::open(
        std::process::id(),
        ProcessAccess::QUERY_INFORMATION | ProcessAccess::VM_READ,
    )
    .unwrap();
    let mut slot = Box::new(5u32);
    let address = address_of(&mut *slot);

    assert_eq!(read_typed::<u32, _>(&handle, address).unwrap(), 5);
    let err = write_typed(&handle, address, 6u32).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    assert_eq!(unsafe { std::ptr::read_volatile(&*slot) }, 5);
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_accessor_facade() {
    let handle = own_handle();
    let accessor = MemoryAccessor::new(&handle);
    let mut slot = Box::new([0i16; 4]);
    let address = address_of(&mut *slot);

    accessor.write(address.offset(2), -300i16).unwrap();
    assert_eq!(accessor.read::<[i16; 4]>(address).unwrap(), [0, -300, 0, 0]);
    assert_eq!(
        accessor.read_value(address.offset(2), ValueType::I16).unwrap(),
        MemoryValue::I16(-300)
    );

    drop(accessor);
    handle.close().unwrap();
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_concurrent_reads_share_handle() {
    let handle = own_handle();
    let values: Vec<u64> = (0..8).map(|i| i * 1_000_003).collect();

    std::thread::scope(|scope| {
        for (i, value) in values.iter().enumerate() {
            let handle = &handle;
            scope.spawn(move || {
                let address = Address::from(value as *const u64);
                for _ in 0..100 {
                    assert_eq!(
                        read_typed::<u64, _>(handle, address).unwrap(),
                        i as u64 * 1_000_003
                    );
                }
            });
        }
    });
}
