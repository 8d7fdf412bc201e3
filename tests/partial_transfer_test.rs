//! Transfers that run off the end of mapped memory must fail, not truncate
//!
//! Kept in its own test binary with a single test so no other test maps
//! memory into the hole next to the guarded page.

use procmem::memory::{read_buffer, read_typed, write_bytes};
use procmem::process::open_by_id;
use procmem::{Address, ErrorKind, MemoryError};

/// One read-write page followed by an unmapped (or reserved) page
struct GuardedPage {
    base: *mut u8,
    size: usize,
}

#[cfg(target_os = "linux")]
impl GuardedPage {
    fn new() -> Self {
        use std::ptr;

        unsafe {
            let size = libc::sysconf(libc::_SC_PAGESIZE) as usize;
            let base = libc::mmap(
                ptr::null_mut(),
                size * 2,
                libc::PROT_READ | libc::PROT_WRITE,
                libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
                -1,
                0,
            );
            assert_ne!(base, libc::MAP_FAILED, "mmap failed");
            // PROT_NONE would still be reachable through /proc/<pid>/mem
            let rc = libc::munmap((base as *mut u8).add(size) as *mut libc::c_void, size);
            assert_eq!(rc, 0, "munmap failed");
            GuardedPage {
                base: base as *mut u8,
                size,
            }
        }
    }
}

#[cfg(target_os = "linux")]
impl Drop for GuardedPage {
    fn drop(&mut self) {
        unsafe {
            libc::munmap(self.base as *mut libc::c_void, self.size);
        }
    }
}

#[cfg(windows)]
impl GuardedPage {
    fn new() -> Self {
        use std::ptr;
        use winapi::um::memoryapi::VirtualAlloc;
        use winapi::um::winnt::{MEM_COMMIT, MEM_RESERVE, PAGE_NOACCESS, PAGE_READWRITE};

        let size = 4096;
        unsafe {
            let base = VirtualAlloc(ptr::null_mut(), size * 2, MEM_RESERVE, PAGE_NOACCESS);
            assert!(!base.is_null(), "VirtualAlloc reserve failed");
            let committed = VirtualAlloc(base, size, MEM_COMMIT, PAGE_READWRITE);
            assert_eq!(committed, base, "VirtualAlloc commit failed");
            GuardedPage {
                base: base as *mut u8,
                size,
            }
        }
    }
}

#[cfg(windows)]
impl Drop for GuardedPage {
    fn drop(&mut self) {
        use winapi::um::memoryapi::VirtualFree;
        use winapi::um::winnt::MEM_RELEASE;

        unsafe {
            VirtualFree(self.base as *mut _, 0, MEM_RELEASE);
        }
    }
}

impl GuardedPage {
    /// Address `back` bytes before the end of the mapped page
    fn tail(&self, back: usize) -> Address {
        Address::from(self.base as usize + self.size - back)
    }

    fn unmapped(&self) -> Address {
        Address::from(self.base as usize + self.size)
    }
}

fn assert_not_truncated(err: &MemoryError, requested: usize) {
    match err {
        MemoryError::PartialTransfer {
            requested: r,
            transferred,
            ..
        } => {
            assert_eq!(*r, requested);
            assert!(*transferred < requested);
        }
        // Windows may refuse a boundary-crossing copy outright
        other if cfg!(windows) => assert_eq!(other.kind(), ErrorKind::AccessDenied),
        other => panic!("expected a partial transfer, got: {other}"),
    }
}

#[test]
#[cfg_attr(miri, ignore = "FFI not supported in Miri")]
fn test_transfers_across_mapping_end() {
    let page = GuardedPage::new();
    let handle = open_by_id(std::process::id()).unwrap();

    // Only size - 1 of the requested bytes are mapped
    let mut buffer = [0u8; 8];
    let err = read_buffer(&handle, page.tail(7), &mut buffer).unwrap_err();
    assert_not_truncated(&err, 8);
    if cfg!(target_os = "linux") {
        assert!(err.to_string().contains("transferred 7"));
    }

    let err = read_typed::<u64, _>(&handle, page.tail(4)).unwrap_err();
    assert_not_truncated(&err, 8);

    let err = write_bytes(&handle, page.tail(3), &[0xAA; 4]).unwrap_err();
    assert_not_truncated(&err, 4);

    // Entirely inside the mapped page is fine
    write_bytes(&handle, page.tail(8), &[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    assert_eq!(
        read_typed::<[u8; 8], _>(&handle, page.tail(8)).unwrap(),
        [1, 2, 3, 4, 5, 6, 7, 8]
    );

    // Entirely outside is a refusal, not a short count
    let err = read_typed::<u32, _>(&handle, page.unmapped()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
}
