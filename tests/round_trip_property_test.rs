//! Property tests: whatever is written is what is read back

use procmem::memory::{read_bytes, read_typed, write_bytes, write_typed};
use procmem::process::open_by_id;
use procmem::Address;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn bytes_round_trip(data in proptest::collection::vec(any::<u8>(), 0..512), pad in 0usize..16) {
        let handle = open_by_id(std::process::id()).unwrap();
        let mut slot = vec![0u8; data.len() + pad];
        let address = Address::from(slot.as_mut_ptr());

        write_bytes(&handle, address, &data).unwrap();
        prop_assert_eq!(read_bytes(&handle, address, data.len()).unwrap(), data);
    }

    #[test]
    #[cfg_attr(miri, ignore = "FFI not supported in Miri")]
    fn typed_round_trip(value in any::<i64>(), other in any::<u16>()) {
        let handle = open_by_id(std::process::id()).unwrap();
        let mut slot = Box::new((0i64, 0u16));
        let first = Address::from(&mut slot.0 as *mut i64);
        let second = Address::from(&mut slot.1 as *mut u16);

        write_typed(&handle, first, value).unwrap();
        write_typed(&handle, second, other).unwrap();
        prop_assert_eq!(read_typed::<i64, _>(&handle, first).unwrap(), value);
        prop_assert_eq!(read_typed::<u16, _>(&handle, second).unwrap(), other);
    }
}
