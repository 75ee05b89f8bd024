#![no_main]

use libfuzzer_sys::fuzz_target;
use vle::{PeekReader, VleRead};

fuzz_target!(|data: &[u8]| {
    let mut dst = vec![];
    for chunk in data.chunks_exact(8) {
        let n = i64::from_le_bytes(chunk.try_into().unwrap());
        vle::write_signed(n, &mut dst).unwrap();
        vle::write_unsigned(n as u64, &mut dst).unwrap();
    }

    let mut src = PeekReader::with_capacity(16, dst.as_slice());
    for chunk in data.chunks_exact(8) {
        let n = i64::from_le_bytes(chunk.try_into().unwrap());
        assert_eq!(src.read_vle_signed::<i64>().unwrap().value, n);
        assert_eq!(src.read_vle_unsigned::<u64>().unwrap().value, n as u64);
    }
    assert!(src.read_vle_unsigned::<u64>().unwrap_err().is_eof());
});
