#![no_main]

use libfuzzer_sys::fuzz_target;
use vle::{VleBufMut, VleRead, VleUnsigned};

fuzz_target!(|data: &[u8]| {
    let mut dst = vec![];
    for chunk in data.chunks_exact(4) {
        let n = u32::from_le_bytes(chunk.try_into().unwrap());
        dst.put_vle_unsigned(n);
    }

    let mut src = &dst[..];
    for chunk in data.chunks_exact(4) {
        let n = u32::from_le_bytes(chunk.try_into().unwrap());
        let d = src.read_vle_unsigned::<u32>().unwrap();
        assert_eq!(d.value, n);
        assert_eq!(d.len, n.vle_len());
    }
    assert!(src.is_empty());
});
