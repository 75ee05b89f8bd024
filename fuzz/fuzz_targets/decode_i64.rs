#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // slice and streaming decoders must agree on every input
    let mut src = data;
    while !src.is_empty() {
        let slice = vle::decode_signed::<i64>(src);
        match vle::read_signed::<i64, _>(&mut src) {
            Ok(d) => assert_eq!(slice, Ok((d.value, d.len))),
            Err(_) => {
                assert!(slice.is_err());
                break;
            }
        }
    }
});
