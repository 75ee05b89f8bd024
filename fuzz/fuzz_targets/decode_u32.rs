#![no_main]

use libfuzzer_sys::fuzz_target;
use vle::VleRead;

fuzz_target!(|data: &[u8]| {
    // attempts to decode all the data as a u32 error are ok, panics are not
    let mut src = data;
    while !src.is_empty() {
        let before = src.len();
        match src.read_vle_unsigned::<u32>() {
            Ok(d) => assert_eq!(before - src.len(), d.len),
            Err(_) => {
                assert_eq!(src.len(), before);
                break;
            }
        }
    }
});
