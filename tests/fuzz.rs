use vle::{ParseError, PeekReader, ReadError, VleRead};

#[test]
fn all_continuation_bytes_are_unterminated() {
    let decode_data = [0xffu8; vle::MAX_LEN + 1];
    let mut buf = decode_data.as_slice();
    match buf.read_vle_unsigned::<u128>() {
        Err(ReadError::Parse(ParseError::Unterminated { len })) => assert_eq!(len, vle::MAX_LEN),
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(buf.len(), decode_data.len());
}

#[test]
fn returns_error_for_small_data() {
    let decode_data = [171u8];
    let mut buf = decode_data.as_slice();
    let err = buf.read_vle_signed::<i32>().unwrap_err();
    assert!(!err.is_retryable());
    assert_eq!(buf, &decode_data);
}

#[test]
fn widest_types_decode_at_the_limit() {
    let max = vle::encode_unsigned(u128::MAX);
    assert_eq!(max.len(), vle::MAX_LEN);
    assert_eq!(max[0], 0x83);
    assert_eq!(vle::decode_unsigned::<u128>(&max), Ok((u128::MAX, vle::MAX_LEN)));

    let min = vle::encode_signed(i128::MIN);
    assert_eq!(min.len(), vle::MAX_LEN);
    assert_eq!(min[0], 0xc1);
    assert_eq!(vle::decode_signed::<i128>(&min), Ok((i128::MIN, vle::MAX_LEN)));
}

#[test]
fn arbitrary_bytes_never_panic() {
    // Every two-byte prefix, followed by a terminator, through every reader width.
    for hi in 0..=u8::MAX {
        for lo in 0..=u8::MAX {
            let data = [hi, lo, 0x00];
            let mut src = PeekReader::new(data.as_slice());
            while let Ok(d) = src.read_vle_unsigned::<u8>() {
                assert!(d.len > 0);
            }
            let _ = vle::decode_signed::<i8>(&data);
            let _ = vle::decode_unsigned::<u16>(&data);
            let _ = vle::decode_signed::<i64>(&data);
            let _ = vle::decode_unsigned::<u128>(&data);
        }
    }
}
