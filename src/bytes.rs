//! Trait that allows writing vle values to a `bytes::BufMut`.
//!
//! Reading goes through `PeekSource`, which `bytes::Bytes` and `bytes::BytesMut` implement.

use crate::{VleSigned, VleUnsigned};

use bytes::BufMut;

/// Extension for `bytes::BufMut` to write any vle value.
///
/// ```
/// use bytes::BytesMut;
/// use vle::{VleBufMut, VleRead};
///
/// let mut buf = BytesMut::new();
/// buf.put_vle_unsigned(300u32);
/// buf.put_vle_signed(-300i32);
///
/// let mut buf = buf.freeze();
/// assert_eq!(buf.read_vle_unsigned::<u32>().unwrap().value, 300);
/// assert_eq!(buf.read_vle_signed::<i32>().unwrap().value, -300);
/// ```
pub trait VleBufMut {
    fn put_vle_unsigned<N: VleUnsigned>(&mut self, v: N);
    fn put_vle_signed<N: VleSigned>(&mut self, v: N);
}

impl<Inner: BufMut> VleBufMut for Inner {
    /// Writes an unsigned vle value to the buffer.
    #[inline]
    fn put_vle_unsigned<N: VleUnsigned>(&mut self, v: N) {
        let raw = v.to_vle_raw();
        if raw < 0x80 {
            self.put_u8(raw as u8);
        } else {
            self.put_slice(v.to_vle_bytes().as_slice());
        }
    }

    /// Writes a signed vle value to the buffer.
    #[inline]
    fn put_vle_signed<N: VleSigned>(&mut self, v: N) {
        self.put_slice(v.to_vle_bytes().as_slice());
    }
}
