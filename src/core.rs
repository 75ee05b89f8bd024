use crate::MAX_LEN;

/// Payload bits carried by every byte.
const PAYLOAD_MASK: u8 = 0x7f;
/// Set on every byte except the last one.
pub(crate) const CONTINUATION_BIT: u8 = 0x80;
/// Set on the first byte of a negative signed value.
pub(crate) const SIGN_BIT: u8 = 0x40;
/// Magnitude bits in the first byte of a signed value.
pub(crate) const SIGNED_FIRST_MASK: u8 = 0x3f;

/// Errors that may occur when parsing a vle value.
///
/// Parse errors are never retryable: the bytes themselves are wrong for the target type.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// The maximum encoded length for the target type was reached without a terminating byte.
    #[error("vle parse error: no terminator in the first {len} bytes")]
    Unterminated { len: usize },
    /// Input ended before a terminating byte was found.
    #[error("vle parse error: input ended after {len} bytes without a terminator")]
    Truncated { len: usize },
    /// The encoded magnitude needs more bits than the target type can hold.
    #[error("vle parse error: value needs {bits} bits, at most {max_bits} fit")]
    Overflow { bits: u32, max_bits: u32 },
}

/// Unsigned integer types that can be vle coded.
///
/// Values are shuffled through a `u128` carrier; all length arithmetic derives from `BITS`.
/// Implemented for every primitive unsigned type. Other implementations must keep `BITS` at
/// most 128 so that every encoding fits in `MAX_LEN` bytes.
pub trait VleUnsigned: Sized + Copy {
    /// Width of the type in bits.
    const BITS: u32;

    /// Widens `self` to the `u128` carrier.
    fn to_vle_raw(self) -> u128;
    /// Narrows a decoded carrier back to `Self`, or `None` if `raw` does not fit.
    fn from_vle_raw(raw: u128) -> Option<Self>;

    /// Returns the number of bytes required to encode `self`.
    #[inline]
    fn vle_len(self) -> usize {
        len_for_bits(bit_len(self.to_vle_raw()))
    }

    /// Encode `self` to an owned buffer and return it.
    #[inline]
    fn to_vle_bytes(self) -> EncodedVle {
        EncodedVle::new(self.to_vle_raw(), 0, 0x80)
    }
}

/// Signed integer types that can be vle coded.
///
/// A negative value `n` is stored as the magnitude `-1 - n` with the sign flag set, so
/// `-1` and `0` both have magnitude zero. Implemented for every primitive signed type; as with
/// `VleUnsigned`, `BITS` must be at most 128.
pub trait VleSigned: Sized + Copy {
    /// Width of the type in bits.
    const BITS: u32;

    /// Splits `self` into its sign flag and magnitude.
    fn to_vle_sign_magnitude(self) -> (bool, u128);
    /// Rebuilds a value from a sign flag and magnitude, or `None` if the magnitude does not fit
    /// in `BITS - 1` bits.
    fn from_vle_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self>;

    /// Returns the number of bytes required to encode `self`.
    #[inline]
    fn vle_len(self) -> usize {
        let (_, magnitude) = self.to_vle_sign_magnitude();
        len_for_bits(bit_len(magnitude) + 1)
    }

    /// Encode `self` to an owned buffer and return it.
    #[inline]
    fn to_vle_bytes(self) -> EncodedVle {
        let (negative, magnitude) = self.to_vle_sign_magnitude();
        EncodedVle::new(magnitude, if negative { SIGN_BIT } else { 0 }, 0x40)
    }
}

macro_rules! impl_unsigned {
    ($($int:ty),*) => {
        $(
            impl VleUnsigned for $int {
                const BITS: u32 = <$int>::BITS;

                #[inline(always)]
                fn to_vle_raw(self) -> u128 {
                    self as u128
                }
                #[inline(always)]
                fn from_vle_raw(raw: u128) -> Option<Self> {
                    raw.try_into().ok()
                }
            }
        )*
    };
}
impl_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_signed {
    ($($int:ty),*) => {
        $(
            impl VleSigned for $int {
                const BITS: u32 = <$int>::BITS;

                #[inline(always)]
                fn to_vle_sign_magnitude(self) -> (bool, u128) {
                    if self < 0 {
                        (true, (-1 - self) as u128)
                    } else {
                        (false, self as u128)
                    }
                }
                #[inline(always)]
                fn from_vle_sign_magnitude(negative: bool, magnitude: u128) -> Option<Self> {
                    let magnitude: Self = magnitude.try_into().ok()?;
                    Some(if negative { -1 - magnitude } else { magnitude })
                }
            }
        )*
    };
}
impl_signed!(i8, i16, i32, i64, i128, isize);

/// Number of significant bits in `v`.
#[inline]
pub(crate) const fn bit_len(v: u128) -> u32 {
    u128::BITS - v.leading_zeros()
}

/// Bytes needed to hold `bits` bits of payload, never less than one.
#[inline]
const fn len_for_bits(bits: u32) -> usize {
    if bits == 0 {
        1
    } else {
        ((bits + 6) / 7) as usize
    }
}

/// Maximum number of bytes an encoded `T` may occupy: `ceil(BITS / 7)`.
#[inline]
pub const fn max_unsigned_len<T: VleUnsigned>() -> usize {
    ((T::BITS + 6) / 7) as usize
}

/// Maximum number of bytes an encoded `T` may occupy: `ceil((BITS + 1) / 7)`.
#[inline]
pub const fn max_signed_len<T: VleSigned>() -> usize {
    ((T::BITS + 7) / 7) as usize
}

/// A single encoded vle value, returned by `to_vle_bytes()`, `encode_unsigned()` and
/// `encode_signed()`.
///
/// The value is written back to front into a buffer sized for the widest supported type;
/// `as_slice()` is the trailing part that was actually used.
#[derive(Clone, Copy)]
pub struct EncodedVle {
    buf: [u8; MAX_LEN],
    start: u8,
}

#[allow(clippy::len_without_is_empty)]
impl EncodedVle {
    /// `nostop` is the smallest magnitude that no longer fits in the first byte: `0x80` for
    /// unsigned values and `0x40` for signed ones.
    fn new(mut v: u128, first_flags: u8, nostop: u128) -> Self {
        let mut buf = [0u8; MAX_LEN];
        let mut i = MAX_LEN - 1;
        let mut b = v as u8 & PAYLOAD_MASK;
        while v >= nostop {
            buf[i] = b;
            v >>= 7;
            b = (v as u8 & PAYLOAD_MASK) | CONTINUATION_BIT;
            i -= 1;
        }
        buf[i] = b | first_flags;
        Self { buf, start: i as u8 }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[self.start as usize..]
    }

    /// Returns the number of bytes used to encode the value.
    pub fn len(&self) -> usize {
        MAX_LEN - self.start as usize
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.as_slice().to_vec()
    }
}

impl AsRef<[u8]> for EncodedVle {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::ops::Deref for EncodedVle {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl std::fmt::Debug for EncodedVle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncodedVle").field(&self.as_slice()).finish()
    }
}

/// Encodes an unsigned integer into its canonical vle form.
///
/// ```
/// assert_eq!(vle::encode_unsigned(0x80u16).as_slice(), &[0x81, 0x00]);
/// ```
#[inline]
pub fn encode_unsigned<N: VleUnsigned>(n: N) -> EncodedVle {
    n.to_vle_bytes()
}

/// Encodes a signed integer into its canonical vle form.
///
/// ```
/// assert_eq!(vle::encode_signed(-1i32).as_slice(), &[0x40]);
/// assert_eq!(vle::encode_signed(0x40i32).as_slice(), &[0x80, 0x40]);
/// ```
#[inline]
pub fn encode_signed<N: VleSigned>(n: N) -> EncodedVle {
    n.to_vle_bytes()
}

/// Result of scanning a buffer for a complete encoding.
pub(crate) enum Scan {
    /// A terminator was found; the encoding is this many bytes long.
    Complete(usize),
    /// Every byte of `buf` carries the continuation bit.
    Open,
}

#[inline]
pub(crate) fn scan(buf: &[u8]) -> Scan {
    match buf.iter().position(|b| b & CONTINUATION_BIT == 0) {
        Some(pos) => Scan::Complete(pos + 1),
        None => Scan::Open,
    }
}

/// Reassembles the magnitude of a complete `len`-byte encoding after checking that it
/// fits in `max_bits` bits. `first_mask` selects the payload bits of the first byte.
#[inline]
pub(crate) fn parse_magnitude(
    buf: &[u8],
    len: usize,
    first_mask: u8,
    max_bits: u32,
) -> Result<u128, ParseError> {
    let bits = bit_len(u128::from(buf[0] & first_mask)) + 7 * (len as u32 - 1);
    if bits > max_bits {
        return Err(ParseError::Overflow { bits, max_bits });
    }
    Ok(buf[1..len].iter().fold(u128::from(buf[0] & first_mask), |n, b| {
        (n << 7) | u128::from(b & PAYLOAD_MASK)
    }))
}

/// Unsigned magnitudes may use every bit of the type.
#[inline]
pub(crate) fn unsigned_from_buf<N: VleUnsigned>(buf: &[u8], len: usize) -> Result<N, ParseError> {
    let raw = parse_magnitude(buf, len, PAYLOAD_MASK, N::BITS)?;
    N::from_vle_raw(raw).ok_or(ParseError::Overflow {
        bits: bit_len(raw),
        max_bits: N::BITS,
    })
}

/// Signed magnitudes lose one bit to the sign.
#[inline]
pub(crate) fn signed_from_buf<N: VleSigned>(buf: &[u8], len: usize) -> Result<N, ParseError> {
    let negative = buf[0] & SIGN_BIT != 0;
    let magnitude = parse_magnitude(buf, len, SIGNED_FIRST_MASK, N::BITS - 1)?;
    N::from_vle_sign_magnitude(negative, magnitude).ok_or(ParseError::Overflow {
        bits: bit_len(magnitude),
        max_bits: N::BITS - 1,
    })
}

fn decode_with<N>(
    buf: &[u8],
    max_len: usize,
    parse: impl FnOnce(&[u8], usize) -> Result<N, ParseError>,
) -> Result<(N, usize), ParseError> {
    let buf = &buf[..buf.len().min(max_len)];
    match scan(buf) {
        Scan::Complete(len) => Ok((parse(buf, len)?, len)),
        Scan::Open if buf.len() == max_len => Err(ParseError::Unterminated { len: buf.len() }),
        Scan::Open => Err(ParseError::Truncated { len: buf.len() }),
    }
}

/// Decode an unsigned integer from the front of `buf` and return the value and the number of
/// bytes consumed.
///
/// `buf` is taken to be all the input there is: running out of bytes is a
/// `ParseError::Truncated`. Use `read_unsigned()` to decode from a stream.
#[inline]
pub fn decode_unsigned<N: VleUnsigned>(buf: &[u8]) -> Result<(N, usize), ParseError> {
    decode_with(buf, max_unsigned_len::<N>(), unsigned_from_buf)
}

/// Decode a signed integer from the front of `buf` and return the value and the number of
/// bytes consumed.
#[inline]
pub fn decode_signed<N: VleSigned>(buf: &[u8]) -> Result<(N, usize), ParseError> {
    decode_with(buf, max_signed_len::<N>(), signed_from_buf)
}
