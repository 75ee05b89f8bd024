//! This module implements a self-delimiting variable length integer coding scheme ("vle") with a
//! streaming decoder.
//!
//! Values are written most significant group first, 7 payload bits per byte. Every byte but the
//! last has the high bit (`0x80`) set. Signed values reserve bit `0x40` of the first byte as a
//! sign flag and store a negative `n` as the magnitude `-1 - n`, so small negative numbers
//! produce small output just like small positive ones:
//!
//! ```text
//! unsigned      0 -> 00        0x7f -> 7f        0x80 -> 81 00     0x7fff -> 81 ff 7f
//! signed       -1 -> 40           0 -> 00        0x3f -> 3f          0x40 -> 80 40
//! ```
//!
//! Every value has exactly one encoding produced by the encoder, and its length is the minimum
//! number of bytes holding the significant bits (plus the sign bit for signed types). The
//! `VleUnsigned` and `VleSigned` traits are implemented for all primitive integer types from 8
//! to 128 bits; all length arithmetic derives from the type's `BITS`.
//!
//! Decoding works on a `PeekSource`, a buffered byte source that can look ahead without
//! consuming. The readers peek at most the maximum encoded length for the target type and
//! discard exactly the bytes of a value once it has been parsed, so an interrupted or short
//! read leaves the source untouched and can simply be retried.
//!
//! ```
//! use vle::{PeekReader, VleRead};
//!
//! let mut out = vec![];
//! for v in [0u64, 0x7f, 0x80, 167894] {
//!     vle::write_unsigned(v, &mut out).unwrap();
//! }
//! vle::write_signed(-3i64, &mut out).unwrap();
//!
//! let mut src = PeekReader::new(out.as_slice());
//! for v in [0u64, 0x7f, 0x80, 167894] {
//!     assert_eq!(src.read_vle_unsigned::<u64>().unwrap().value, v);
//! }
//! let last = src.read_vle_signed::<i64>().unwrap();
//! assert_eq!((last.value, last.len), (-3, 1));
//! assert!(src.read_vle_signed::<i64>().unwrap_err().is_eof());
//! ```
mod bytes;
pub(crate) mod core;
mod io;
mod read;
mod source;

pub use crate::bytes::VleBufMut;
pub use crate::core::{
    decode_signed, decode_unsigned, encode_signed, encode_unsigned, max_signed_len,
    max_unsigned_len, EncodedVle, ParseError, VleSigned, VleUnsigned,
};
pub use crate::io::{write_signed, write_unsigned};
pub use crate::read::{read_signed, read_unsigned, Decoded, ReadError, VleRead};
pub use crate::source::{PeekReader, PeekSource, DEFAULT_CAPACITY};

/// Maximum number of bytes a single encoded value of any supported type will occupy.
pub const MAX_LEN: usize = 19;
