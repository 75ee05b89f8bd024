//! Streaming decoders over a `PeekSource`.
use std::io::{self, ErrorKind};

use crate::core::{scan, signed_from_buf, unsigned_from_buf, ParseError, Scan};
use crate::source::PeekSource;
use crate::{max_signed_len, max_unsigned_len, VleSigned, VleUnsigned};

/// Errors that may occur when reading a vle value from a `PeekSource`.
///
/// Parse errors and errors from `peek()` leave the source untouched: the next read starts from
/// the same position. The exception is a failed or short `discard()` after a value was parsed,
/// reported as `ReadError::Io` with the source's own error or `ErrorKind::Other`; the source may
/// then be partly advanced and should not be read further.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The bytes are malformed or the value does not fit the target type.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The source reported an error before a complete value was available. A kind of
    /// `ErrorKind::UnexpectedEof` means the source is exhausted.
    #[error("vle read error: {0}")]
    Io(#[from] io::Error),
    /// The source returned too few bytes without reporting why.
    #[error("vle read error: source returned an incomplete value")]
    Incomplete,
}

impl ReadError {
    /// Returns true if the same read may succeed once the source has more data.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Parse(_) => false,
            Self::Io(e) => e.kind() != ErrorKind::UnexpectedEof,
            Self::Incomplete => true,
        }
    }

    /// Returns true if the source was exhausted before any complete value.
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == ErrorKind::UnexpectedEof)
    }
}

impl From<ReadError> for io::Error {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Parse(e) => io::Error::new(ErrorKind::InvalidData, e),
            ReadError::Io(e) => e,
            ReadError::Incomplete => io::Error::new(ErrorKind::WouldBlock, ReadError::Incomplete),
        }
    }
}

/// A value read from a `PeekSource`.
#[derive(Debug)]
pub struct Decoded<N> {
    pub value: N,
    /// Number of bytes discarded from the source, always at least one.
    pub len: usize,
    /// The error that accompanied the peek the value was parsed from. It does not affect
    /// `value`; most often it is an end of stream right after the last byte.
    pub error: Option<io::Error>,
}

impl<N> Decoded<N> {
    /// Returns true if the source reported end of stream along with this value.
    pub fn at_eof(&self) -> bool {
        matches!(&self.error, Some(e) if e.kind() == ErrorKind::UnexpectedEof)
    }
}

fn read_with<N, S: PeekSource + ?Sized>(
    src: &mut S,
    max_len: usize,
    parse: impl FnOnce(&[u8], usize) -> Result<N, ParseError>,
) -> Result<Decoded<N>, ReadError> {
    let (buf, error) = src.peek(max_len);
    let buf = &buf[..buf.len().min(max_len)];
    let peeked = buf.len();
    if peeked == 0 {
        return Err(error.map_or(ReadError::Incomplete, ReadError::Io));
    }

    let at_eof = matches!(&error, Some(e) if e.kind() == ErrorKind::UnexpectedEof);
    let (value, len) = match scan(buf) {
        Scan::Complete(len) => match parse(buf, len) {
            Ok(value) => (value, len),
            Err(e) => {
                tracing::trace!(error = %e, len, "vle value does not fit");
                return Err(e.into());
            }
        },
        Scan::Open if peeked < max_len && !at_eof => {
            tracing::trace!(peeked, max_len, "short vle peek, retry later");
            return Err(error.map_or(ReadError::Incomplete, ReadError::Io));
        }
        Scan::Open => {
            let e = if peeked < max_len {
                ParseError::Truncated { len: peeked }
            } else {
                ParseError::Unterminated { len: peeked }
            };
            tracing::trace!(error = %e, "malformed vle value");
            return Err(e.into());
        }
    };

    match src.discard(len) {
        Ok(n) if n == len => Ok(Decoded { value, len, error }),
        Ok(n) => {
            tracing::trace!(len, discarded = n, "short vle discard");
            Err(ReadError::Io(io::Error::new(
                ErrorKind::Other,
                format!("discarded {n} of {len} peeked bytes"),
            )))
        }
        Err(e) => {
            tracing::trace!(error = %e, len, "vle discard failed");
            Err(e.into())
        }
    }
}

/// Read and parse an unsigned integer from `src`.
///
/// Peeks up to `max_unsigned_len::<N>()` bytes and discards exactly the bytes of the value on
/// success. On every error path nothing is discarded, so a retryable error may be followed by
/// the same call once more data is available.
///
/// ```
/// let mut src: &[u8] = &[0x81, 0x00, 0x05];
/// let v = vle::read_unsigned::<u16, _>(&mut src).unwrap();
/// assert_eq!((v.value, v.len), (0x80, 2));
/// assert_eq!(src, &[0x05]);
/// ```
///
/// # Errors
///
/// Returns `ReadError::Parse` if no terminating byte is found within the maximum length, if the
/// source ended mid-value, or if the value does not fit in `N`. A short peek without end of
/// stream returns the peek error as `ReadError::Io`, or `ReadError::Incomplete` if there was
/// none.
pub fn read_unsigned<N: VleUnsigned, S: PeekSource + ?Sized>(
    src: &mut S,
) -> Result<Decoded<N>, ReadError> {
    read_with(src, max_unsigned_len::<N>(), unsigned_from_buf)
}

/// Read and parse a signed integer from `src`.
///
/// Same contract as `read_unsigned()`, peeking up to `max_signed_len::<N>()` bytes.
pub fn read_signed<N: VleSigned, S: PeekSource + ?Sized>(
    src: &mut S,
) -> Result<Decoded<N>, ReadError> {
    read_with(src, max_signed_len::<N>(), signed_from_buf)
}

/// Extension for `PeekSource` to read vle values in method position.
pub trait VleRead: PeekSource {
    #[inline]
    fn read_vle_unsigned<N: VleUnsigned>(&mut self) -> Result<Decoded<N>, ReadError> {
        read_unsigned(self)
    }

    #[inline]
    fn read_vle_signed<N: VleSigned>(&mut self) -> Result<Decoded<N>, ReadError> {
        read_signed(self)
    }
}

impl<S: PeekSource + ?Sized> VleRead for S {}
