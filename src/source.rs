//! The peek/discard capability the streaming decoders read from, and adapters implementing it.
use std::io::{self, Cursor, ErrorKind, Read};

use bytes::{Buf, Bytes, BytesMut};

/// Default initial capacity of a `PeekReader`.
pub const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A buffered byte source that allows lookahead without consuming.
///
/// This is the only capability `read_unsigned()` and `read_signed()` need from their input.
pub trait PeekSource {
    /// Returns up to `n` bytes without advancing the read position.
    ///
    /// Fewer than `n` bytes may be returned; in that case the accompanying error says why.
    /// An error of kind `ErrorKind::UnexpectedEof` means the stream is exhausted, any other
    /// kind is transient and the caller may peek again later. An error may accompany a full
    /// result too, e.g. when the bytes read hit end of stream exactly.
    fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>);

    /// Advances the read position by `n` bytes previously returned by `peek()` and returns the
    /// number of bytes actually discarded.
    fn discard(&mut self, n: usize) -> io::Result<usize>;
}

/// The error slice-backed sources attach to a short peek.
fn eof() -> io::Error {
    ErrorKind::UnexpectedEof.into()
}

/// Shared `peek()` for sources backed by a single contiguous slice.
fn peek_slice(buf: &[u8], n: usize) -> (&[u8], Option<io::Error>) {
    if buf.len() < n {
        (buf, Some(eof()))
    } else {
        (&buf[..n], None)
    }
}

impl<S: PeekSource + ?Sized> PeekSource for &mut S {
    #[inline]
    fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>) {
        (**self).peek(n)
    }

    #[inline]
    fn discard(&mut self, n: usize) -> io::Result<usize> {
        (**self).discard(n)
    }
}

impl PeekSource for &[u8] {
    #[inline]
    fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>) {
        peek_slice(*self, n)
    }

    #[inline]
    fn discard(&mut self, n: usize) -> io::Result<usize> {
        let n = n.min(self.len());
        *self = &self[n..];
        Ok(n)
    }
}

impl<T: AsRef<[u8]>> PeekSource for Cursor<T> {
    fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>) {
        let inner = self.get_ref().as_ref();
        let pos = (self.position() as usize).min(inner.len());
        peek_slice(&inner[pos..], n)
    }

    fn discard(&mut self, n: usize) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len() as u64;
        let pos = self.position().min(len);
        let n = (n as u64).min(len - pos);
        self.set_position(pos + n);
        Ok(n as usize)
    }
}

macro_rules! impl_bytes_source {
    ($buf:ty) => {
        impl PeekSource for $buf {
            #[inline]
            fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>) {
                peek_slice(&self[..], n)
            }

            #[inline]
            fn discard(&mut self, n: usize) -> io::Result<usize> {
                let n = n.min(self.remaining());
                self.advance(n);
                Ok(n)
            }
        }
    };
}
impl_bytes_source!(Bytes);
impl_bytes_source!(BytesMut);

/// Adds a growable lookahead buffer to any `Read`.
///
/// `peek(n)` keeps reading from the inner reader until `n` bytes are buffered, the reader
/// reports end of stream or an error occurs. Errors, `Interrupted` and `WouldBlock` included,
/// are handed back with whatever was buffered so far and nothing is lost: the next `peek()`
/// resumes where this one stopped. End of stream is not sticky, so a reader over a growing
/// file can be peeked again once more data is appended.
pub struct PeekReader<R> {
    inner: R,
    buf: Vec<u8>,
    pos: usize,
}

impl<R: Read> PeekReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            inner,
            buf: Vec::with_capacity(capacity),
            pos: 0,
        }
    }

    /// Returns the bytes buffered but not yet discarded.
    pub fn buffer(&self) -> &[u8] {
        &self.buf[self.pos..]
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Unwraps the reader. Buffered bytes that were not discarded are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Reads at least once into the spare capacity, growing it if `want` bytes would not fit.
    fn fill(&mut self, want: usize) -> io::Result<usize> {
        if self.pos > 0 && self.buf.capacity() - self.pos < want {
            self.buf.drain(..self.pos);
            self.pos = 0;
        }
        let filled = self.buf.len();
        let target = self.pos + want;
        if target > self.buf.capacity() {
            tracing::trace!(
                capacity = self.buf.capacity(),
                target,
                "PeekReader growing buffer"
            );
        }
        self.buf.resize(target.max(self.buf.capacity()), 0);
        let res = self.inner.read(&mut self.buf[filled..]);
        let read = *res.as_ref().unwrap_or(&0);
        self.buf.truncate(filled + read);
        res
    }
}

impl<R: Read> PeekSource for PeekReader<R> {
    fn peek(&mut self, n: usize) -> (&[u8], Option<io::Error>) {
        let mut err = None;
        while self.buf.len() - self.pos < n {
            match self.fill(n) {
                Ok(0) => {
                    err = Some(eof());
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    err = Some(e);
                    break;
                }
            }
        }
        let end = (self.pos + n).min(self.buf.len());
        (&self.buf[self.pos..end], err)
    }

    fn discard(&mut self, n: usize) -> io::Result<usize> {
        let n = n.min(self.buf.len() - self.pos);
        self.pos += n;
        if self.pos == self.buf.len() {
            self.buf.clear();
            self.pos = 0;
        }
        Ok(n)
    }
}
