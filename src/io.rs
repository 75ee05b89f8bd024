//! Extensions to `std::io::Write` to support writing vle values.
use std::io::{Result, Write};

use crate::{VleSigned, VleUnsigned};

/// Vle code an unsigned value and write it to `w`. Returns the number of bytes written.
#[inline]
pub fn write_unsigned<N: VleUnsigned>(v: N, w: &mut impl Write) -> Result<usize> {
    let v = v.to_vle_bytes();
    w.write_all(v.as_slice())?;
    Ok(v.len())
}

/// Vle code a signed value and write it to `w`. Returns the number of bytes written.
#[inline]
pub fn write_signed<N: VleSigned>(v: N, w: &mut impl Write) -> Result<usize> {
    let v = v.to_vle_bytes();
    w.write_all(v.as_slice())?;
    Ok(v.len())
}
