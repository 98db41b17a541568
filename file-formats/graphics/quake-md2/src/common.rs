//! Small decoding helpers shared by the record parsers

use memchr::memchr;
use std::io::Read;

use crate::error::{Md2Error, Result};

/// Decode a fixed-capacity name field
///
/// The text stops at the first null byte, or at the end of the field when the
/// name fills it completely. Invalid UTF-8 is replaced rather than rejected.
pub fn decode_fixed_name(bytes: &[u8]) -> String {
    let end = memchr(0, bytes).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}

/// Read a fixed-capacity name field of `N` bytes
pub fn read_fixed_name<R: Read, const N: usize>(
    reader: &mut R,
    section: &'static str,
) -> Result<String> {
    let mut buf = [0u8; N];
    reader
        .read_exact(&mut buf)
        .map_err(Md2Error::reading(section))?;
    Ok(decode_fixed_name(&buf))
}
