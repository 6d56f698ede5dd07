//! CSA text and padding conventions.

use super::layout;

/// Truncate `bytes` at the first NUL, or return them unchanged if none.
pub fn strip_to_null(bytes: &[u8]) -> &[u8] {
    match bytes.iter().position(|&b| b == 0) {
        Some(end) => &bytes[..end],
        None => bytes,
    }
}

/// Decode single-byte Latin-1 text; every byte maps to the code point of
/// the same value, so decoding cannot fail.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// NUL-truncated Latin-1 string, as stored in tag names, VRs and items.
///
/// # Examples
/// ```
/// use csa_header::csa::reader::read_csa_string;
///
/// assert_eq!(read_csa_string(b"IS\0\0"), "IS");
/// assert_eq!(read_csa_string(b"caf\xe9"), "caf\u{e9}");
/// ```
pub fn read_csa_string(bytes: &[u8]) -> String {
    decode_latin1(strip_to_null(bytes))
}

/// Bytes needed after an item of `item_len` bytes to reach the next
/// alignment boundary.
pub fn padding_for(item_len: usize) -> usize {
    match item_len % layout::BYTE_ALIGNMENT {
        0 => 0,
        remainder => layout::BYTE_ALIGNMENT - remainder,
    }
}
