use thiserror::Error;

use crate::ascconv::AscconvError;
use crate::cursor::CursorError;

/// Errors returned by CSA header decoding. All of them abort the decode.
///
/// # Examples
/// ```
/// use csa_header::CsaError;
///
/// let err = CsaError::InvalidCheckBit {
///     index: 3,
///     value: 12,
///     valid: [77, 205],
/// };
/// assert!(err.to_string().contains("CSA element #3"));
/// ```
#[derive(Debug, Error)]
pub enum CsaError {
    #[error(
        "CSA element #{index} has an invalid check bit value: {value} (valid values are {valid:?}); the header may be corrupted"
    )]
    InvalidCheckBit {
        index: u32,
        value: i32,
        valid: [i32; 2],
    },
    #[error(
        "invalid item length: destination {destination} is beyond the header size ({header_size}) at byte position {position}"
    )]
    ReadOverreach {
        destination: usize,
        header_size: usize,
        position: usize,
    },
    #[error(
        "too many items in CSA element: expected {expected} (VM={vm}) but found a non-empty item at index {index}"
    )]
    TooManyItems { expected: i32, vm: i32, index: i32 },
    #[error("invalid item length {length} for item #{index}")]
    InvalidItemLength { index: i32, length: i32 },
    #[error("malformed CSA header: {0}")]
    MalformedLayout(#[from] CursorError),
    #[error("cannot convert {text:?} to a {vr} value")]
    ConversionFailure { vr: String, text: String },
    #[error("invalid ASCCONV protocol: {0}")]
    Ascconv(#[from] AscconvError),
}
