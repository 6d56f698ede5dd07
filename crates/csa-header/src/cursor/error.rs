use thiserror::Error;

/// Errors returned by [`ByteCursor`](super::ByteCursor) structure decoding.
///
/// # Examples
/// ```
/// use csa_header::cursor::CursorError;
///
/// let err = CursorError::MalformedLayout {
///     descriptor: "2I".to_string(),
///     needed: 8,
///     available: 3,
///     position: 0,
/// };
/// assert!(err.to_string().contains("need 8 bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error(
        "malformed layout '{descriptor}' at byte {position}: need {needed} bytes, got {available}"
    )]
    MalformedLayout {
        descriptor: String,
        needed: usize,
        available: usize,
        position: usize,
    },
    #[error("invalid format descriptor '{descriptor}': {reason}")]
    InvalidDescriptor {
        descriptor: String,
        reason: &'static str,
    },
    #[error("layout '{descriptor}' does not match the expected field shape")]
    UnexpectedFields { descriptor: String },
}
