use thiserror::Error;

/// Errors returned by ASCCONV parsing.
///
/// Line numbers are 1-based and refer to the full input text.
///
/// # Examples
/// ```
/// use csa_header::ascconv::AscconvError;
///
/// let err = AscconvError::InvalidValue {
///     line: 4,
///     value: "abc".to_string(),
/// };
/// assert!(err.to_string().contains("line 4"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AscconvError {
    #[error("line {line}: invalid parameter path '{path}'")]
    InvalidPath { line: usize, path: String },
    #[error("line {line}: invalid value '{value}'")]
    InvalidValue { line: usize, value: String },
    #[error("line {line}: '{path}' conflicts with an earlier assignment")]
    PathConflict { line: usize, path: String },
}
