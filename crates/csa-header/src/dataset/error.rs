use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("invalid CSA header kind '{kind}': expected 'image' or 'series'")]
    InvalidArgument { kind: String },
}
