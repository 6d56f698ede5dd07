//! Positioned little-endian byte cursor.
//!
//! The cursor reads sequentially from an immutable buffer and decodes
//! fixed-layout records described by struct-style format descriptors
//! (`"64si4s3i"`, `"4i"`, ...). Its position is public state: the CSA
//! decoder moves it directly to skip prefixes and apply alignment padding.
//! Plain `read` never fails and may leave the position past the end of the
//! buffer; only `unpack` enforces bounds.

pub mod error;
pub mod layout;
pub mod reader;

pub use error::CursorError;
pub use layout::{Field, FieldKind, LayoutPlan};
pub use reader::ByteCursor;
