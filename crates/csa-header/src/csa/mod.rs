//! Siemens CSA binary header decoding.
//!
//! A CSA header is a tag table: an optional `SV10` prefix (type 2), a tag
//! count, then one 84-byte record per tag followed by that tag's items. Each
//! item carries four length words and a NUL-padded text value aligned to four
//! bytes. Type 1 headers encode item lengths relative to the item count of
//! the second tag; type 2 headers store them directly.
//!
//! The decoder is a single linear pass:
//! `detect variant -> skip prefix -> read tag count -> decode tags`.
//! Numeric VRs convert item text via the table in `vr`; the
//! `MrPhoenixProtocol` tag is further parsed as ASCCONV.
//!
//! Wire constants live in `layout`, text and padding conventions in
//! `reader`, and the state machine in `parser`.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod vr;

pub use error::CsaError;
pub use parser::{CsaTag, CsaType, ParsedResult, decode, detect_csa_type};
