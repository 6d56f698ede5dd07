//! Decoder for Siemens CSA headers.
//!
//! Siemens MR scanners store acquisition metadata in private DICOM
//! attributes as a binary "CSA" tag table, and the full protocol as an
//! ASCCONV text dump embedded in one of those tags. This crate decodes both:
//! raw bytes go through a positioned cursor (`cursor`), the CSA tag-table
//! decoder (`csa`) and, for `MrPhoenixProtocol`, the ASCCONV parser
//! (`ascconv`). `dataset` locates the raw bytes inside a host data set.
//! Decoding is byte-oriented and side-effect free; nothing here performs I/O.
//!
//! Invariants:
//! - Little-endian wire layout and Latin-1 text throughout.
//! - Either the whole tag table decodes or the call fails; no partial results.
//! - Result key order is deterministic: CSA tags by last occurrence, ASCCONV
//!   parameters by first assignment.
//!
//! # Examples
//! ```
//! use csa_header::{CsaType, Value, decode};
//!
//! // SV10 prefix, one tag ("EchoTime", VR "DS", VM 1, one 4-byte item).
//! let mut raw = b"SV10\x04\x03\x02\x01".to_vec();
//! raw.extend_from_slice(&1u32.to_le_bytes());
//! raw.extend_from_slice(&77u32.to_le_bytes());
//! let mut name = [0u8; 64];
//! name[..8].copy_from_slice(b"EchoTime");
//! raw.extend_from_slice(&name);
//! raw.extend_from_slice(&1i32.to_le_bytes());
//! raw.extend_from_slice(b"DS\0\0");
//! for word in [3i32, 1, 77] {
//!     raw.extend_from_slice(&word.to_le_bytes());
//! }
//! for word in [4i32, 4, 77, 4] {
//!     raw.extend_from_slice(&word.to_le_bytes());
//! }
//! raw.extend_from_slice(b"2.5\0");
//!
//! let tags = decode(&raw)?;
//! let echo = tags.get("EchoTime").unwrap();
//! assert_eq!(echo.representation_code, "DS");
//! assert_eq!(echo.value, Value::Float(2.5));
//! assert_eq!(csa_header::detect_csa_type(&raw), CsaType::Type2);
//! # Ok::<(), csa_header::CsaError>(())
//! ```

pub mod ascconv;
pub mod csa;
pub mod cursor;
pub mod dataset;
mod header;
mod value;

pub use ascconv::{Ascconv, AscconvError, parse_ascconv, parse_ascconv_text};
pub use csa::{CsaError, CsaTag, CsaType, ParsedResult, decode, detect_csa_type};
pub use dataset::{DataSet, ExtractError, Extracted, HeaderKind, MemoryDataSet, Tag, extract};
pub use header::{CsaAsciiHeader, CsaHeader, HeaderSource, from_dataset};
pub use value::{OrderedMap, Value};
