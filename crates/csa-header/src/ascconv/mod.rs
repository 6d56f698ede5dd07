//! ASCCONV protocol text parsing.
//!
//! Siemens scanners embed the acquisition protocol as a flat list of
//! `path = value` assignments, optionally framed by
//! `### ASCCONV BEGIN ... ###` and `### ASCCONV END ###`. Paths use dotted
//! field names with integer subscripts (`sSliceArray.asSlice[0].dThickness`);
//! the parser rebuilds them into a nested [`crate::Value`] tree.
//!
//! Framing and grammar constants live in `layout`; `parser` owns the line
//! scanner and the tree builder.

pub mod error;
pub mod layout;
pub mod parser;

pub use error::AscconvError;
pub use parser::{Ascconv, parse_ascconv, parse_ascconv_text};
