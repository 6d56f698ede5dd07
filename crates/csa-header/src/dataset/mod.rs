//! Locating CSA bytes inside a DICOM-like data set.
//!
//! The host data set is abstracted behind [`DataSet`]: membership, raw value
//! lookup and sequence item access by `(group, element)` address. Binary CSA
//! headers live at fixed private addresses; XA Enhanced files instead carry
//! an XProtocol text nested two sequences deep, which `extract` uses as a
//! fallback.

pub mod error;
pub mod extract;
pub mod layout;
mod memory;

use std::fmt;

pub use error::ExtractError;
pub use extract::{Extracted, HeaderKind, extract, extract_kind};
pub use memory::{Element, MemoryDataSet};

/// DICOM attribute address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag {
    pub group: u16,
    pub element: u16,
}

impl Tag {
    pub const fn new(group: u16, element: u16) -> Self {
        Self { group, element }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:04X},{:04X})", self.group, self.element)
    }
}

impl From<(u16, u16)> for Tag {
    fn from((group, element): (u16, u16)) -> Self {
        Self::new(group, element)
    }
}

/// Read access to a data set, keyed by tag address.
pub trait DataSet {
    fn contains(&self, tag: Tag) -> bool;

    /// Raw value bytes; `None` when the attribute is absent, null or not a
    /// byte value.
    fn bytes(&self, tag: Tag) -> Option<&[u8]>;

    /// Items of a sequence attribute; `None` when absent or not a sequence.
    fn items(&self, tag: Tag) -> Option<&[Self]>
    where
        Self: Sized;
}
