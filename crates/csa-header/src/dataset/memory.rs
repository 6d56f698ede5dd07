use std::collections::BTreeMap;

use super::{DataSet, Tag};

/// Value stored in a [`MemoryDataSet`].
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Bytes(Vec<u8>),
    /// Attribute present with a null value.
    Empty,
    Sequence(Vec<MemoryDataSet>),
}

/// Owned, in-memory [`DataSet`].
///
/// # Examples
/// ```
/// use csa_header::dataset::{DataSet, MemoryDataSet, layout};
///
/// let dataset = MemoryDataSet::new().with_bytes(layout::IMAGE_HEADER, b"SV10".to_vec());
/// assert!(dataset.contains(layout::IMAGE_HEADER));
/// assert_eq!(dataset.bytes(layout::IMAGE_HEADER), Some(&b"SV10"[..]));
/// assert_eq!(dataset.bytes(layout::SERIES_HEADER), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryDataSet {
    elements: BTreeMap<Tag, Element>,
}

impl MemoryDataSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: Tag, element: Element) -> Option<Element> {
        self.elements.insert(tag, element)
    }

    pub fn with_bytes(mut self, tag: Tag, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(tag, Element::Bytes(bytes.into()));
        self
    }

    pub fn with_empty(mut self, tag: Tag) -> Self {
        self.insert(tag, Element::Empty);
        self
    }

    pub fn with_sequence(mut self, tag: Tag, items: Vec<MemoryDataSet>) -> Self {
        self.insert(tag, Element::Sequence(items));
        self
    }

    pub fn get(&self, tag: Tag) -> Option<&Element> {
        self.elements.get(&tag)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl DataSet for MemoryDataSet {
    fn contains(&self, tag: Tag) -> bool {
        self.elements.contains_key(&tag)
    }

    fn bytes(&self, tag: Tag) -> Option<&[u8]> {
        match self.elements.get(&tag)? {
            Element::Bytes(bytes) => Some(bytes),
            Element::Empty | Element::Sequence(_) => None,
        }
    }

    fn items(&self, tag: Tag) -> Option<&[Self]> {
        match self.elements.get(&tag)? {
            Element::Sequence(items) => Some(items),
            Element::Bytes(_) | Element::Empty => None,
        }
    }
}
