use std::str::FromStr;

use tracing::debug;

use super::error::ExtractError;
use super::{DataSet, Tag, layout};

/// Which CSA header to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    Image,
    Series,
}

impl HeaderKind {
    /// Address of the binary CSA header for this kind.
    pub fn address(self) -> Tag {
        match self {
            HeaderKind::Image => layout::IMAGE_HEADER,
            HeaderKind::Series => layout::SERIES_HEADER,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeaderKind::Image => "image",
            HeaderKind::Series => "series",
        }
    }
}

impl FromStr for HeaderKind {
    type Err = ExtractError;

    /// Case-insensitive: `"image"`, `"IMAGE"` and `"Image"` are equivalent.
    fn from_str(kind: &str) -> Result<Self, Self::Err> {
        if kind.eq_ignore_ascii_case("image") {
            Ok(HeaderKind::Image)
        } else if kind.eq_ignore_ascii_case("series") {
            Ok(HeaderKind::Series)
        } else {
            Err(ExtractError::InvalidArgument {
                kind: kind.to_string(),
            })
        }
    }
}

/// Header bytes found in a data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// Binary CSA tag table from the primary address.
    Binary(Vec<u8>),
    /// XProtocol / ASCCONV text from the XA Enhanced location.
    Ascii(Vec<u8>),
}

/// Find the CSA header of the requested kind.
///
/// The binary header at the primary address wins; the XA Enhanced protocol
/// text is consulted only when the primary value is absent or null.
///
/// # Examples
/// ```
/// use csa_header::dataset::{Extracted, MemoryDataSet, extract, layout};
///
/// let dataset = MemoryDataSet::new().with_bytes(layout::SERIES_HEADER, b"SV10".to_vec());
/// assert_eq!(
///     extract(&dataset, "Series").unwrap(),
///     Some(Extracted::Binary(b"SV10".to_vec()))
/// );
/// assert_eq!(extract(&dataset, "image").unwrap(), None);
/// assert!(extract(&dataset, "study").is_err());
/// ```
///
/// # Errors
/// `ExtractError::InvalidArgument` when `kind` is neither `image` nor
/// `series`.
pub fn extract<D: DataSet>(dataset: &D, kind: &str) -> Result<Option<Extracted>, ExtractError> {
    let kind = kind.parse::<HeaderKind>()?;
    Ok(extract_kind(dataset, kind))
}

/// [`extract`] with an already validated kind.
pub fn extract_kind<D: DataSet>(dataset: &D, kind: HeaderKind) -> Option<Extracted> {
    if let Some(bytes) = primary_header(dataset, kind) {
        return Some(Extracted::Binary(bytes.to_vec()));
    }
    let protocol = xa_enhanced_protocol(dataset)?;
    debug!(kind = kind.as_str(), "using XA Enhanced protocol text");
    Some(Extracted::Ascii(protocol.to_vec()))
}

fn primary_header<D: DataSet>(dataset: &D, kind: HeaderKind) -> Option<&[u8]> {
    let tag = kind.address();
    if !dataset.contains(tag) {
        return None;
    }
    dataset.bytes(tag).filter(|bytes| !bytes.is_empty())
}

/// SharedFunctionalGroupsSequence -> item 0 -> private sequence -> item 0 ->
/// protocol data. Any missing step means "not present".
fn xa_enhanced_protocol<D: DataSet>(dataset: &D) -> Option<&[u8]> {
    let shared = dataset
        .items(layout::SHARED_FUNCTIONAL_GROUPS_SEQUENCE)?
        .first()?;
    let protocol = shared.items(layout::XA_PROTOCOL_SEQUENCE)?.first()?;
    let bytes = protocol
        .bytes(layout::XA_PROTOCOL_DATA)
        .filter(|bytes| !bytes.is_empty())?;
    if !bytes.starts_with(layout::XPROTOCOL_MARKER) {
        debug!("XA Enhanced protocol data does not start with <XProtocol>");
    }
    Some(bytes)
}
