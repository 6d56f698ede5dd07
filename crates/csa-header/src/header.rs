//! Owned header types and data set entry point.

use std::sync::OnceLock;

use crate::ascconv::{Ascconv, AscconvError, parse_ascconv};
use crate::csa::layout::ASCCONV_STRING_DELIMITER;
use crate::csa::reader::decode_latin1;
use crate::csa::{CsaError, CsaType, ParsedResult, decode, detect_csa_type};
use crate::dataset::{DataSet, ExtractError, Extracted, extract};
use crate::value::{OrderedMap, Value};

/// A raw binary CSA header.
///
/// # Examples
/// ```
/// use csa_header::{CsaHeader, CsaType};
///
/// let mut raw = b"SV10\x04\x03\x02\x01".to_vec();
/// raw.extend_from_slice(&0u32.to_le_bytes());
/// raw.extend_from_slice(&77u32.to_le_bytes());
///
/// let header = CsaHeader::new(raw);
/// assert_eq!(header.csa_type(), CsaType::Type2);
/// assert!(header.is_type_2());
/// assert_eq!(header.header_size(), 16);
/// assert!(header.read()?.is_empty());
/// # Ok::<(), csa_header::CsaError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsaHeader {
    raw: Vec<u8>,
    csa_type: CsaType,
}

impl CsaHeader {
    pub fn new(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let csa_type = detect_csa_type(&raw);
        Self { raw, csa_type }
    }

    pub fn csa_type(&self) -> CsaType {
        self.csa_type
    }

    pub fn is_type_2(&self) -> bool {
        self.csa_type == CsaType::Type2
    }

    pub fn header_size(&self) -> usize {
        self.raw.len()
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Decode the tag table. Each call decodes from scratch.
    pub fn read(&self) -> Result<ParsedResult, CsaError> {
        decode(&self.raw)
    }
}

/// An ASCCONV protocol stored as text (XA Enhanced storage, or an
/// `MrPhoenixProtocol` value obtained elsewhere).
///
/// The first [`CsaAsciiHeader::parsed`] call caches its outcome; later
/// accessors reuse it.
#[derive(Debug, Clone)]
pub struct CsaAsciiHeader {
    text: String,
    parsed: OnceLock<Result<OrderedMap<Value>, AscconvError>>,
}

impl CsaAsciiHeader {
    /// Wrap raw bytes, decoding them as Latin-1.
    pub fn new(bytes: &[u8]) -> Self {
        Self::from_text(decode_latin1(bytes))
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parsed: OnceLock::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parse the protocol into its parameter tree. Always re-parses; see
    /// [`CsaAsciiHeader::parsed`] for the cached tree.
    pub fn parse(&self) -> Result<OrderedMap<Value>, AscconvError> {
        self.parse_ascconv().map(|ascconv| ascconv.protocol)
    }

    /// Parameter tree, parsed on first access.
    pub fn parsed(&self) -> Result<&OrderedMap<Value>, AscconvError> {
        self.parsed
            .get_or_init(|| self.parse())
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Parse the protocol, keeping the preamble and marker attributes.
    pub fn parse_ascconv(&self) -> Result<Ascconv, AscconvError> {
        parse_ascconv(&self.text, ASCCONV_STRING_DELIMITER)
    }

    /// Number of slices (mosaic tiles), from `sSliceArray.lSize`.
    ///
    /// # Examples
    /// ```
    /// use csa_header::CsaAsciiHeader;
    ///
    /// let header = CsaAsciiHeader::from_text("sSliceArray.lSize\t = \t36\n");
    /// assert_eq!(header.n_slices()?, Some(36));
    /// assert_eq!(CsaAsciiHeader::from_text("lA = 1").n_slices()?, None);
    /// # Ok::<(), csa_header::ascconv::AscconvError>(())
    /// ```
    pub fn n_slices(&self) -> Result<Option<i64>, AscconvError> {
        let protocol = self.parsed()?;
        Ok(protocol
            .get("sSliceArray")
            .and_then(|slices| slices.get("lSize"))
            .and_then(Value::as_i64))
    }
}

impl PartialEq for CsaAsciiHeader {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CsaAsciiHeader {}

/// Header located in a data set, typed by its storage form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderSource {
    Binary(CsaHeader),
    Ascii(CsaAsciiHeader),
}

impl From<Extracted> for HeaderSource {
    fn from(extracted: Extracted) -> Self {
        match extracted {
            Extracted::Binary(raw) => HeaderSource::Binary(CsaHeader::new(raw)),
            Extracted::Ascii(bytes) => HeaderSource::Ascii(CsaAsciiHeader::new(&bytes)),
        }
    }
}

/// Locate the `kind` (`"image"` or `"series"`) header in `dataset`.
///
/// # Examples
/// ```
/// use csa_header::dataset::{MemoryDataSet, layout};
/// use csa_header::{HeaderSource, from_dataset};
///
/// let inner = MemoryDataSet::new()
///     .with_bytes(layout::XA_PROTOCOL_DATA, b"<XProtocol>\nsSliceArray.lSize = 2\n".to_vec());
/// let shared = MemoryDataSet::new().with_sequence(layout::XA_PROTOCOL_SEQUENCE, vec![inner]);
/// let dataset = MemoryDataSet::new()
///     .with_sequence(layout::SHARED_FUNCTIONAL_GROUPS_SEQUENCE, vec![shared]);
///
/// let Some(HeaderSource::Ascii(header)) = from_dataset(&dataset, "image")? else {
///     panic!("expected an ASCII header");
/// };
/// assert_eq!(header.n_slices().unwrap(), Some(2));
/// # Ok::<(), csa_header::dataset::ExtractError>(())
/// ```
///
/// # Errors
/// `ExtractError::InvalidArgument` for an unknown `kind`.
pub fn from_dataset<D: DataSet>(
    dataset: &D,
    kind: &str,
) -> Result<Option<HeaderSource>, ExtractError> {
    Ok(extract(dataset, kind)?.map(HeaderSource::from))
}
