use serde::Serialize;
use tracing::{debug, trace};

use super::error::CsaError;
use super::layout;
use super::reader::{padding_for, read_csa_string};
use super::vr;
use crate::ascconv::parse_ascconv;
use crate::cursor::{ByteCursor, CursorError, Field};
use crate::value::{OrderedMap, Value};

/// CSA wire-layout variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CsaType {
    /// Legacy layout without prefix; item lengths are offset by a reference
    /// item count.
    Type1,
    /// `SV10`-prefixed layout with plain item lengths.
    Type2,
}

/// One decoded CSA element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CsaTag {
    #[serde(rename = "VR")]
    pub representation_code: String,
    #[serde(rename = "VM")]
    pub multiplicity: i32,
    pub value: Value,
}

/// Decoded header: tag name to tag, ordered by the last occurrence of each
/// name in the tag table.
pub type ParsedResult = OrderedMap<CsaTag>;

/// Classify a raw header by its first four bytes.
///
/// # Examples
/// ```
/// use csa_header::{CsaType, detect_csa_type};
///
/// assert_eq!(detect_csa_type(b"SV10\x04\x03\x02\x01"), CsaType::Type2);
/// assert_eq!(detect_csa_type(b"\x01\x00\x00\x00"), CsaType::Type1);
/// assert_eq!(detect_csa_type(b""), CsaType::Type1);
/// ```
pub fn detect_csa_type(raw: &[u8]) -> CsaType {
    if raw.starts_with(layout::TYPE_2_IDENTIFIER) {
        CsaType::Type2
    } else {
        CsaType::Type1
    }
}

/// Decode a raw CSA header into its ordered tag map.
///
/// # Errors
/// Any structural problem aborts the whole decode; no partial result is
/// returned. See [`CsaError`] for the individual cases.
pub fn decode(raw: &[u8]) -> Result<ParsedResult, CsaError> {
    Decoder::new(raw).run()
}

/// Outcome of the per-item length computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemLength {
    Continue(usize),
    /// Type 1 end of items while the VM still expects a value.
    StopWithPlaceholder,
    Stop,
}

struct Decoder<'a> {
    cursor: ByteCursor<'a>,
    csa_type: CsaType,
    header_size: usize,
    first_tag_n_items: Option<i32>,
}

impl<'a> Decoder<'a> {
    fn new(raw: &'a [u8]) -> Self {
        let csa_type = detect_csa_type(raw);
        debug!(?csa_type, header_size = raw.len(), "decoding CSA header");
        Self {
            cursor: ByteCursor::new(raw),
            csa_type,
            header_size: raw.len(),
            first_tag_n_items: None,
        }
    }

    fn run(mut self) -> Result<ParsedResult, CsaError> {
        if self.csa_type == CsaType::Type2 {
            self.cursor.read(layout::TYPE_2_PREFIX_LEN);
        }

        let fields = self.cursor.unpack(layout::PREFIX_FORMAT)?;
        let [Field::U32(n_tags), Field::U32(_)] = fields[..] else {
            return Err(unexpected(layout::PREFIX_FORMAT));
        };

        let mut result = ParsedResult::new();
        for index in 0..n_tags {
            let (name, tag) = self.parse_tag(index)?;
            result.insert_last(name, tag);
        }
        Ok(result)
    }

    fn parse_tag(&mut self, index: u32) -> Result<(String, CsaTag), CsaError> {
        let fields = self.cursor.unpack(layout::TAG_FORMAT)?;
        // The fourth word (SyngoDT) duplicates the VR numerically.
        let [
            Field::Bytes(name_raw),
            Field::I32(vm),
            Field::Bytes(vr_raw),
            Field::I32(_),
            Field::I32(n_items),
            Field::I32(check_bit),
        ] = fields[..]
        else {
            return Err(unexpected(layout::TAG_FORMAT));
        };

        if !layout::VALID_CHECK_BIT_VALUES.contains(&check_bit) {
            return Err(CsaError::InvalidCheckBit {
                index,
                value: check_bit,
                valid: layout::VALID_CHECK_BIT_VALUES,
            });
        }

        let name = read_csa_string(name_raw);
        let representation_code = read_csa_string(vr_raw);
        trace!(index, %name, vr = %representation_code, vm, n_items, "decoding CSA tag");

        if index == layout::TYPE_1_REFERENCE_TAG_INDEX {
            self.first_tag_n_items = Some(n_items);
        }

        let mut value = self.parse_items(n_items, &representation_code, vm)?;
        if layout::ASCII_HEADER_TAGS.contains(&name.as_str()) {
            value = match value {
                Value::Text(text) => {
                    let ascconv = parse_ascconv(&text, layout::ASCCONV_STRING_DELIMITER)?;
                    Value::Map(ascconv.protocol)
                }
                other => {
                    debug!(%name, "ASCII header tag without a text value left as decoded");
                    other
                }
            };
        }

        Ok((
            name,
            CsaTag {
                representation_code,
                multiplicity: vm,
                value,
            },
        ))
    }

    fn parse_items(&mut self, n_items: i32, vr: &str, vm: i32) -> Result<Value, CsaError> {
        let mut n_values = if vm != 0 { vm } else { n_items };
        let converter = vr::converter_for(vr);
        let mut items = Vec::new();

        for item_index in 0..n_items.max(0) {
            let fields = self.cursor.unpack(layout::ITEM_FORMAT)?;
            let [Field::I32(x0), Field::I32(x1), Field::I32(_), Field::I32(_)] = fields[..] else {
                return Err(unexpected(layout::ITEM_FORMAT));
            };

            let item_len = match self.item_length(item_index, vm, x0, x1)? {
                ItemLength::Continue(item_len) => item_len,
                ItemLength::StopWithPlaceholder => {
                    items.push(Value::Text(String::new()));
                    break;
                }
                ItemLength::Stop => break,
            };

            if item_index >= n_values {
                if item_len != 0 {
                    return Err(CsaError::TooManyItems {
                        expected: n_values,
                        vm,
                        index: item_index,
                    });
                }
                continue;
            }

            let text = read_csa_string(self.cursor.read(item_len));
            match converter {
                // An empty item ends the real values of a numeric tag, even
                // when more were declared.
                Some(_) if item_len == 0 => {
                    n_values = item_index;
                    continue;
                }
                Some(convert) => {
                    let value = convert(&text).ok_or_else(|| CsaError::ConversionFailure {
                        vr: vr.to_string(),
                        text: text.clone(),
                    })?;
                    items.push(value);
                }
                None => items.push(Value::Text(text)),
            }

            self.cursor.advance(padding_for(item_len));
        }

        Ok(collapse(items))
    }

    fn item_length(
        &self,
        item_index: i32,
        vm: i32,
        x0: i32,
        x1: i32,
    ) -> Result<ItemLength, CsaError> {
        let position = self.cursor.position();
        match self.csa_type {
            CsaType::Type1 => {
                let stop = if item_index < vm {
                    ItemLength::StopWithPlaceholder
                } else {
                    ItemLength::Stop
                };
                let Some(reference) = self.first_tag_n_items else {
                    debug!(item_index, "type 1 item before the length reference is known");
                    return Ok(stop);
                };
                let item_len = i64::from(x0) - i64::from(reference);
                let destination = position as i64 + item_len;
                if item_len < 0 || destination > self.header_size as i64 {
                    debug!(item_index, item_len, position, "type 1 end of items");
                    return Ok(stop);
                }
                Ok(ItemLength::Continue(item_len as usize))
            }
            CsaType::Type2 => {
                let item_len = usize::try_from(x1).map_err(|_| CsaError::InvalidItemLength {
                    index: item_index,
                    length: x1,
                })?;
                let destination = position.saturating_add(item_len);
                if destination > self.header_size {
                    return Err(CsaError::ReadOverreach {
                        destination,
                        header_size: self.header_size,
                        position,
                    });
                }
                Ok(ItemLength::Continue(item_len))
            }
        }
    }
}

fn collapse(mut items: Vec<Value>) -> Value {
    match items.len() {
        0 => Value::Null,
        1 => items.pop().unwrap_or_default(),
        _ => Value::List(items),
    }
}

fn unexpected(descriptor: &str) -> CsaError {
    CsaError::MalformedLayout(CursorError::UnexpectedFields {
        descriptor: descriptor.to_string(),
    })
}
