//! CSA wire-format constants (source of truth for magic values and record
//! shapes). All multi-byte fields are little-endian.

/// Marker at offset 0 identifying a type 2 header.
pub const TYPE_2_IDENTIFIER: &[u8; 4] = b"SV10";
/// Type 2 prefix: marker plus four reserved bytes.
pub const TYPE_2_PREFIX_LEN: usize = 8;

/// Tag count followed by a reserved word.
pub const PREFIX_FORMAT: &str = "2I";
/// Name, VM, VR, SyngoDT, item count, check bit.
pub const TAG_FORMAT: &str = "64si4s3i";
pub const TAG_RECORD_LEN: usize = 84;
/// Four length words preceding each item value.
pub const ITEM_FORMAT: &str = "4i";
pub const ITEM_RECORD_LEN: usize = 16;

pub const NAME_LEN: usize = 64;
pub const VR_LEN: usize = 4;

pub const VALID_CHECK_BIT_VALUES: [i32; 2] = [77, 205];

/// Item values are padded to this boundary.
pub const BYTE_ALIGNMENT: usize = 4;

/// Tag index whose item count becomes the type 1 length reference.
pub const TYPE_1_REFERENCE_TAG_INDEX: u32 = 1;

/// Tags whose text value is an ASCCONV protocol dump.
pub const ASCII_HEADER_TAGS: &[&str] = &["MrPhoenixProtocol"];
/// String delimiter used by Siemens protocol dumps.
pub const ASCCONV_STRING_DELIMITER: &str = "\"\"";
