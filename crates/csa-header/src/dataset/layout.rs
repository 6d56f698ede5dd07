//! Private tag addresses that carry Siemens headers.

use super::Tag;

/// Binary CSA image header.
pub const IMAGE_HEADER: Tag = Tag::new(0x0029, 0x1010);
/// Binary CSA series header.
pub const SERIES_HEADER: Tag = Tag::new(0x0029, 0x1020);

/// XA Enhanced storage: SharedFunctionalGroupsSequence.
pub const SHARED_FUNCTIONAL_GROUPS_SEQUENCE: Tag = Tag::new(0x5200, 0x9229);
/// Siemens private sequence nested in the shared functional group.
pub const XA_PROTOCOL_SEQUENCE: Tag = Tag::new(0x0021, 0x10FE);
/// XProtocol text holding the ASCCONV block.
pub const XA_PROTOCOL_DATA: Tag = Tag::new(0x0021, 0x1019);

/// Leading token of an XProtocol document.
pub const XPROTOCOL_MARKER: &[u8] = b"<XProtocol>";
