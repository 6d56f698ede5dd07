//! Synthetic CSA header builder shared by the integration tests.
#![allow(dead_code)]

use csa_header::CsaType;

pub const CHECK_BIT: i32 = 77;

#[derive(Debug, Clone)]
pub struct ItemSpec {
    data: Vec<u8>,
    length: Option<i32>,
}

impl ItemSpec {
    pub fn text(text: &str) -> Self {
        Self::bytes(text.as_bytes())
    }

    /// Text stored NUL-terminated, the way scanners write item values.
    pub fn c_text(text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        Self { data, length: None }
    }

    pub fn bytes(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            length: None,
        }
    }

    pub fn empty() -> Self {
        Self::bytes(b"")
    }

    /// Declare a length that differs from the stored data.
    pub fn with_length(mut self, length: i32) -> Self {
        self.length = Some(length);
        self
    }

    fn declared_length(&self) -> i32 {
        self.length.unwrap_or(self.data.len() as i32)
    }
}

#[derive(Debug, Clone)]
pub struct TagSpec {
    name: String,
    vr: String,
    vm: i32,
    n_items: Option<i32>,
    check_bit: i32,
    items: Vec<ItemSpec>,
}

impl TagSpec {
    pub fn new(name: &str, vr: &str, vm: i32) -> Self {
        Self {
            name: name.to_string(),
            vr: vr.to_string(),
            vm,
            n_items: None,
            check_bit: CHECK_BIT,
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: ItemSpec) -> Self {
        self.items.push(item);
        self
    }

    pub fn text_item(self, text: &str) -> Self {
        self.item(ItemSpec::text(text))
    }

    /// Override the declared item count (defaults to the number of items).
    pub fn n_items(mut self, n_items: i32) -> Self {
        self.n_items = Some(n_items);
        self
    }

    pub fn check_bit(mut self, check_bit: i32) -> Self {
        self.check_bit = check_bit;
        self
    }

    fn declared_items(&self) -> i32 {
        self.n_items.unwrap_or(self.items.len() as i32)
    }
}

/// Serialize `tags` as a CSA header of the given variant.
///
/// Type 1 item lengths are written relative to the declared item count of
/// the second tag, which is how the decoder recovers them.
pub fn build(csa_type: CsaType, tags: &[TagSpec]) -> Vec<u8> {
    let mut out = Vec::new();
    if csa_type == CsaType::Type2 {
        out.extend_from_slice(b"SV10");
        out.extend_from_slice(&[4, 3, 2, 1]);
    }
    out.extend_from_slice(&(tags.len() as u32).to_le_bytes());
    out.extend_from_slice(&(CHECK_BIT as u32).to_le_bytes());

    let reference = tags.get(1).map_or(0, TagSpec::declared_items);
    for tag in tags {
        write_tag_record(&mut out, tag);
        for item in &tag.items {
            let length = item.declared_length();
            let x0 = match csa_type {
                CsaType::Type1 => length + reference,
                CsaType::Type2 => length,
            };
            for word in [x0, length, CHECK_BIT, length] {
                out.extend_from_slice(&word.to_le_bytes());
            }
            out.extend_from_slice(&item.data);
            out.resize(out.len() + padding(item.data.len()), 0);
        }
    }
    out
}

pub fn type_2(tags: &[TagSpec]) -> Vec<u8> {
    build(CsaType::Type2, tags)
}

pub fn type_1(tags: &[TagSpec]) -> Vec<u8> {
    build(CsaType::Type1, tags)
}

fn write_tag_record(out: &mut Vec<u8>, tag: &TagSpec) {
    out.extend_from_slice(&fixed(&tag.name, 64));
    out.extend_from_slice(&tag.vm.to_le_bytes());
    out.extend_from_slice(&fixed(&tag.vr, 4));
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&tag.declared_items().to_le_bytes());
    out.extend_from_slice(&tag.check_bit.to_le_bytes());
}

fn fixed(text: &str, len: usize) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(len, 0);
    bytes
}

fn padding(len: usize) -> usize {
    (4 - len % 4) % 4
}
