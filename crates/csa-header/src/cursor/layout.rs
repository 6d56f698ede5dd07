use super::error::CursorError;

/// One scalar or byte-string slot in a [`LayoutPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// Fixed-length byte string (`<n>s`).
    Bytes(usize),
    /// Skipped padding bytes (`<n>x`); produces no field.
    Pad(usize),
}

impl FieldKind {
    pub fn size(self) -> usize {
        match self {
            FieldKind::I16 | FieldKind::U16 => 2,
            FieldKind::I32 | FieldKind::U32 | FieldKind::F32 => 4,
            FieldKind::I64 | FieldKind::U64 | FieldKind::F64 => 8,
            FieldKind::Bytes(len) | FieldKind::Pad(len) => len,
        }
    }

    fn scalar(code: char) -> Option<Self> {
        match code {
            'h' => Some(FieldKind::I16),
            'H' => Some(FieldKind::U16),
            'i' => Some(FieldKind::I32),
            'I' => Some(FieldKind::U32),
            'q' => Some(FieldKind::I64),
            'Q' => Some(FieldKind::U64),
            'f' => Some(FieldKind::F32),
            'd' => Some(FieldKind::F64),
            _ => None,
        }
    }
}

/// A decoded field; byte strings borrow from the cursor's buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Field<'a> {
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Bytes(&'a [u8]),
}

/// Byte-layout plan derived from a format descriptor.
///
/// Descriptor grammar: a sequence of `[count]code` items, where `code` is one
/// of `h H i I q Q f d` (16/32/64-bit integers, IEEE floats), `s` (byte
/// string of `count` bytes) or `x` (`count` pad bytes). Whitespace between
/// items is ignored. Byte order is a property of the cursor, not of the
/// descriptor.
///
/// # Examples
/// ```
/// use csa_header::cursor::{FieldKind, LayoutPlan};
///
/// let plan = LayoutPlan::parse("64si4s3i").unwrap();
/// assert_eq!(plan.size(), 84);
/// assert_eq!(plan.fields()[0], FieldKind::Bytes(64));
/// assert_eq!(plan.fields().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    fields: Vec<FieldKind>,
    size: usize,
}

impl LayoutPlan {
    pub fn parse(descriptor: &str) -> Result<Self, CursorError> {
        let invalid = |reason: &'static str| CursorError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason,
        };

        let mut fields = Vec::new();
        let mut size = 0usize;
        let mut count: Option<usize> = None;

        for code in descriptor.chars() {
            if let Some(digit) = code.to_digit(10) {
                let next = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|value| value.checked_add(digit as usize))
                    .ok_or_else(|| invalid("repeat count overflow"))?;
                count = Some(next);
                continue;
            }
            if code.is_whitespace() {
                if count.is_some() {
                    return Err(invalid("repeat count must be followed by a code"));
                }
                continue;
            }

            let repeat = count.take().unwrap_or(1);
            let added = match code {
                's' => {
                    fields.push(FieldKind::Bytes(repeat));
                    repeat
                }
                'x' => {
                    fields.push(FieldKind::Pad(repeat));
                    repeat
                }
                _ => {
                    let kind =
                        FieldKind::scalar(code).ok_or_else(|| invalid("unknown format code"))?;
                    fields.extend(std::iter::repeat_n(kind, repeat));
                    kind.size()
                        .checked_mul(repeat)
                        .ok_or_else(|| invalid("layout size overflow"))?
                }
            };
            size = size
                .checked_add(added)
                .ok_or_else(|| invalid("layout size overflow"))?;
        }

        if count.is_some() {
            return Err(invalid("trailing repeat count"));
        }

        Ok(Self { fields, size })
    }

    /// Total number of bytes consumed by the plan.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }
}
