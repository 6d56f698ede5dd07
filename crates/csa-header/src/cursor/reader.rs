use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use byteorder::{ByteOrder, LittleEndian};

use super::error::CursorError;
use super::layout::{Field, FieldKind, LayoutPlan};

/// Sequential reader over an immutable byte buffer.
///
/// The byte order used by [`ByteCursor::unpack`] is a type parameter and
/// defaults to little-endian. Layout plans are cached per cursor, keyed by
/// descriptor, so decoding the same record shape repeatedly parses the
/// descriptor only once.
///
/// # Examples
/// ```
/// use csa_header::cursor::{ByteCursor, Field};
///
/// let bytes = [2u8, 0, 0, 0, 7, 0, 0, 0, b'o', b'k'];
/// let mut cursor = ByteCursor::new(&bytes);
/// let fields = cursor.unpack("2I").unwrap();
/// assert_eq!(fields, [Field::U32(2), Field::U32(7)]);
/// assert_eq!(cursor.read(2), b"ok");
/// assert_eq!(cursor.position(), 10);
/// ```
pub struct ByteCursor<'a, E: ByteOrder = LittleEndian> {
    buffer: &'a [u8],
    position: usize,
    plans: HashMap<String, Rc<LayoutPlan>>,
    order: PhantomData<E>,
}

impl<'a> ByteCursor<'a, LittleEndian> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self::with_byte_order(buffer)
    }
}

impl<'a, E: ByteOrder> ByteCursor<'a, E> {
    pub fn with_byte_order(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            plans: HashMap::new(),
            order: PhantomData,
        }
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move the cursor to an absolute offset. Offsets past the end are
    /// accepted; subsequent reads return no bytes.
    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    /// Return up to `count` bytes and advance the position by exactly
    /// `count`, even when fewer bytes are available.
    pub fn read(&mut self, count: usize) -> &'a [u8] {
        let buffer = self.buffer;
        let start = self.position.min(buffer.len());
        let end = self.position.saturating_add(count).min(buffer.len());
        self.advance(count);
        &buffer[start..end]
    }

    /// Return every byte from the position to the end and move to the end.
    pub fn read_to_end(&mut self) -> &'a [u8] {
        let buffer = self.buffer;
        let start = self.position.min(buffer.len());
        self.position = buffer.len().max(self.position);
        &buffer[start..]
    }

    /// Decode the fixed-layout record described by `descriptor`.
    ///
    /// # Errors
    /// Returns `CursorError::MalformedLayout` when fewer bytes remain than the
    /// layout needs (the position is left untouched), and
    /// `CursorError::InvalidDescriptor` for an unparseable descriptor.
    pub fn unpack(&mut self, descriptor: &str) -> Result<Vec<Field<'a>>, CursorError> {
        let plan = self.plan(descriptor)?;
        let start = self.position;
        if self.remaining() < plan.size() {
            return Err(CursorError::MalformedLayout {
                descriptor: descriptor.to_string(),
                needed: plan.size(),
                available: self.remaining(),
                position: start,
            });
        }

        let buffer = self.buffer;
        let mut offset = start;
        let mut fields = Vec::with_capacity(plan.fields().len());
        for &kind in plan.fields() {
            let bytes = &buffer[offset..offset + kind.size()];
            let field = match kind {
                FieldKind::I16 => Field::I16(E::read_i16(bytes)),
                FieldKind::U16 => Field::U16(E::read_u16(bytes)),
                FieldKind::I32 => Field::I32(E::read_i32(bytes)),
                FieldKind::U32 => Field::U32(E::read_u32(bytes)),
                FieldKind::I64 => Field::I64(E::read_i64(bytes)),
                FieldKind::U64 => Field::U64(E::read_u64(bytes)),
                FieldKind::F32 => Field::F32(E::read_f32(bytes)),
                FieldKind::F64 => Field::F64(E::read_f64(bytes)),
                FieldKind::Bytes(_) => Field::Bytes(bytes),
                FieldKind::Pad(_) => {
                    offset += kind.size();
                    continue;
                }
            };
            fields.push(field);
            offset += kind.size();
        }

        self.position = start + plan.size();
        Ok(fields)
    }

    /// Number of distinct descriptors decoded so far.
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    fn plan(&mut self, descriptor: &str) -> Result<Rc<LayoutPlan>, CursorError> {
        if let Some(plan) = self.plans.get(descriptor) {
            return Ok(Rc::clone(plan));
        }
        let plan = Rc::new(LayoutPlan::parse(descriptor)?);
        self.plans.insert(descriptor.to_string(), Rc::clone(&plan));
        Ok(plan)
    }
}
