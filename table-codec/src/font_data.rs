//! raw table bytes

use std::ops::Range;

use bytemuck::AnyBitPattern;
use codec_types::{FixedSize, Scalar};

use crate::error::ReadError;

/// A reference to the raw bytes of one table.
///
/// This is a wrapper around a byte slice that provides bounds-checked
/// access. It is `Copy`, and sub-table reads work on copies: taking a view
/// of a nested range can never disturb the position of a [`Cursor`] over
/// the parent, which is what guarantees that sibling fields read correctly
/// no matter how many offset jumps happen in between.
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The data from `pos` to the end, if `pos` is in bounds.
    pub fn split_off(&self, pos: usize) -> Option<FontData<'a>> {
        self.bytes.get(pos..).map(FontData::new)
    }

    /// The data in `range`, if it is in bounds.
    pub fn slice(&self, range: Range<usize>) -> Option<FontData<'a>> {
        self.bytes.get(range).map(FontData::new)
    }

    /// Read a scalar at the given offset.
    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, ReadError> {
        self.bytes
            .get(offset..)
            .and_then(T::read)
            .ok_or(ReadError::OutOfBounds)
    }

    /// Borrow the byte range as a slice of unaligned wire values.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], ReadError> {
        let bytes = self.bytes.get(range).ok_or(ReadError::OutOfBounds)?;
        if bytes.len() % T::RAW_BYTE_LEN != 0 {
            return Err(ReadError::InvalidArrayLen);
        }
        bytemuck::try_cast_slice(bytes).map_err(|_| ReadError::InvalidArrayLen)
    }

    /// A cursor over this data, starting at the front.
    pub fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    /// The underlying bytes.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        FontData::new(bytes)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

/// A position in a table's bytes.
///
/// Every read is bounds checked; reading past the end of the data is a
/// fatal [`ReadError::OutOfBounds`], never a short result.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> Cursor<'a> {
    /// The current position, in bytes from the front of the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The data this cursor reads from.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Move the position forward by `n_bytes` without reading.
    pub fn advance_by(&mut self, n_bytes: usize) {
        self.pos += n_bytes;
    }

    /// Read a scalar and advance past it.
    pub fn read<T: Scalar + FixedSize>(&mut self) -> Result<T, ReadError> {
        let value = self.data.read_at(self.pos)?;
        self.pos += T::RAW_BYTE_LEN;
        Ok(value)
    }

    /// Borrow `count` wire values and advance past them.
    pub fn read_array<T: AnyBitPattern + FixedSize>(
        &mut self,
        count: usize,
    ) -> Result<&'a [T], ReadError> {
        let len = count * T::RAW_BYTE_LEN;
        let values = self.data.read_array(self.pos..self.pos + len)?;
        self.pos += len;
        Ok(values)
    }

    /// The number of unread bytes remaining.
    pub fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

#[cfg(test)]
mod tests {
    use codec_types::{BigEndian, GlyphId16};

    use super::*;

    #[test]
    fn cursor_reads_advance() {
        let data = FontData::new(&[0x00, 0x03, 0xFF, 0x00, 0x00, 0xEE]);
        let mut cursor = data.cursor();
        assert_eq!(cursor.read::<GlyphId16>().unwrap(), GlyphId16::new(3));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.read::<i32>().unwrap(), -16776978);
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.read::<u8>(), Err(ReadError::OutOfBounds));
    }

    #[test]
    fn scoped_array_reads_leave_cursor_alone() {
        let data = FontData::new(&[0x00, 0x07, 0x00, 0x08]);
        let cursor = data.cursor();
        let values = data.read_array::<BigEndian<u16>>(0..4).unwrap();
        assert_eq!(values[0].get(), 7);
        assert_eq!(values[1].get(), 8);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn out_of_bounds_array() {
        let data = FontData::new(&[0x00, 0x07]);
        assert_eq!(
            data.read_array::<BigEndian<u16>>(0..4),
            Err(ReadError::OutOfBounds)
        );
    }
}
