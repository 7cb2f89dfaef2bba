//! multi-format glyph lookup tables
//!
//! A lookup table encodes a glyph-keyed mapping in one of five binary
//! layouts, selected by a leading 2-byte format tag. See
//! <https://developer.apple.com/fonts/TrueType-Reference-Manual/RM06/Chap6Tables.html#LookupTables>
//! for the on-disk descriptions.

use codec_types::{BigEndian, FixedSize, GlyphId16};
use indexmap::IndexMap;

use crate::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
use crate::converters::scalar::require_attr;
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::write::{OffsetLen, TableWriter};
use crate::xml::{Attributes, Element, XmlWriter};

/// The all-ones unit that terminates segment and pair scans.
const SENTINEL: u16 = 0xFFFF;

/// Unit size of a (last, first, value) segment, formats 2 and 4.
const SEGMENT_UNIT_SIZE: u16 = 6;

/// Unit size of a (glyph, value) pair, format 6.
const PAIR_UNIT_SIZE: u16 = 4;

/// The element name used for one mapping entry in the textual form.
const SUBSTITUTION: &str = "Substitution";

/// How the 2-byte values of a lookup are interpreted.
///
/// This is fixed when the converter is constructed; it is never inferred
/// from the data being converted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupKind {
    /// Values are glyph ids, surfaced as glyph names.
    Glyph,
    /// Values are opaque numbers.
    Value,
}

/// The binary layouts a lookup can be stored in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookupFormat {
    /// One value per glyph in the font, in glyph order.
    Format0,
    /// Binary-searchable segments, one shared value per segment.
    Format2,
    /// Binary-searchable segments pointing at per-glyph value arrays.
    Format4,
    /// Sorted (glyph, value) pairs.
    Format6,
    /// Per-glyph values for one contiguous glyph range.
    Format8,
}

impl LookupFormat {
    /// The format for a tag read from a table.
    ///
    /// The recognized set is closed; anything else is fatal and is never
    /// silently skipped.
    pub fn from_u16(raw: u16) -> Result<LookupFormat, ReadError> {
        match raw {
            0 => Ok(LookupFormat::Format0),
            2 => Ok(LookupFormat::Format2),
            4 => Ok(LookupFormat::Format4),
            6 => Ok(LookupFormat::Format6),
            8 => Ok(LookupFormat::Format8),
            other => Err(ReadError::UnsupportedLookupFormat(other)),
        }
    }

    /// The format's on-disk tag.
    pub const fn to_u16(self) -> u16 {
        match self {
            LookupFormat::Format0 => 0,
            LookupFormat::Format2 => 2,
            LookupFormat::Format4 => 4,
            LookupFormat::Format6 => 6,
            LookupFormat::Format8 => 8,
        }
    }
}

/// The target a lookup entry maps its source glyph to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupValue {
    /// A glyph name, for [`LookupKind::Glyph`] lookups.
    Glyph(String),
    /// An opaque number, for [`LookupKind::Value`] lookups.
    Value(u16),
}

impl std::fmt::Display for LookupValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupValue::Glyph(name) => f.write_str(name),
            LookupValue::Value(value) => value.fmt(f),
        }
    }
}

/// An ordered mapping from source glyph name to target.
///
/// Reading from binary produces entries in ascending source-glyph order;
/// two mappings compare equal regardless of entry order.
pub type LookupMap = IndexMap<String, LookupValue>;

/// Converter for multi-format glyph lookup tables.
///
/// Decoding dispatches on the format tag and always produces the full
/// mapping; encoding uses the single format the converter was constructed
/// with. Picking an output format from the data is a policy decision that
/// belongs to the caller, not this codec.
#[derive(Clone, Debug)]
pub struct AatLookup {
    desc: Descriptor,
    kind: LookupKind,
    write_format: LookupFormat,
}

impl AatLookup {
    pub fn new(desc: Descriptor, kind: LookupKind, write_format: LookupFormat) -> Self {
        AatLookup {
            desc,
            kind,
            write_format,
        }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }

    /// How decoded values are interpreted.
    pub fn kind(&self) -> LookupKind {
        self.kind
    }

    /// The format used when encoding.
    pub fn write_format(&self) -> LookupFormat {
        self.write_format
    }

    fn value_from(&self, raw: u16, ctx: &ConvertCtx<'_>) -> LookupValue {
        match self.kind {
            LookupKind::Glyph => {
                LookupValue::Glyph(ctx.glyph_order().name(GlyphId16::new(raw)).into_owned())
            }
            LookupKind::Value => LookupValue::Value(raw),
        }
    }

    fn raw_value(&self, value: &LookupValue, ctx: &ConvertCtx<'_>) -> Result<u16, WriteError> {
        match value {
            LookupValue::Glyph(name) => ctx
                .glyph_order()
                .id(name)
                .map(GlyphId16::to_u16)
                .ok_or_else(|| WriteError::UnknownGlyphName {
                    field: self.desc.name().to_string(),
                    name: name.clone(),
                }),
            LookupValue::Value(value) => Ok(*value),
        }
    }

    fn read_format0(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
    ) -> Result<LookupMap, ReadError> {
        let order = ctx.glyph_order();
        let values = cursor.read_array::<BigEndian<u16>>(order.len())?;
        let mut mapping = LookupMap::with_capacity(order.len());
        for (gid, value) in values.iter().enumerate() {
            mapping.insert(
                order.name(GlyphId16::new(gid as u16)).into_owned(),
                self.value_from(value.get(), ctx),
            );
        }
        Ok(mapping)
    }

    /// Scan up to `n_units` (last, first, value) segments, stopping the
    /// instant the sentinel appears.
    fn read_segments(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        format: u16,
        n_units: u16,
    ) -> Result<Vec<(u16, u16, u16)>, ReadError> {
        let mut segments = Vec::new();
        let mut saw_sentinel = false;
        let mut units_read = 0u16;
        for _ in 0..n_units {
            let last = cursor.read::<u16>()?;
            let first = cursor.read::<u16>()?;
            let value = cursor.read::<u16>()?;
            units_read += 1;
            if last == SENTINEL && first == SENTINEL && value == SENTINEL {
                saw_sentinel = true;
                break;
            }
            segments.push((first, last, value));
        }
        self.flag_sentinel_mismatch(ctx, format, n_units, units_read, saw_sentinel);
        Ok(segments)
    }

    /// The sentinel is authoritative; if the declared unit count disagrees
    /// with it, say so rather than silently picking one.
    fn flag_sentinel_mismatch(
        &self,
        ctx: &ConvertCtx<'_>,
        format: u16,
        declared: u16,
        read: u16,
        saw_sentinel: bool,
    ) {
        if saw_sentinel && read < declared {
            ctx.warn(format!(
                "lookup format {format} in {}: sentinel ended the scan after {read} of {declared} declared units",
                self.desc.name()
            ));
        } else if !saw_sentinel {
            ctx.warn(format!(
                "lookup format {format} in {}: no sentinel within {declared} declared units",
                self.desc.name()
            ));
        }
    }

    fn read_format2(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
    ) -> Result<LookupMap, ReadError> {
        let header = BinSearchHeader::read(cursor)?;
        if header.unit_size != SEGMENT_UNIT_SIZE {
            return Err(ReadError::MalformedData(
                "unexpected unit size in lookup format 2",
            ));
        }
        let mut segments = self.read_segments(cursor, ctx, 2, header.n_units)?;
        segments.sort_by_key(|&(first, _, _)| first);
        let order = ctx.glyph_order();
        let mut mapping = LookupMap::new();
        for (first, last, value) in segments {
            if last < first {
                return Err(ReadError::MalformedData(
                    "inverted segment range in lookup format 2",
                ));
            }
            for gid in first..=last {
                mapping.insert(
                    order.name(GlyphId16::new(gid)).into_owned(),
                    self.value_from(value, ctx),
                );
            }
        }
        Ok(mapping)
    }

    fn read_format4(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        base: usize,
    ) -> Result<LookupMap, ReadError> {
        let header = BinSearchHeader::read(cursor)?;
        if header.unit_size != SEGMENT_UNIT_SIZE {
            return Err(ReadError::MalformedData(
                "unexpected unit size in lookup format 4",
            ));
        }
        let mut segments = self.read_segments(cursor, ctx, 4, header.n_units)?;
        segments.sort_by_key(|&(first, _, _)| first);
        // The per-segment arrays live at offsets from the start of the
        // lookup; they are read in place and never move the main cursor.
        let data = cursor.data();
        let order = ctx.glyph_order();
        let mut mapping = LookupMap::new();
        for (first, last, offset) in segments {
            if last < first {
                return Err(ReadError::MalformedData(
                    "inverted segment range in lookup format 4",
                ));
            }
            let count = (last - first) as usize + 1;
            let start = base + offset as usize;
            let values = data
                .read_array::<BigEndian<u16>>(start..start + count * u16::RAW_BYTE_LEN)?;
            for (gid, value) in (first..=last).zip(values) {
                mapping.insert(
                    order.name(GlyphId16::new(gid)).into_owned(),
                    self.value_from(value.get(), ctx),
                );
            }
        }
        Ok(mapping)
    }

    fn read_format6(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
    ) -> Result<LookupMap, ReadError> {
        let header = BinSearchHeader::read(cursor)?;
        if header.unit_size != PAIR_UNIT_SIZE {
            return Err(ReadError::MalformedData(
                "unexpected unit size in lookup format 6",
            ));
        }
        let mut pairs = Vec::new();
        let mut saw_sentinel = false;
        let mut units_read = 0u16;
        for _ in 0..header.n_units {
            let glyph = cursor.read::<u16>()?;
            let value = cursor.read::<u16>()?;
            units_read += 1;
            if glyph == SENTINEL && value == SENTINEL {
                saw_sentinel = true;
                break;
            }
            pairs.push((glyph, value));
        }
        self.flag_sentinel_mismatch(ctx, 6, header.n_units, units_read, saw_sentinel);
        pairs.sort_by_key(|&(glyph, _)| glyph);
        let order = ctx.glyph_order();
        let mut mapping = LookupMap::with_capacity(pairs.len());
        for (glyph, value) in pairs {
            mapping.insert(
                order.name(GlyphId16::new(glyph)).into_owned(),
                self.value_from(value, ctx),
            );
        }
        Ok(mapping)
    }

    fn read_format8(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
    ) -> Result<LookupMap, ReadError> {
        let first = cursor.read::<u16>()?;
        let count = cursor.read::<u16>()?;
        let values = cursor.read_array::<BigEndian<u16>>(count as usize)?;
        let order = ctx.glyph_order();
        let mut mapping = LookupMap::with_capacity(count as usize);
        for (k, value) in values.iter().enumerate() {
            let gid = first
                .checked_add(k as u16)
                .ok_or(ReadError::MalformedData(
                    "glyph range overflows in lookup format 8",
                ))?;
            mapping.insert(
                order.name(GlyphId16::new(gid)).into_owned(),
                self.value_from(value.get(), ctx),
            );
        }
        Ok(mapping)
    }

    fn write_format0(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        entries: &[(u16, u16)],
    ) -> Result<(), WriteError> {
        let order = ctx.glyph_order();
        writer.write_scalar(LookupFormat::Format0.to_u16());
        let mut entries = entries.iter();
        for gid in 0..order.len() as u16 {
            match entries.next() {
                Some(&(entry_gid, value)) if entry_gid == gid => writer.write_scalar(value),
                _ => {
                    return Err(WriteError::MissingLookupEntry {
                        field: self.desc.name().to_string(),
                        glyph: order.name(GlyphId16::new(gid)).into_owned(),
                    })
                }
            }
        }
        if entries.next().is_some() {
            return Err(WriteError::UnsupportedMapping {
                field: self.desc.name().to_string(),
                reason: "format 0 covers exactly the glyphs in the glyph order",
            });
        }
        Ok(())
    }

    fn write_format2(
        &self,
        writer: &mut TableWriter,
        entries: &[(u16, u16)],
    ) -> Result<(), WriteError> {
        let segments = single_value_segments(entries);
        writer.write_scalar(LookupFormat::Format2.to_u16());
        let header = BinSearchHeader {
            unit_size: SEGMENT_UNIT_SIZE,
            n_units: self.unit_count(segments.len())?,
        };
        header.write(writer, self.desc.name())?;
        for (first, last, value) in &segments {
            writer.write_scalar(*last);
            writer.write_scalar(*first);
            writer.write_scalar(*value);
        }
        for _ in 0..3 {
            writer.write_scalar(SENTINEL);
        }
        Ok(())
    }

    fn write_format4(
        &self,
        writer: &mut TableWriter,
        entries: &[(u16, u16)],
    ) -> Result<(), WriteError> {
        let segments = array_segments(entries);
        let base = writer.position();
        writer.write_scalar(LookupFormat::Format4.to_u16());
        let header = BinSearchHeader {
            unit_size: SEGMENT_UNIT_SIZE,
            n_units: self.unit_count(segments.len())?,
        };
        header.write(writer, self.desc.name())?;
        let mut slots = Vec::with_capacity(segments.len());
        for (first, last, _) in &segments {
            writer.write_scalar(*last);
            writer.write_scalar(*first);
            slots.push(writer.reserve_offset(OffsetLen::Offset16));
        }
        for _ in 0..3 {
            writer.write_scalar(SENTINEL);
        }
        for ((_, _, values), slot) in segments.iter().zip(slots) {
            let offset = (writer.position() - base) as u32;
            writer.resolve_offset(slot, offset)?;
            for value in values {
                writer.write_scalar(*value);
            }
        }
        Ok(())
    }

    fn write_format6(
        &self,
        writer: &mut TableWriter,
        entries: &[(u16, u16)],
    ) -> Result<(), WriteError> {
        writer.write_scalar(LookupFormat::Format6.to_u16());
        let header = BinSearchHeader {
            unit_size: PAIR_UNIT_SIZE,
            n_units: self.unit_count(entries.len())?,
        };
        header.write(writer, self.desc.name())?;
        for &(glyph, value) in entries {
            writer.write_scalar(glyph);
            writer.write_scalar(value);
        }
        for _ in 0..2 {
            writer.write_scalar(SENTINEL);
        }
        Ok(())
    }

    fn write_format8(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        entries: &[(u16, u16)],
    ) -> Result<(), WriteError> {
        writer.write_scalar(LookupFormat::Format8.to_u16());
        let (first, last) = match (entries.first(), entries.last()) {
            (Some(&(first, _)), Some(&(last, _))) => (first, last),
            _ => {
                writer.write_scalar(0u16);
                writer.write_scalar(0u16);
                return Ok(());
            }
        };
        let count: u16 = ((last - first) as u32 + 1).try_into().map_err(|_| {
            WriteError::UnsupportedMapping {
                field: self.desc.name().to_string(),
                reason: "glyph range too large for format 8",
            }
        })?;
        writer.write_scalar(first);
        writer.write_scalar(count);
        let order = ctx.glyph_order();
        let mut entries = entries.iter().peekable();
        for gid in first..=last {
            match entries.peek() {
                Some(&&(entry_gid, value)) if entry_gid == gid => {
                    entries.next();
                    writer.write_scalar(value);
                }
                _ => {
                    return Err(WriteError::MissingLookupEntry {
                        field: self.desc.name().to_string(),
                        glyph: order.name(GlyphId16::new(gid)).into_owned(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Segment and pair counts include the trailing sentinel unit.
    fn unit_count(&self, real_units: usize) -> Result<u16, WriteError> {
        (real_units + 1)
            .try_into()
            .map_err(|_| WriteError::UnsupportedMapping {
                field: self.desc.name().to_string(),
                reason: "too many units for a lookup header",
            })
    }
}

impl Converter for AatLookup {
    type Value = LookupMap;

    fn read(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
    ) -> Result<LookupMap, ReadError> {
        let base = cursor.position();
        let format = cursor.read::<u16>()?;
        match LookupFormat::from_u16(format)? {
            LookupFormat::Format0 => self.read_format0(cursor, ctx),
            LookupFormat::Format2 => self.read_format2(cursor, ctx),
            LookupFormat::Format4 => self.read_format4(cursor, ctx, base),
            LookupFormat::Format6 => self.read_format6(cursor, ctx),
            LookupFormat::Format8 => self.read_format8(cursor, ctx),
        }
    }

    fn write(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
        value: &LookupMap,
    ) -> Result<(), WriteError> {
        let mut entries = Vec::with_capacity(value.len());
        for (name, target) in value {
            let gid = ctx
                .glyph_order()
                .id(name)
                .ok_or_else(|| WriteError::UnknownGlyphName {
                    field: self.desc.name().to_string(),
                    name: name.clone(),
                })?;
            entries.push((gid.to_u16(), self.raw_value(target, ctx)?));
        }
        entries.sort_by_key(|&(gid, _)| gid);
        match self.write_format {
            LookupFormat::Format0 => self.write_format0(writer, ctx, &entries),
            LookupFormat::Format2 => self.write_format2(writer, &entries),
            LookupFormat::Format4 => self.write_format4(writer, &entries),
            LookupFormat::Format6 => self.write_format6(writer, &entries),
            LookupFormat::Format8 => self.write_format8(writer, ctx, &entries),
        }
    }

    fn xml_read(
        &self,
        _attributes: &Attributes,
        children: &[Element],
        _ctx: &ConvertCtx<'_>,
    ) -> Result<LookupMap, XmlError> {
        let mut mapping = LookupMap::new();
        for child in children {
            if child.name != SUBSTITUTION {
                continue;
            }
            let source = require_attr(&child.attributes, self.desc.name(), "in")?;
            let target = require_attr(&child.attributes, self.desc.name(), "out")?;
            let value = match self.kind {
                LookupKind::Glyph => LookupValue::Glyph(target.to_string()),
                LookupKind::Value => LookupValue::Value(target.parse::<u16>().map_err(|_| {
                    XmlError::InvalidNumber {
                        field: self.desc.name().to_string(),
                        attr: "out",
                        value: target.to_string(),
                    }
                })?),
            };
            mapping.insert(source.to_string(), value);
        }
        Ok(mapping)
    }

    fn xml_write(
        &self,
        writer: &mut XmlWriter,
        _ctx: &ConvertCtx<'_>,
        value: &LookupMap,
        name: &str,
        attrs: &[(&str, &str)],
    ) {
        writer.begin_tag(name, attrs);
        writer.newline();
        for (source, target) in value {
            let target = target.to_string();
            writer.simple_tag(
                SUBSTITUTION,
                &[("in", source.as_str()), ("out", target.as_str())],
            );
            writer.newline();
        }
        writer.end_tag(name);
    }
}

/// The binary-search header shared by lookup formats 2, 4 and 6.
///
/// Only the unit size and unit count matter for decoding; the search
/// fields exist for binary-search consumers and are recomputed on write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BinSearchHeader {
    unit_size: u16,
    n_units: u16,
}

impl BinSearchHeader {
    fn read(cursor: &mut Cursor<'_>) -> Result<Self, ReadError> {
        let unit_size = cursor.read::<u16>()?;
        let n_units = cursor.read::<u16>()?;
        // searchRange, entrySelector, rangeShift
        let _ = cursor.read::<u16>()?;
        let _ = cursor.read::<u16>()?;
        let _ = cursor.read::<u16>()?;
        Ok(BinSearchHeader { unit_size, n_units })
    }

    fn write(self, writer: &mut TableWriter, field: &str) -> Result<(), WriteError> {
        // search_range is unit_size times the largest power of two that
        // fits in n_units; n_units is never 0 here because counts include
        // the sentinel unit.
        let entry_selector = (self.n_units as u32).ilog2();
        let search_range = u32::from(self.unit_size) << entry_selector;
        let total = u32::from(self.unit_size) * u32::from(self.n_units);
        // search_range never exceeds total, so one bound check covers both
        if total > u16::MAX as u32 {
            return Err(WriteError::UnsupportedMapping {
                field: field.to_string(),
                reason: "too many units for a lookup header",
            });
        }
        let range_shift = (total - search_range) as u16;
        let search_range = search_range as u16;
        writer.write_scalar(self.unit_size);
        writer.write_scalar(self.n_units);
        writer.write_scalar(search_range);
        writer.write_scalar(entry_selector as u16);
        writer.write_scalar(range_shift);
        Ok(())
    }
}

/// Merge sorted (glyph, value) entries into inclusive ranges sharing one
/// value.
fn single_value_segments(entries: &[(u16, u16)]) -> Vec<(u16, u16, u16)> {
    let mut segments: Vec<(u16, u16, u16)> = Vec::new();
    for &(gid, value) in entries {
        match segments.last_mut() {
            Some((_, last, seg_value))
                if *last as u32 + 1 == gid as u32 && *seg_value == value =>
            {
                *last = gid;
            }
            _ => segments.push((gid, gid, value)),
        }
    }
    segments
}

/// Merge sorted (glyph, value) entries into inclusive ranges with one
/// value per glyph.
fn array_segments(entries: &[(u16, u16)]) -> Vec<(u16, u16, Vec<u16>)> {
    let mut segments: Vec<(u16, u16, Vec<u16>)> = Vec::new();
    for &(gid, value) in entries {
        match segments.last_mut() {
            Some((_, last, values)) if *last as u32 + 1 == gid as u32 => {
                *last = gid;
                values.push(value);
            }
            _ => segments.push((gid, gid, vec![value])),
        }
    }
    segments
}
