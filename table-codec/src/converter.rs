//! the conversion contract shared by all field codecs

use std::collections::BTreeMap;

use crate::context::FontContext;
use crate::diagnostics::WarningSink;
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::glyph_order::GlyphOrder;
use crate::write::TableWriter;
use crate::xml::{Attributes, Element, XmlWriter};

/// Identifies the field a converter instance is bound to.
///
/// The name appears in diagnostics so a failed pass points at the field
/// that raised it. `repeat` and `aux` are hints consumed by container
/// tables (the name of a count field, a bit mask); this crate carries them
/// through without interpreting them.
#[derive(Clone, Debug, Default)]
pub struct Descriptor {
    name: String,
    order: usize,
    repeat: Option<String>,
    aux: Option<i64>,
}

impl Descriptor {
    /// A descriptor for the field named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Descriptor {
            name: name.into(),
            order: 0,
            repeat: None,
            aux: None,
        }
    }

    /// Attach the field's position within its table.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Attach the name of the field holding this field's repeat count.
    pub fn with_repeat(mut self, field: impl Into<String>) -> Self {
        self.repeat = Some(field.into());
        self
    }

    /// Attach an auxiliary hint (a bit mask, usually).
    pub fn with_aux(mut self, aux: i64) -> Self {
        self.aux = Some(aux);
        self
    }

    /// The field's semantic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's position within its table.
    pub fn order(&self) -> usize {
        self.order
    }

    /// The name of the field holding this field's repeat count, if any.
    pub fn repeat(&self) -> Option<&str> {
        self.repeat.as_deref()
    }

    /// The auxiliary hint, if any.
    pub fn aux(&self) -> Option<i64> {
        self.aux
    }
}

/// Values of sibling fields decoded earlier in the same table.
///
/// Container tables populate this so a converter that needs a previously
/// read count or format can find it by field name. The converters in this
/// crate pass it through untouched.
#[derive(Clone, Debug, Default)]
pub struct LocalContext {
    values: BTreeMap<String, i64>,
}

impl LocalContext {
    pub fn new() -> Self {
        Default::default()
    }

    /// Record the decoded value of a sibling field.
    pub fn set(&mut self, field: impl Into<String>, value: i64) {
        self.values.insert(field.into(), value);
    }

    /// The decoded value of a sibling field, if it has been recorded.
    pub fn get(&self, field: &str) -> Option<i64> {
        self.values.get(field).copied()
    }
}

/// Everything a converter may consult during one conversion pass.
///
/// Borrowed state only: the context is created for a pass and discarded
/// with it, and converters never hold one across calls.
#[derive(Clone, Copy)]
pub struct ConvertCtx<'a> {
    font: &'a dyn FontContext,
    warnings: &'a dyn WarningSink,
}

impl<'a> ConvertCtx<'a> {
    pub fn new(font: &'a dyn FontContext, warnings: &'a dyn WarningSink) -> Self {
        ConvertCtx { font, warnings }
    }

    /// The font being converted against.
    pub fn font(&self) -> &dyn FontContext {
        self.font
    }

    /// The font's canonical glyph order.
    pub fn glyph_order(&self) -> &'a GlyphOrder {
        self.font.glyph_order()
    }

    /// Report a repair that did not abort the conversion.
    pub fn warn(&self, message: String) {
        self.warnings.warn(message);
    }
}

/// A typed, reusable codec for one table field.
///
/// A converter moves one field between its three representations: raw
/// big-endian bytes, an in-memory [`Value`](Self::Value), and a textual
/// element. Implementations are immutable and reentrant; a single instance
/// may be shared by any number of conversion passes.
pub trait Converter: Send + Sync {
    /// The in-memory type this converter produces and consumes.
    type Value;

    /// Decode one value, advancing the cursor past the bytes consumed.
    fn read(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        local: &LocalContext,
    ) -> Result<Self::Value, ReadError>;

    /// Decode `count` consecutive values, preserving order and duplicates.
    fn read_array(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        local: &LocalContext,
        count: usize,
    ) -> Result<Vec<Self::Value>, ReadError> {
        (0..count).map(|_| self.read(cursor, ctx, local)).collect()
    }

    /// Encode one value as big-endian bytes.
    fn write(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        local: &LocalContext,
        value: &Self::Value,
    ) -> Result<(), WriteError>;

    /// Encode consecutive values in order.
    fn write_array(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        local: &LocalContext,
        values: &[Self::Value],
    ) -> Result<(), WriteError> {
        values
            .iter()
            .try_for_each(|value| self.write(writer, ctx, local, value))
    }

    /// Build a value from a parsed element's attributes and children.
    fn xml_read(
        &self,
        attributes: &Attributes,
        children: &[Element],
        ctx: &ConvertCtx<'_>,
    ) -> Result<Self::Value, XmlError>;

    /// Render `value` as an element named `name`.
    ///
    /// Caller-supplied `attrs` are emitted first, before any attributes the
    /// converter adds, in the order given.
    fn xml_write(
        &self,
        writer: &mut XmlWriter,
        ctx: &ConvertCtx<'_>,
        value: &Self::Value,
        name: &str,
        attrs: &[(&str, &str)],
    );
}
