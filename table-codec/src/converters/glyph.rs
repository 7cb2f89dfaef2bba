//! glyph identifier fields

use codec_types::{BigEndian, GlyphId16};

use crate::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
use crate::converters::scalar::require_attr;
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::write::TableWriter;
use crate::xml::{Attributes, Element, XmlWriter};

/// A 2-byte glyph index, surfaced as a glyph name.
///
/// Reading resolves the index through the font's glyph order, synthesizing
/// a name for indices past the end of the known order. Writing resolves
/// the name back to an index; a name the order cannot resolve is fatal.
#[derive(Clone, Debug)]
pub struct GlyphRef {
    desc: Descriptor,
}

impl GlyphRef {
    pub fn new(desc: Descriptor) -> Self {
        GlyphRef { desc }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }
}

impl Converter for GlyphRef {
    type Value = String;

    fn read(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
    ) -> Result<String, ReadError> {
        let gid = cursor.read::<GlyphId16>()?;
        Ok(ctx.glyph_order().name(gid).into_owned())
    }

    fn read_array(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
        count: usize,
    ) -> Result<Vec<String>, ReadError> {
        let order = ctx.glyph_order();
        let gids = cursor.read_array::<BigEndian<GlyphId16>>(count)?;
        Ok(gids
            .iter()
            .map(|gid| order.name(gid.get()).into_owned())
            .collect())
    }

    fn write(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
        value: &String,
    ) -> Result<(), WriteError> {
        let gid = ctx
            .glyph_order()
            .id(value)
            .ok_or_else(|| WriteError::UnknownGlyphName {
                field: self.desc.name().to_string(),
                name: value.clone(),
            })?;
        writer.write_scalar(gid);
        Ok(())
    }

    fn xml_read(
        &self,
        attributes: &Attributes,
        _children: &[Element],
        _ctx: &ConvertCtx<'_>,
    ) -> Result<String, XmlError> {
        require_attr(attributes, self.desc.name(), "value").map(str::to_owned)
    }

    fn xml_write(
        &self,
        writer: &mut XmlWriter,
        _ctx: &ConvertCtx<'_>,
        value: &String,
        name: &str,
        attrs: &[(&str, &str)],
    ) {
        let mut all_attrs = attrs.to_vec();
        all_attrs.push(("value", value.as_str()));
        writer.simple_tag(name, &all_attrs);
    }
}
