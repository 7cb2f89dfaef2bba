//! a minimal font for exercising converters

use std::collections::BTreeMap;

use codec_types::NameId;
use table_codec::{FontContext, GlyphOrder};

/// A font reduced to the two things converters consult: a glyph order and
/// a name table.
#[derive(Clone, Debug, Default)]
pub struct FakeFont {
    glyph_order: GlyphOrder,
    names: BTreeMap<u16, String>,
}

impl FakeFont {
    /// A font with the given glyph names, in index order.
    pub fn new<I>(glyphs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        FakeFont {
            glyph_order: GlyphOrder::new(glyphs).expect("glyph names must be unique"),
            names: BTreeMap::new(),
        }
    }

    /// Add a name-table entry.
    pub fn with_name(mut self, id: u16, value: impl Into<String>) -> Self {
        self.names.insert(id, value.into());
        self
    }
}

impl FontContext for FakeFont {
    fn glyph_order(&self) -> &GlyphOrder {
        &self.glyph_order
    }

    fn name_entry(&self, id: NameId) -> Option<&str> {
        self.names.get(&id.to_u16()).map(String::as_str)
    }
}
