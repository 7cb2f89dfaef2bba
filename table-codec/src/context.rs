//! shared read-only state for one conversion pass

use codec_types::NameId;

use crate::glyph_order::GlyphOrder;

/// Read-only view of the parts of a font that converters consult.
///
/// One context serves every converter invocation in a conversion pass.
/// Converters receive it by reference on each call and never retain it,
/// so distinct passes over distinct fonts are fully independent.
pub trait FontContext {
    /// The font's canonical glyph order.
    fn glyph_order(&self) -> &GlyphOrder;

    /// The string for `id` in the font's name table, if the font has one.
    fn name_entry(&self, id: NameId) -> Option<&str>;
}
