//! the font's canonical glyph order

use std::borrow::Cow;
use std::collections::HashMap;

use codec_types::GlyphId16;

/// The canonical, duplicate-free, index-addressable sequence of glyph names.
///
/// Index 0 is conventionally the notdef glyph. Ids past the end of the
/// known order resolve to a deterministic synthesized name (`glyph57005`
/// for id 57005), and [`id`](Self::id) resolves such names back to the id
/// they were synthesized from, so values survive a round trip even when
/// the order is incomplete.
#[derive(Clone, Debug, Default)]
pub struct GlyphOrder {
    names: Vec<String>,
    ids: HashMap<String, GlyphId16>,
}

/// A glyph name that appears more than once in a glyph order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuplicateGlyphName(pub String);

impl std::fmt::Display for DuplicateGlyphName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "duplicate glyph name \"{}\"", self.0)
    }
}

impl std::error::Error for DuplicateGlyphName {}

impl GlyphOrder {
    /// Create a glyph order from names in index order.
    pub fn new<I>(names: I) -> Result<Self, DuplicateGlyphName>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut ids = HashMap::with_capacity(names.len());
        for (id, name) in names.iter().enumerate() {
            if ids.insert(name.clone(), GlyphId16::new(id as u16)).is_some() {
                return Err(DuplicateGlyphName(name.clone()));
            }
        }
        Ok(GlyphOrder { names, ids })
    }

    /// The number of glyphs in the known order.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// `true` if the order contains no glyphs.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The name for `gid`, synthesizing one for ids past the end.
    pub fn name(&self, gid: GlyphId16) -> Cow<'_, str> {
        match self.names.get(gid.to_u16() as usize) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("glyph{:05}", gid.to_u16())),
        }
    }

    /// The id for `name`, if it is in the order or was synthesized by
    /// [`name`](Self::name).
    pub fn id(&self, name: &str) -> Option<GlyphId16> {
        self.ids
            .get(name)
            .copied()
            .or_else(|| parse_synthesized(name))
    }

    /// The names in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

fn parse_synthesized(name: &str) -> Option<GlyphId16> {
    let digits = name.strip_prefix("glyph")?;
    if digits.len() < 5 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u16>().ok().map(GlyphId16::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_and_synthesized_names() {
        let order = GlyphOrder::new([".notdef", "A", "B", "C"]).unwrap();
        assert_eq!(order.name(GlyphId16::new(2)), "B");
        assert_eq!(order.name(GlyphId16::new(57005)), "glyph57005");
        assert_eq!(order.name(GlyphId16::new(4)), "glyph00004");
    }

    #[test]
    fn reverse_lookup() {
        let order = GlyphOrder::new([".notdef", "A", "B", "C"]).unwrap();
        assert_eq!(order.id("C"), Some(GlyphId16::new(3)));
        assert_eq!(order.id("glyph57005"), Some(GlyphId16::new(57005)));
        assert_eq!(order.id("glyph00004"), Some(GlyphId16::new(4)));
        assert_eq!(order.id("D"), None);
        assert_eq!(order.id("glyphs"), None);
        assert_eq!(order.id("glyph99999"), None);
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = GlyphOrder::new([".notdef", "A", "A"]).unwrap_err();
        assert_eq!(err, DuplicateGlyphName("A".into()));
    }
}
