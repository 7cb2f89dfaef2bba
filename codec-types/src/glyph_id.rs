//! Glyph identifiers
//!
//! Although these are u16s on the wire, we represent them as a distinct
//! type so they cannot be confused with counts or other numeric fields.

/// A 16-bit glyph identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlyphId16(u16);

impl GlyphId16 {
    /// The identifier reserved for unknown glyphs.
    pub const NOTDEF: GlyphId16 = GlyphId16(0);

    /// Construct a new `GlyphId16`.
    pub const fn new(raw: u16) -> Self {
        GlyphId16(raw)
    }

    /// The identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// The identifier in big-endian byte order.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// The identifier `delta` glyphs further along in the glyph order, if
    /// it is representable.
    pub const fn checked_add(self, delta: u16) -> Option<GlyphId16> {
        match self.0.checked_add(delta) {
            Some(raw) => Some(GlyphId16(raw)),
            None => None,
        }
    }
}

impl From<u16> for GlyphId16 {
    fn from(raw: u16) -> Self {
        GlyphId16(raw)
    }
}

impl std::fmt::Display for GlyphId16 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GID_{}", self.0)
    }
}

crate::newtype_scalar!(GlyphId16, [u8; 2]);
