//! Name identifiers
//!
//! A name id selects an entry in a font's name table. The codec treats the
//! id itself as opaque; the predefined constants below cover the entries
//! that editing tools ask about most often.

/// Identifier for an informational string in a font's name table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NameId(u16);

impl NameId {
    /// Copyright notice.
    pub const COPYRIGHT_NOTICE: Self = Self(0);

    /// Font family name.
    pub const FAMILY_NAME: Self = Self(1);

    /// Font subfamily (style) name.
    pub const SUBFAMILY_NAME: Self = Self(2);

    /// Unique font identifier.
    pub const UNIQUE_ID: Self = Self(3);

    /// Full font name.
    pub const FULL_NAME: Self = Self(4);

    /// Version string.
    pub const VERSION_STRING: Self = Self(5);

    /// PostScript name for the font.
    pub const POSTSCRIPT_NAME: Self = Self(6);

    /// Create a new identifier from a raw u16 value.
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Return the identifier as a u16.
    pub const fn to_u16(self) -> u16 {
        self.0
    }

    /// The identifier in big-endian byte order.
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }
}

impl From<u16> for NameId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for NameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

crate::newtype_scalar!(NameId, [u8; 2]);
