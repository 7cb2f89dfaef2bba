//! Errors reported while converting table data.
//!
//! Each error here is fatal to the conversion pass that raised it: there is
//! no partial result and no retry at this layer. Conditions that can be
//! repaired (replaced characters, truncated strings, missing name-table
//! entries) are not errors; they are reported through the pass's
//! [warning sink](crate::diagnostics::WarningSink) and conversion continues.

/// An error that occurs when decoding binary table data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadError {
    /// A read would pass the end of the data.
    OutOfBounds,
    /// A lookup table declared a format this codec does not recognize.
    UnsupportedLookupFormat(u16),
    /// An array's byte range is not a multiple of its element size.
    InvalidArrayLen,
    /// The data is structurally invalid in a way the other variants do not
    /// cover.
    MalformedData(&'static str),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::OutOfBounds => write!(f, "a read passed the end of the data"),
            ReadError::UnsupportedLookupFormat(format) => {
                write!(f, "unsupported lookup format: {format}")
            }
            ReadError::InvalidArrayLen => {
                write!(f, "array length not a multiple of item size")
            }
            ReadError::MalformedData(msg) => write!(f, "malformed data: {msg}"),
        }
    }
}

impl std::error::Error for ReadError {}

/// An error that occurs when encoding a value as binary table data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteError {
    /// A glyph name with no index in the font's glyph order.
    UnknownGlyphName {
        /// The field being written.
        field: String,
        /// The unresolvable name.
        name: String,
    },
    /// A lookup mapping has no entry for a glyph the chosen format must
    /// cover.
    MissingLookupEntry {
        /// The field being written.
        field: String,
        /// The uncovered glyph.
        glyph: String,
    },
    /// A lookup mapping cannot be represented in the chosen format.
    UnsupportedMapping {
        /// The field being written.
        field: String,
        /// Why the mapping does not fit.
        reason: &'static str,
    },
    /// A resolved offset does not fit in its reserved slot.
    OffsetOverflow(u32),
    /// The writer was finalized while an offset slot was still unresolved.
    UnresolvedOffset,
}

impl std::fmt::Display for WriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteError::UnknownGlyphName { field, name } => {
                write!(f, "unknown glyph name \"{name}\" in {field}")
            }
            WriteError::MissingLookupEntry { field, glyph } => {
                write!(f, "{field} has no entry for glyph \"{glyph}\"")
            }
            WriteError::UnsupportedMapping { field, reason } => {
                write!(f, "cannot encode {field}: {reason}")
            }
            WriteError::OffsetOverflow(value) => {
                write!(f, "offset {value} does not fit in its slot")
            }
            WriteError::UnresolvedOffset => write!(f, "an offset slot was never resolved"),
        }
    }
}

impl std::error::Error for WriteError {}

/// An error that occurs when building a value from parsed textual elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// An element is missing a required attribute.
    MissingAttribute {
        /// The field being read.
        field: String,
        /// The absent attribute.
        attr: &'static str,
    },
    /// An attribute could not be parsed as a number in the field's range.
    InvalidNumber {
        /// The field being read.
        field: String,
        /// The attribute that failed to parse.
        attr: &'static str,
        /// The offending attribute value.
        value: String,
    },
}

impl std::fmt::Display for XmlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            XmlError::MissingAttribute { field, attr } => {
                write!(f, "{field} is missing its \"{attr}\" attribute")
            }
            XmlError::InvalidNumber { field, attr, value } => {
                write!(f, "invalid numeric \"{attr}\" value \"{value}\" in {field}")
            }
        }
    }
}

impl std::error::Error for XmlError {}
