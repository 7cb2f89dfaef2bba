//! Scalar data types used in binary font tables.
//!
//! Font tables store their fields big-endian and unaligned. This crate
//! provides the conversion layer between those raw bytes and typed values:
//! the [`Scalar`] trait describes how a type maps to its wire bytes, and
//! [`BigEndian`] wraps the raw bytes of a scalar so that arrays of wire
//! values can be borrowed directly out of a table without copying.
//!
//! Identifier types that are distinct in the font model but share the u16
//! wire format ([`GlyphId16`], [`NameId`]) also live here.

#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod glyph_id;
mod name_id;
mod raw;

pub use glyph_id::GlyphId16;
pub use name_id::NameId;
pub use raw::{BeByteArray, BigEndian, FixedSize, Scalar};
