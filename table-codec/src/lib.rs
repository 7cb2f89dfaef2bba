//! Converting binary font table fields to and from values and text.
//!
//! A font-editing tool that works on binary tables needs three views of
//! every field: the raw big-endian bytes in the file, an in-memory value it
//! can inspect and modify, and a textual element it can show to (and accept
//! back from) a person. This crate provides the [converters][converters]
//! that move between those three views, plus the plumbing they share: a
//! bounds-checked [cursor][font_data] over table bytes, a [writer][write]
//! that resolves sub-table offsets after the fact, the read-only
//! [font context][FontContext] consulted for glyph and name resolution, and
//! a [warning sink][diagnostics] for repairs that do not abort conversion.
//!
//! Converters are immutable and reentrant: one instance may serve any
//! number of conversion passes, including concurrently. All per-pass state
//! lives in the cursor, writer, and context objects handed to each call.
//!
//! # Example
//!
//! ```
//! use table_codec::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
//! use table_codec::converters::scalar::Long;
//! use table_codec::diagnostics::CapturedWarnings;
//! use table_codec::{FontContext, FontData, GlyphOrder};
//!
//! struct NoFont(GlyphOrder);
//! impl FontContext for NoFont {
//!     fn glyph_order(&self) -> &GlyphOrder {
//!         &self.0
//!     }
//!     fn name_entry(&self, _: table_codec::types::NameId) -> Option<&str> {
//!         None
//!     }
//! }
//!
//! let font = NoFont(GlyphOrder::default());
//! let warnings = CapturedWarnings::new();
//! let ctx = ConvertCtx::new(&font, &warnings);
//!
//! let converter = Long::new(Descriptor::new("version"));
//! let data = FontData::new(&[0xFF, 0x00, 0x00, 0xEE]);
//! let mut cursor = data.cursor();
//! let value = converter
//!     .read(&mut cursor, &ctx, &LocalContext::default())
//!     .unwrap();
//! assert_eq!(value, -16776978);
//! ```

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod context;
pub mod converter;
pub mod converters;
pub mod diagnostics;
mod error;
pub mod font_data;
pub mod glyph_order;
pub mod write;
pub mod xml;

#[cfg(test)]
mod test_support;

pub use context::FontContext;
pub use error::{ReadError, WriteError, XmlError};
pub use font_data::{Cursor, FontData};
pub use glyph_order::GlyphOrder;
pub use write::TableWriter;

/// Public re-export of the codec-types crate.
pub extern crate codec_types as types;
