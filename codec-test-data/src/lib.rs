//! test helpers shared between the codec crates.

pub mod bebuffer;
pub mod fake_font;

pub use bebuffer::BeBuffer;
pub use fake_font::FakeFont;
