//! fixed-length ASCII string fields

use crate::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
use crate::converters::scalar::require_attr;
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::write::TableWriter;
use crate::xml::{Attributes, Element, XmlWriter};

/// A fixed-width, zero-padded ASCII string field.
///
/// The field always occupies exactly `width` bytes on the wire: shorter
/// strings are padded with zero bytes and the cursor moves by the full
/// width on read no matter where the terminating zero falls. Bytes and
/// characters the encoding cannot carry are repaired, with a warning,
/// rather than aborting the conversion.
#[derive(Clone, Debug)]
pub struct FixedString {
    desc: Descriptor,
    width: usize,
}

impl FixedString {
    pub fn new(desc: Descriptor, width: usize) -> Self {
        FixedString { desc, width }
    }

    /// The 64-byte variant used for font name fields.
    pub fn char64(desc: Descriptor) -> Self {
        FixedString::new(desc, 64)
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }

    /// The field's width in bytes.
    pub fn width(&self) -> usize {
        self.width
    }
}

impl Converter for FixedString {
    type Value = String;

    fn read(
        &self,
        cursor: &mut Cursor<'_>,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
    ) -> Result<String, ReadError> {
        let field = cursor.read_array::<u8>(self.width)?;
        let content = match field.iter().position(|byte| *byte == 0) {
            Some(end) => &field[..end],
            None => field,
        };
        let mut repaired = false;
        let value: String = content
            .iter()
            .map(|&byte| {
                if (0x20..=0x7E).contains(&byte) {
                    byte as char
                } else {
                    repaired = true;
                    char::REPLACEMENT_CHARACTER
                }
            })
            .collect();
        if repaired {
            ctx.warn(format!("replaced non-ASCII characters in \"{value}\""));
        }
        Ok(value)
    }

    fn write(
        &self,
        writer: &mut TableWriter,
        ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
        value: &String,
    ) -> Result<(), WriteError> {
        let mut encoded = Vec::with_capacity(self.width);
        let mut replaced = false;
        for ch in value.chars() {
            if ch.is_ascii() {
                encoded.push(ch as u8);
            } else {
                replaced = true;
                encoded.push(b'?');
            }
        }
        if replaced {
            ctx.warn(format!("replacing non-ASCII characters in \"{value}\""));
        }
        if encoded.len() > self.width {
            ctx.warn(format!(
                "truncating overlong \"{value}\" to {} bytes",
                self.width
            ));
            encoded.truncate(self.width);
        }
        encoded.resize(self.width, 0);
        writer.write_slice(&encoded);
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

#[cfg(test)]
mod tests {
    use crate::test_support::FakeFont;

    use super::*;
    use crate::diagnostics::CapturedWarnings;
    use crate::FontData;

    fn char64() -> FixedString {
        FixedString::char64(Descriptor::new("char64"))
    }

    fn padded(bytes: &[u8]) -> Vec<u8> {
        let mut data = bytes.to_vec();
        data.resize(data.len() + 100, 0);
        data
    }

    #[test]
    fn read_stops_at_zero_but_consumes_the_field() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let data = padded(b"Hello\0junk after zero byte");
        let data = FontData::new(&data);
        let mut cursor = data.cursor();
        let value = char64()
            .read(&mut cursor, &ctx, &LocalContext::default())
            .unwrap();
        assert_eq!(value, "Hello");
        assert_eq!(cursor.position(), 64);
        assert!(sink.is_empty());
    }

    #[test]
    fn read_replaces_non_ascii() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let data = padded(b"Hello \xE4 world");
        let data = FontData::new(&data);
        let mut cursor = data.cursor();
        let value = char64()
            .read(&mut cursor, &ctx, &LocalContext::default())
            .unwrap();
        assert_eq!(value, "Hello \u{FFFD} world");
        assert_eq!(cursor.position(), 64);
        assert_eq!(
            sink.messages(),
            ["replaced non-ASCII characters in \"Hello \u{FFFD} world\""]
        );
    }

    #[test]
    fn short_field_is_fatal() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let data = FontData::new(b"Hello");
        let mut cursor = data.cursor();
        assert_eq!(
            char64().read(&mut cursor, &ctx, &LocalContext::default()),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn write_pads_with_zeros() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = TableWriter::new();
        char64()
            .write(&mut writer, &ctx, &LocalContext::default(), &"Hello world".into())
            .unwrap();
        let mut expected = b"Hello world".to_vec();
        expected.resize(64, 0);
        assert_eq!(writer.into_data().unwrap(), expected);
        assert!(sink.is_empty());
    }

    #[test]
    fn write_replaces_non_ascii() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = TableWriter::new();
        char64()
            .write(&mut writer, &ctx, &LocalContext::default(), &"Hello ☃".into())
            .unwrap();
        let mut expected = b"Hello ?".to_vec();
        expected.resize(64, 0);
        assert_eq!(writer.into_data().unwrap(), expected);
        assert_eq!(
            sink.messages(),
            ["replacing non-ASCII characters in \"Hello ☃\""]
        );
    }

    #[test]
    fn write_truncates_overlong_values() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = TableWriter::new();
        let value = "A".repeat(80);
        char64()
            .write(&mut writer, &ctx, &LocalContext::default(), &value)
            .unwrap();
        assert_eq!(writer.into_data().unwrap(), vec![b'A'; 64]);
        assert_eq!(
            sink.messages(),
            [format!("truncating overlong \"{value}\" to 64 bytes")]
        );
    }

    #[test]
    fn xml_round_trip() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let conv = char64();
        let attrs = Attributes::from([("value", "Foo")]);
        assert_eq!(conv.xml_read(&attrs, &[], &ctx).unwrap(), "Foo");

        let mut writer = XmlWriter::new();
        conv.xml_write(&mut writer, &ctx, &"Hello world".into(), "Element", &[("attr", "v")]);
        assert_eq!(
            writer.as_str(),
            "<Element attr=\"v\" value=\"Hello world\"/>"
        );
    }
}
