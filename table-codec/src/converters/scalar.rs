//! fixed-width integer converters

use crate::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::write::TableWriter;
use crate::xml::{Attributes, Element, XmlWriter};

pub(crate) fn require_attr<'a>(
    attributes: &'a Attributes,
    field: &str,
    attr: &'static str,
) -> Result<&'a str, XmlError> {
    attributes.get(attr).ok_or_else(|| XmlError::MissingAttribute {
        field: field.to_string(),
        attr,
    })
}

macro_rules! int_converter {
    ($name:ident, $ty:ty, $docs:literal) => {
        #[doc = $docs]
        ///
        /// Big-endian on the wire. The typed value cannot be out of range by
        /// construction; a textual `value` that does not fit is rejected
        /// when the element is read.
        #[derive(Clone, Debug)]
        pub struct $name {
            desc: Descriptor,
        }

        impl $name {
            pub fn new(desc: Descriptor) -> Self {
                Self { desc }
            }

            pub fn descriptor(&self) -> &Descriptor {
                &self.desc
            }
        }

        impl Converter for $name {
            type Value = $ty;

            fn read(
                &self,
                cursor: &mut Cursor<'_>,
                _ctx: &ConvertCtx<'_>,
                _local: &LocalContext,
            ) -> Result<$ty, ReadError> {
                cursor.read::<$ty>()
            }

            fn write(
                &self,
                writer: &mut TableWriter,
                _ctx: &ConvertCtx<'_>,
                _local: &LocalContext,
                value: &$ty,
            ) -> Result<(), WriteError> {
                writer.write_scalar(*value);
                Ok(())
            }

            fn xml_read(
                &self,
                attributes: &Attributes,
                _children: &[Element],
                _ctx: &ConvertCtx<'_>,
            ) -> Result<$ty, XmlError> {
                let value = require_attr(attributes, self.desc.name(), "value")?;
                value.parse::<$ty>().map_err(|_| XmlError::InvalidNumber {
                    field: self.desc.name().to_string(),
                    attr: "value",
                    value: value.to_string(),
                })
            }

            fn xml_write(
                &self,
                writer: &mut XmlWriter,
                _ctx: &ConvertCtx<'_>,
                value: &$ty,
                name: &str,
                attrs: &[(&str, &str)],
            ) {
                let value = value.to_string();
                let mut all_attrs = attrs.to_vec();
                all_attrs.push(("value", value.as_str()));
                writer.simple_tag(name, &all_attrs);
            }
        }
    };
}

int_converter!(UInt8, u8, "An unsigned 1-byte integer field.");
int_converter!(Int8, i8, "A signed 1-byte integer field.");
int_converter!(UShort, u16, "An unsigned 2-byte integer field.");
int_converter!(Short, i16, "A signed 2-byte integer field.");
int_converter!(ULong, u32, "An unsigned 4-byte integer field.");
int_converter!(Long, i32, "A signed 4-byte integer field.");

#[cfg(test)]
mod tests {
    use crate::test_support::FakeFont;
    use rstest::rstest;

    use super::*;
    use crate::diagnostics::CapturedWarnings;
    use crate::FontData;

    fn read_bytes<C: Converter>(conv: &C, bytes: &[u8]) -> (C::Value, usize) {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let data = FontData::new(bytes);
        let mut cursor = data.cursor();
        let value = conv
            .read(&mut cursor, &ctx, &LocalContext::default())
            .unwrap();
        (value, cursor.position())
    }

    fn write_value<C: Converter>(conv: &C, value: &C::Value) -> Vec<u8> {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = TableWriter::new();
        conv.write(&mut writer, &ctx, &LocalContext::default(), value)
            .unwrap();
        writer.into_data().unwrap()
    }

    #[test]
    fn long_read() {
        let (value, pos) = read_bytes(&Long::new(Descriptor::new("Long")), &[0xFF, 0, 0, 0xEE]);
        assert_eq!(value, -16776978);
        assert_eq!(pos, 4);
    }

    #[test]
    fn long_write() {
        let conv = Long::new(Descriptor::new("Long"));
        assert_eq!(write_value(&conv, &-16777213), [0xFF, 0x00, 0x00, 0x03]);
    }

    #[test]
    fn uint8_read() {
        let (value, pos) = read_bytes(&UInt8::new(Descriptor::new("UInt8")), &[0xFE]);
        assert_eq!(value, 254);
        assert_eq!(pos, 1);
    }

    #[test]
    fn uint8_write() {
        let conv = UInt8::new(Descriptor::new("UInt8"));
        assert_eq!(write_value(&conv, &253), [0xFD]);
    }

    #[test]
    fn short_read_is_signed() {
        let (value, _) = read_bytes(&Short::new(Descriptor::new("Short")), &[0xFF, 0xFE]);
        assert_eq!(value, -2);
    }

    #[rstest]
    #[case(0i32)]
    #[case(314159)]
    #[case(-16776978)]
    #[case(i32::MIN)]
    #[case(i32::MAX)]
    fn long_round_trip(#[case] value: i32) {
        let conv = Long::new(Descriptor::new("Long"));
        let bytes = write_value(&conv, &value);
        let (back, _) = read_bytes(&conv, &bytes);
        assert_eq!(back, value);
    }

    #[rstest]
    #[case(0u16)]
    #[case(0x7D00)]
    #[case(u16::MAX)]
    fn ushort_round_trip(#[case] value: u16) {
        let conv = UShort::new(Descriptor::new("UShort"));
        let bytes = write_value(&conv, &value);
        let (back, _) = read_bytes(&conv, &bytes);
        assert_eq!(back, value);
    }

    #[test]
    fn read_past_end_is_fatal() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let data = FontData::new(&[0xFF, 0x00]);
        let mut cursor = data.cursor();
        let conv = Long::new(Descriptor::new("Long"));
        assert_eq!(
            conv.read(&mut cursor, &ctx, &LocalContext::default()),
            Err(ReadError::OutOfBounds)
        );
    }

    #[test]
    fn xml_read_parses_base_ten() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let conv = Long::new(Descriptor::new("Long"));
        let attrs = Attributes::from([("value", "314159")]);
        assert_eq!(conv.xml_read(&attrs, &[], &ctx).unwrap(), 314159);
    }

    #[test]
    fn xml_read_rejects_out_of_range() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let conv = UInt8::new(Descriptor::new("UInt8"));
        let attrs = Attributes::from([("value", "256")]);
        assert_eq!(
            conv.xml_read(&attrs, &[], &ctx),
            Err(XmlError::InvalidNumber {
                field: "UInt8".into(),
                attr: "value",
                value: "256".into(),
            })
        );
    }

    #[test]
    fn xml_write_keeps_caller_attrs_first() {
        let font = FakeFont::new([] as [&str; 0]);
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let conv = Long::new(Descriptor::new("Long"));
        let mut writer = XmlWriter::new();
        conv.xml_write(&mut writer, &ctx, &291, "Foo", &[("attr", "v")]);
        assert_eq!(writer.as_str(), "<Foo attr=\"v\" value=\"291\"/>");
    }
}
