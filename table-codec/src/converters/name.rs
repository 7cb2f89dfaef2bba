//! name table identifier fields

use codec_types::NameId;

use crate::converter::{ConvertCtx, Converter, Descriptor, LocalContext};
use crate::converters::scalar::require_attr;
use crate::error::{ReadError, WriteError, XmlError};
use crate::font_data::Cursor;
use crate::write::TableWriter;
use crate::xml::{Attributes, Element, XmlWriter};

/// A 2-byte name table identifier.
///
/// On the wire this is an ordinary unsigned 2-byte field. The textual side
/// annotates the element with the resolved name-table string as a trailing
/// comment, so a person editing the text can see which name an id refers
/// to; an id the font cannot resolve is annotated as missing and reported
/// as a warning, not an error.
#[derive(Clone, Debug)]
pub struct NameRef {
    desc: Descriptor,
}

impl NameRef {
    pub fn new(desc: Descriptor) -> Self {
        NameRef { desc }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.desc
    }
}

impl Converter for NameRef {
    type Value = NameId;

    fn read(
        &self,
        cursor: &mut Cursor<'_>,
        _ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
    ) -> Result<NameId, ReadError> {
        cursor.read::<NameId>()
    }

    fn write(
        &self,
        writer: &mut TableWriter,
        _ctx: &ConvertCtx<'_>,
        _local: &LocalContext,
        value: &NameId,
    ) -> Result<(), WriteError> {
        writer.write_scalar(*value);
        Ok(())
    }

    fn xml_read(
        &self,
        attributes: &Attributes,
        _children: &[Element],
        _ctx: &ConvertCtx<'_>,
    ) -> Result<NameId, XmlError> {
        let value = require_attr(attributes, self.desc.name(), "value")?;
        value
            .parse::<u16>()
            .map(NameId::new)
            .map_err(|_| XmlError::InvalidNumber {
                field: self.desc.name().to_string(),
                attr: "value",
                value: value.to_string(),
            })
    }

    fn xml_write(
        &self,
        writer: &mut XmlWriter,
        ctx: &ConvertCtx<'_>,
        value: &NameId,
        name: &str,
        attrs: &[(&str, &str)],
    ) {
        let id = value.to_u16().to_string();
        let mut all_attrs = attrs.to_vec();
        all_attrs.push(("value", id.as_str()));
        writer.simple_tag(name, &all_attrs);
        writer.write_raw("  ");
        match ctx.font().name_entry(*value) {
            Some(entry) => writer.comment(entry),
            None => {
                ctx.warn(format!("name id {} missing from name table", value.to_u16()));
                writer.comment("missing from name table");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use codec_test_data::BeBuffer;

    use crate::test_support::FakeFont;

    use super::*;
    use crate::diagnostics::CapturedWarnings;
    use crate::FontData;

    fn name_ref() -> NameRef {
        NameRef::new(Descriptor::new("NameID"))
    }

    fn named_font() -> FakeFont {
        FakeFont::new([] as [&str; 0]).with_name(0x123, "Demibold Condensed")
    }

    #[test]
    fn read_is_a_plain_ushort() {
        let font = named_font();
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let buf = BeBuffer::new().push(0x123u16);
        let data = FontData::new(buf.as_slice());
        let mut cursor = data.cursor();
        let value = name_ref()
            .read(&mut cursor, &ctx, &LocalContext::default())
            .unwrap();
        assert_eq!(value, NameId::new(0x123));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn write_is_a_plain_ushort() {
        let font = named_font();
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = TableWriter::new();
        name_ref()
            .write(&mut writer, &ctx, &LocalContext::default(), &NameId::new(0x123))
            .unwrap();
        assert_eq!(writer.into_data().unwrap(), [0x01, 0x23]);
    }

    #[test]
    fn xml_write_annotates_resolved_ids() {
        let font = named_font();
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = XmlWriter::new();
        name_ref().xml_write(&mut writer, &ctx, &NameId::new(291), "FooNameID", &[("attr", "val")]);
        assert_eq!(
            writer.as_str(),
            "<FooNameID attr=\"val\" value=\"291\"/>  <!-- Demibold Condensed -->"
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn xml_write_flags_missing_ids() {
        let font = named_font();
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let mut writer = XmlWriter::new();
        name_ref().xml_write(&mut writer, &ctx, &NameId::new(666), "Entity", &[("attrib", "val")]);
        assert_eq!(
            writer.as_str(),
            "<Entity attrib=\"val\" value=\"666\"/>  <!-- missing from name table -->"
        );
        assert_eq!(sink.messages(), ["name id 666 missing from name table"]);
    }

    #[test]
    fn xml_read_ignores_comments() {
        let font = named_font();
        let sink = CapturedWarnings::new();
        let ctx = ConvertCtx::new(&font, &sink);
        let attrs = Attributes::from([("value", "291")]);
        assert_eq!(
            name_ref().xml_read(&attrs, &[], &ctx).unwrap(),
            NameId::new(291)
        );
    }
}
