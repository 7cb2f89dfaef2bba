//! the textual tree representation
//!
//! Converters render values as elements with attributes, and rebuild values
//! from elements a tool has already parsed. This module is the boundary to
//! that tool: [`XmlWriter`] produces the serialized text, and
//! [`Attributes`]/[`Element`] are the parsed pieces handed back in. Turning
//! a document into elements is the calling tool's job, not this crate's.

/// Writes an indented element tree.
///
/// Output uses two-space indentation and self-closing tags for childless
/// elements. Line breaks are explicit ([`newline`](Self::newline)) so a
/// caller can place trailing comments on the same line as a tag.
#[derive(Debug, Default)]
pub struct XmlWriter {
    buf: String,
    indent: usize,
    needs_indent: bool,
}

impl XmlWriter {
    pub fn new() -> Self {
        Default::default()
    }

    /// `<name attr="value"/>`, with attributes in the order given.
    pub fn simple_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.write_indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push_str("/>");
    }

    /// `<name attr="value">`; subsequent lines indent one level deeper.
    pub fn begin_tag(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.write_indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.push_attrs(attrs);
        self.buf.push('>');
        self.indent += 1;
    }

    /// `</name>`, dropping back one indent level.
    pub fn end_tag(&mut self, name: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.write_indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
    }

    /// `<!-- text -->` at the current position.
    pub fn comment(&mut self, text: &str) {
        self.write_indent();
        self.buf.push_str("<!-- ");
        self.buf.push_str(text);
        self.buf.push_str(" -->");
    }

    /// Raw text at the current position, unescaped.
    pub fn write_raw(&mut self, text: &str) {
        self.write_indent();
        self.buf.push_str(text);
    }

    /// End the current line.
    pub fn newline(&mut self) {
        self.buf.push('\n');
        self.needs_indent = true;
    }

    /// The text written so far.
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Take the finished text out of the writer.
    pub fn into_string(self) -> String {
        self.buf
    }

    fn write_indent(&mut self) {
        if self.needs_indent {
            for _ in 0..self.indent {
                self.buf.push_str("  ");
            }
            self.needs_indent = false;
        }
    }

    fn push_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            push_escaped(&mut self.buf, value);
            self.buf.push('"');
        }
    }
}

fn push_escaped(buf: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '&' => buf.push_str("&amp;"),
            '<' => buf.push_str("&lt;"),
            '>' => buf.push_str("&gt;"),
            '"' => buf.push_str("&quot;"),
            _ => buf.push(ch),
        }
    }
}

/// The attributes of a parsed element, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Default::default()
    }

    /// The value of the first attribute named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(attr, _)| attr == name)
            .map(|(_, value)| value.as_str())
    }

    /// The attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// One parsed element: a name, attributes, and child elements.
///
/// Character data and comments are dropped by the parsing tool before the
/// tree reaches a converter; none of the formats carry meaning there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Element>,
}

impl Element {
    /// A childless element.
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Element {
            name: name.into(),
            attributes,
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_tag_with_attrs() {
        let mut writer = XmlWriter::new();
        writer.simple_tag("Foo", &[("attr", "v"), ("value", "291")]);
        assert_eq!(writer.as_str(), "<Foo attr=\"v\" value=\"291\"/>");
    }

    #[test]
    fn nested_tags_indent() {
        let mut writer = XmlWriter::new();
        writer.begin_tag("Outer", &[]);
        writer.newline();
        writer.simple_tag("Inner", &[("value", "1")]);
        writer.newline();
        writer.end_tag("Outer");
        assert_eq!(
            writer.into_string(),
            "<Outer>\n  <Inner value=\"1\"/>\n</Outer>"
        );
    }

    #[test]
    fn attr_values_are_escaped() {
        let mut writer = XmlWriter::new();
        writer.simple_tag("Foo", &[("value", "a<b&\"c\"")]);
        assert_eq!(
            writer.as_str(),
            "<Foo value=\"a&lt;b&amp;&quot;c&quot;\"/>"
        );
    }

    #[test]
    fn trailing_comment_stays_on_the_line() {
        let mut writer = XmlWriter::new();
        writer.simple_tag("Entity", &[("value", "666")]);
        writer.write_raw("  ");
        writer.comment("missing from name table");
        assert_eq!(
            writer.as_str(),
            "<Entity value=\"666\"/>  <!-- missing from name table -->"
        );
    }

    #[test]
    fn attribute_lookup() {
        let attrs = Attributes::from([("value", "Foo"), ("other", "x")]);
        assert_eq!(attrs.get("value"), Some("Foo"));
        assert_eq!(attrs.get("missing"), None);
    }
}
