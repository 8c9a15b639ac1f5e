//! Low-level EndNote XML writing.

use quick_xml::escape::escape;
use std::fmt::Display;

/// Appends EndNote XML elements to a string, escaping all text content.
///
/// Elements built with [XmlBuilder::optional] and [XmlBuilder::each] are skipped
/// when their value is empty, so callers never emit `<volume></volume>`.
#[derive(Debug, Default)]
pub(crate) struct XmlBuilder {
    out: String,
}

impl XmlBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn open(&mut self, name: &str) -> &mut Self {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push('>');
        self
    }

    /// Open an element with one attribute; the attribute value is escaped.
    pub(crate) fn open_with(&mut self, name: &str, attr: &str, value: &str) -> &mut Self {
        self.out.push('<');
        self.out.push_str(name);
        self.out.push(' ');
        self.out.push_str(attr);
        self.out.push_str("=\"");
        self.out.push_str(&escape(value));
        self.out.push_str("\">");
        self
    }

    pub(crate) fn close(&mut self, name: &str) -> &mut Self {
        self.out.push_str("</");
        self.out.push_str(name);
        self.out.push('>');
        self
    }

    /// Append escaped text content to the currently open element.
    pub(crate) fn content<T: Display + ?Sized>(&mut self, text: &T) -> &mut Self {
        let text = text.to_string();
        self.out.push_str(&escape(text.as_str()));
        self
    }

    /// Write `<name>text</name>` regardless of whether `text` is empty.
    pub(crate) fn text<T: Display + ?Sized>(&mut self, name: &str, text: &T) -> &mut Self {
        self.open(name).content(text).close(name)
    }

    /// Write `<name>text</name>` only if `text` is non-empty.
    pub(crate) fn optional(&mut self, name: &str, text: &str) -> &mut Self {
        if !text.is_empty() {
            self.text(name, text);
        }
        self
    }

    /// Write one `<name>` element per non-empty item, in order.
    pub(crate) fn each<I, S>(&mut self, name: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for item in items {
            self.optional(name, item.as_ref());
        }
        self
    }

    /// Write `<outer>` containing one `<inner>` per non-empty item, or nothing when
    /// every item is empty.
    pub(crate) fn group<I, S>(&mut self, outer: &str, inner: &str, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<S> = items
            .into_iter()
            .filter(|s| !s.as_ref().is_empty())
            .collect();
        if !items.is_empty() {
            self.open(outer);
            self.each(inner, items);
            self.close(outer);
        }
        self
    }

    pub(crate) fn finish(self) -> String {
        self.out
    }
}
