//! EndNote citation XML serializer.
//!
//! Renders a [CitationView] as the `<EndNote><Cite>…</Cite></EndNote>` document that
//! EndNote embeds in a Word citation field, together with the short display text
//! shown in place of the field.
//!
//! # Example
//!
//! ```
//! use nbib_endnote::{ConvertOptions, endnote_xml, extract, pubmed};
//!
//! let input = "PMID- 1\nFAU - Doe, Jane\nDP  - 2024 Jun\nTI  - A Study.\n";
//! let record = pubmed::parse(input, &mut Vec::new());
//! let view = extract(&record, &ConvertOptions::new()).unwrap();
//!
//! let citation = endnote_xml::serialize(&view);
//! assert_eq!(citation.display_text, "(Doe, 2024)");
//! assert!(citation.xml.contains("<author>Doe, Jane</author>"));
//! assert!(citation.xml.contains("<title>A Study</title>"));
//! ```

mod write;

use crate::config::{AuthorStyle, ConvertOptions};
use crate::extract::CitationView;
use std::borrow::Cow;
use write::XmlBuilder;

/// EndNote reference type written into every record.
pub const REF_TYPE_NAME: &str = "Journal Article";
/// Numeric code of [REF_TYPE_NAME].
pub const REF_TYPE_CODE: u32 = 17;

/// Separator between entries of multi-line fields such as `<notes>`.
const NOTE_SEPARATOR: &str = "\n";

/// The serialized citation: the XML document and its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedCitation {
    pub xml: String,
    pub display_text: String,
}

/// Writer for EndNote citation XML.
#[derive(Debug, Clone, Default)]
pub struct EndNoteXmlWriter {
    author_style: AuthorStyle,
}

impl EndNoteXmlWriter {
    /// Creates a writer with the default [AuthorStyle].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer configured from conversion options.
    #[must_use]
    pub fn from_options(options: &ConvertOptions) -> Self {
        Self {
            author_style: options.author_style(),
        }
    }

    #[must_use]
    pub fn with_author_style(mut self, style: AuthorStyle) -> Self {
        self.author_style = style;
        self
    }

    /// Serialize a citation. This never fails; absent fields are simply left out.
    pub fn serialize(&self, view: &CitationView) -> SerializedCitation {
        let display_text = display_text(view);

        let mut xml = XmlBuilder::new();
        xml.open("EndNote")
            .open("Cite")
            .optional("Author", view.first_author_surname())
            .optional("Year", &view.year)
            .optional("RecNum", &view.pmid)
            .text("DisplayText", &display_text);

        xml.open("record")
            .optional("rec-number", &view.pmid)
            .open_with("ref-type", "name", REF_TYPE_NAME)
            .content(&REF_TYPE_CODE)
            .close("ref-type");

        if !view.authors.is_empty() {
            let authors = view.authors.iter().map(|a| match self.author_style {
                AuthorStyle::Full => Cow::Borrowed(a.name()),
                AuthorStyle::Initials => a.display_name(),
            });
            xml.open("contributors")
                .group("authors", "author", authors)
                .close("contributors");
        }

        let journal = view.journal().unwrap_or_default();
        if !view.title.is_empty() || !journal.is_empty() {
            xml.open("titles")
                .optional("title", &view.title)
                .optional("secondary-title", journal)
                .close("titles");
        }

        if view.journal_full.is_some() || view.journal_abbr.is_some() {
            xml.open("periodical")
                .optional("full-title", view.journal_full.as_deref().unwrap_or_default())
                .optional("abbr-1", view.journal_abbr.as_deref().unwrap_or_default())
                .close("periodical");
        }

        xml.optional("volume", &view.volume)
            .optional("number", &view.issue)
            .optional("pages", &view.pages);

        let month = view.month.as_deref().unwrap_or_default();
        if !view.year.is_empty() || !month.is_empty() {
            xml.open("dates").optional("year", &view.year);
            if !month.is_empty() {
                xml.open("pub-dates").text("date", month).close("pub-dates");
            }
            xml.close("dates");
        }

        let article_id = view.article_id.as_ref().map_or("", |id| id.value.as_str());
        xml.optional("isbn", &view.issn.linking.join(NOTE_SEPARATOR))
            .optional("electronic-resource-num", article_id)
            .optional("abstract", &view.abstract_text)
            .optional("language", &view.language)
            .each("author-address", &view.addresses);

        // MeSH headings come before free keywords
        xml.group(
            "keywords",
            "keyword",
            view.mesh_terms.iter().chain(&view.keywords),
        );

        xml.optional("notes", &notes(view).join(NOTE_SEPARATOR))
            .optional("accession-num", &view.pmid)
            .optional("custom3", &view.owner)
            .optional("custom4", &view.epub_date);

        xml.close("record").close("Cite").close("EndNote");
        SerializedCitation {
            xml: xml.finish(),
            display_text,
        }
    }
}

/// Serialize a citation with the default [AuthorStyle].
pub fn serialize(view: &CitationView) -> SerializedCitation {
    EndNoteXmlWriter::new().serialize(view)
}

/// `(Surname, Year)`, or `(PMID)` when either part is missing.
pub fn display_text(view: &CitationView) -> String {
    let surname = view.first_author_surname();
    if !surname.is_empty() && !view.year.is_empty() {
        format!("({surname}, {})", view.year)
    } else {
        format!("({})", view.pmid)
    }
}

/// Secondary metadata without a dedicated element, in note order.
fn notes(view: &CitationView) -> Vec<&str> {
    let mut notes: Vec<&str> = Vec::new();
    notes.extend(view.issn.electronic.iter().map(String::as_str));
    notes.extend(view.authors.iter().map(|a| a.name()));
    notes.extend(view.publication_types.iter().map(String::as_str));
    notes.push(&view.source);
    notes.push(&view.place);
    notes.retain(|s| !s.is_empty());
    notes
}
