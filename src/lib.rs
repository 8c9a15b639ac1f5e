//! Convert PubMed `.nbib` records into EndNote citation fields.
//!
//! `nbib_endnote` takes the text of one PubMed/MEDLINE record, as exported by the
//! PubMed "Cite" dialog, and produces what EndNote itself would put on the clipboard
//! for a citation: an RTF document holding an `ADDIN EN.CITE` field whose instruction
//! carries the EndNote XML for the reference, plus the display text as plain UTF-16.
//!
//! # Pipeline
//!
//! 1. [`pubmed`]: parse the tag lines into a [`TagRecord`]
//! 2. [`extract()`]: derive a typed [`CitationView`]
//! 3. [`endnote_xml`]: serialize the EndNote XML and the `(Surname, Year)` display text
//! 4. [`rtf`]: wrap both into a [`FieldCodePayload`]
//!
//! Each stage is pure. Whatever a stage skips or substitutes is reported to a
//! [`Diagnostics`] sink passed in by the caller.
//!
//! # Basic Usage
//!
//! ```rust
//! use nbib_endnote::{ConvertOptions, convert};
//!
//! let input = r#"PMID- 38000000
//! TI  - A Study of Things.
//! FAU - Doe, Jane
//! DP  - 2024 Jun
//! JT  - Journal of Things
//! "#;
//!
//! let payload = convert(input, &ConvertOptions::new(), &mut Vec::new()).unwrap();
//! let rtf = String::from_utf8_lossy(&payload.rtf);
//! assert!(rtf.contains("ADDIN EN.CITE <EndNote><Cite><Author>Doe</Author>"));
//! assert!(rtf.contains(r"{\fldrslt (Doe, 2024)}"));
//! ```
//!
//! # Error Handling
//!
//! Conversion fails only when the record names no authors:
//!
//! ```rust
//! use nbib_endnote::{ConvertOptions, ValueError, convert};
//!
//! let options = ConvertOptions::new();
//! let err = convert("PMID- 1\nTI  - Orphan\n", &options, &mut Vec::new()).unwrap_err();
//! assert_eq!(err.error, ValueError::NoAuthorsFound { key: "FAU" });
//! ```
//!
//! # Native messaging host
//!
//! The [`transport`], [`sink`] and [`host`] modules implement the browser side of the
//! conversion: read one framed JSON request, convert it, deliver the payload to a
//! [`PayloadSink`] and answer with a status. The `nbib-endnote-host` binary (feature
//! `cli`) wires these to stdin/stdout.
//!
//! # Features
//!
//! - `regex` - tag-line matching with the `regex` crate (enabled by default)
//! - `lite` - tag-line matching with `regex-lite` instead
//! - `cli` - the `nbib-endnote-host` binary (enabled by default)

pub mod config;
pub mod diagnostics;
pub mod endnote_xml;
pub mod error;
pub mod extract;
pub mod host;
pub mod pubmed;
pub mod rtf;
pub mod sink;
pub mod transport;

// Reexports
pub use config::{AuthorPolicy, AuthorStyle, ConvertOptions};
pub use diagnostics::{Diagnostic, Diagnostics, TracingDiagnostics};
pub use endnote_xml::{EndNoteXmlWriter, SerializedCitation};
pub use error::{CitationError, ParseError, SinkError, TransportError, ValueError};
pub use extract::{ArticleId, CitationView, IdentifierKind, IssnSet, extract};
pub use pubmed::{Author, NbibParser, NbibTag, TagRecord};
pub use rtf::{FieldCodePayload, TextEncoding};
pub use sink::{DirectorySink, MemorySink, PayloadSink};

mod regex;
mod utils;

/// Parse, extract and serialize one record into its EndNote XML and display text.
///
/// # Errors
///
/// Returns `ParseError` if the record has no authors.
pub fn to_citation(
    input: &str,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<SerializedCitation, ParseError> {
    let record = NbibParser::from_options(options).parse(input, diagnostics);
    let view = extract(&record, options)?;
    Ok(EndNoteXmlWriter::from_options(options).serialize(&view))
}

/// Convert one record into the RTF field-code payload.
///
/// # Errors
///
/// Returns `ParseError` if the record has no authors; nothing is serialized then.
pub fn convert(
    input: &str,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> Result<FieldCodePayload, ParseError> {
    let citation = to_citation(input, options, diagnostics)?;
    Ok(rtf::wrap(
        &citation.xml,
        &citation.display_text,
        options,
        diagnostics,
    ))
}
