//! PubMed `.nbib` tag parser.
//!
//! Turns the text of one `.nbib` record into a [TagRecord]: an ordered multimap of
//! [NbibTag] to value(s), with continuation lines folded and authors resolved.
//!
//! # Example
//!
//! ```
//! use nbib_endnote::pubmed::{self, NbibTag};
//!
//! let input = r#"PMID- 12345678
//! TI  - Example Title
//! FAU - Smith, John
//! "#;
//!
//! let record = pubmed::parse(input, &mut Vec::new());
//! assert_eq!(record.single(NbibTag::Title), "Example Title");
//! assert_eq!(record.authors()[0].name(), "Smith, John");
//! ```

mod author;
mod parse;
mod structure;
mod tags;

pub use author::Author;
pub use structure::{TagRecord, TagValue};
pub use tags::NbibTag;

use crate::config::{AuthorPolicy, ConvertOptions};
use crate::diagnostics::Diagnostics;
use crate::pubmed::parse::nbib_parse;

/// Parser for PubMed formatted `.nbib` records.
#[derive(Debug, Clone, Default)]
pub struct NbibParser {
    author_policy: AuthorPolicy,
}

impl NbibParser {
    /// Creates a new parser with the default [AuthorPolicy].
    ///
    /// # Examples
    ///
    /// ```
    /// use nbib_endnote::pubmed::NbibParser;
    /// let parser = NbibParser::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser configured from conversion options.
    #[must_use]
    pub fn from_options(options: &ConvertOptions) -> Self {
        Self {
            author_policy: options.author_policy(),
        }
    }

    #[must_use]
    pub fn with_author_policy(mut self, policy: AuthorPolicy) -> Self {
        self.author_policy = policy;
        self
    }

    /// Parses the text of one `.nbib` record.
    ///
    /// This never fails; malformed lines are skipped and reported to `diagnostics`.
    pub fn parse(&self, input: &str, diagnostics: &mut dyn Diagnostics) -> TagRecord {
        nbib_parse(input, self.author_policy, diagnostics)
    }
}

/// Parses one `.nbib` record with the default [AuthorPolicy].
pub fn parse(input: &str, diagnostics: &mut dyn Diagnostics) -> TagRecord {
    NbibParser::new().parse(input, diagnostics)
}
