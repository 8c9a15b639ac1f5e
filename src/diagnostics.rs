//! Per-invocation diagnostic reporting.
//!
//! Each pipeline stage takes a `&mut dyn Diagnostics` and reports what it skipped,
//! ignored, or recovered from. Nothing here affects the conversion result, so a
//! stage remains a pure function of its input when handed a recording sink:
//!
//! ```
//! use nbib_endnote::{Diagnostic, pubmed};
//!
//! let mut diagnostics: Vec<Diagnostic> = Vec::new();
//! let record = pubmed::parse("not a tag line\nFAU - Doe, Jane", &mut diagnostics);
//! assert_eq!(record.authors().len(), 1);
//! assert!(matches!(diagnostics[0], Diagnostic::SkippedLine { line: 1, .. }));
//! ```

use crate::rtf::TextEncoding;
use std::fmt;

/// Something a pipeline stage noticed while running.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A line that is neither a tag line nor a continuation (1-based line number).
    SkippedLine { line: usize, text: String },
    /// A well-formed tag line whose tag is not in [`crate::pubmed::NbibTag`].
    UnknownTag { line: usize, tag: String },
    /// An `AU` value that was dropped under the active [`crate::AuthorPolicy`].
    AbbreviatedAuthorIgnored { name: String },
    /// Characters that the target encoding cannot represent were substituted.
    EncodingFallback {
        encoding: TextEncoding,
        substituted: usize,
    },
}

impl Diagnostic {
    /// Whether this diagnostic describes data that did not make it into the output.
    pub fn is_lossy(&self) -> bool {
        !matches!(self, Diagnostic::SkippedLine { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SkippedLine { line, text } => {
                write!(f, "skipped line {line}: {text:?}")
            }
            Diagnostic::UnknownTag { line, tag } => {
                write!(f, "unknown tag {tag} at line {line}")
            }
            Diagnostic::AbbreviatedAuthorIgnored { name } => {
                write!(f, "ignored AU value {name:?}")
            }
            Diagnostic::EncodingFallback {
                encoding,
                substituted,
            } => write!(
                f,
                "{substituted} character(s) not representable in {encoding}, substituted with '?'"
            ),
        }
    }
}

/// A sink for [`Diagnostic`]s, scoped to one conversion.
pub trait Diagnostics {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in order, mostly for tests.
impl Diagnostics for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Forwards diagnostics to [`tracing`] and keeps a count of what was reported.
#[derive(Debug, Clone, Default)]
pub struct TracingDiagnostics {
    reported: usize,
}

impl TracingDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics reported so far.
    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl Diagnostics for TracingDiagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        match &diagnostic {
            Diagnostic::SkippedLine { .. } | Diagnostic::UnknownTag { .. } => {
                tracing::debug!("{diagnostic}")
            }
            Diagnostic::AbbreviatedAuthorIgnored { .. } => tracing::trace!("{diagnostic}"),
            Diagnostic::EncodingFallback { .. } => tracing::warn!("{diagnostic}"),
        }
    }
}
