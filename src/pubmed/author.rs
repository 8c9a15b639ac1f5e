//! Author names from `FAU` and `AU` lines, and the order-dependent rules
//! that decide which of them become authors.

use crate::config::AuthorPolicy;
use crate::diagnostics::{Diagnostic, Diagnostics};
use compact_str::CompactString;
use itertools::Itertools;
use std::borrow::Cow;

/// Value of an `AU` or `FAU` line.
#[derive(Clone, PartialEq, Eq)]
pub struct Author {
    /// Author name value, whitespace-normalized.
    name: String,
    /// Is `FAU`
    full: bool,
}

impl Author {
    /// Create an [Author] from an `AU` value.
    pub fn au(name: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            full: false,
        }
    }

    /// Create an [Author] from a `FAU` value.
    pub fn fau(name: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            full: true,
        }
    }

    /// The name exactly as supplied.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The part of the name before its first comma, or the whole name if it has none.
    ///
    /// This is the surname used in display text such as `(Doe, 2024)`.
    pub fn surname(&self) -> &str {
        self.name
            .split_once(',')
            .map_or(self.name.as_str(), |(last, _)| last)
    }

    /// Get the author's last (family) name.
    pub fn last_name(&self) -> &str {
        let parts = if self.full {
            self.name.split_once(", ")
        } else {
            self.name.rsplit_once(' ')
        };
        parts.map_or(self.name.as_str(), |(last_name, _)| last_name)
    }

    /// Get the first initials of the author's (given) names.
    pub fn first_initials(&self) -> CompactString {
        if self.full {
            fau_initials(&self.name)
        } else {
            au_initials(&self.name)
        }
    }

    /// The name as `Last, F. M.`, with one initial per space- or hyphen-separated
    /// given name.
    ///
    /// Names that are not exactly `Last, Given` are returned unchanged.
    ///
    /// ```
    /// use nbib_endnote::Author;
    ///
    /// assert_eq!(Author::fau("Smith, John Paul").display_name(), "Smith, J. P.");
    /// assert_eq!(Author::fau("Smith-Jones, Anne-Marie").display_name(), "Smith-Jones, A. M.");
    /// assert_eq!(Author::fau("Archimedes").display_name(), "Archimedes");
    /// ```
    pub fn display_name(&self) -> Cow<'_, str> {
        let mut parts = self.name.split(", ");
        let (Some(last), Some(given), None) = (parts.next(), parts.next(), parts.next()) else {
            return Cow::Borrowed(&self.name);
        };
        let initials = given
            .split([' ', '-'])
            .filter_map(|s| s.chars().next())
            .map(|c| format!("{c}."))
            .join(" ");
        if initials.is_empty() {
            Cow::Borrowed(&self.name)
        } else {
            Cow::Owned(format!("{last}, {initials}"))
        }
    }

    /// Check whether an `AU` is equivalent to this name.
    ///
    /// `AU` may omit middle initials, for example the name "Francis Harry Compton Crick"
    /// can be represented by any of the following `AU` values: "Crick FH", "Crick FHC".
    pub fn au_equals(&self, au: &str) -> bool {
        let (last_name, initials) = au.rsplit_once(' ').unwrap_or((au, ""));
        self.last_name() == last_name && self.first_initials().starts_with(initials)
    }
}

impl std::fmt::Debug for Author {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(if self.full { "FAU" } else { "AU" })?;
        f.write_str("(")?;
        f.write_str(&self.name)?;
        f.write_str(")")?;
        Ok(())
    }
}

/// Get the initials from an `AU` value.
fn au_initials(au: &str) -> CompactString {
    if let Some((_, r)) = au.rsplit_once(' ') {
        CompactString::new(r)
    } else {
        CompactString::const_new("")
    }
}

/// Get the initials from a `FAU` value.
fn fau_initials(fau: &str) -> CompactString {
    if let Some((_, r)) = fau.split_once(", ") {
        let chars = r.split(' ').map_while(|s| s.chars().next());
        CompactString::from_iter(chars)
    } else {
        CompactString::const_new("")
    }
}

/// An author line in source order, before the [AuthorPolicy] is applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum AuthorLine {
    /// AU - Author
    Abbreviated(String),
    /// FAU - Full author name
    Full(String),
}

/// Resolve authors from the ordered author lines of a record.
pub(crate) fn resolve_authors(
    lines: Vec<AuthorLine>,
    policy: AuthorPolicy,
    diagnostics: &mut dyn Diagnostics,
) -> Vec<Author> {
    let mut authors: Vec<Author> = Vec::with_capacity(lines.len() / 2 + 1);
    for line in lines {
        match line {
            AuthorLine::Full(name) => {
                // FAU always indicates start of new author description
                authors.push(Author::fau(name));
            }
            AuthorLine::Abbreviated(name) => {
                let keep = match policy {
                    AuthorPolicy::FullNameOnly => false,
                    AuthorPolicy::AbbreviatedFallback => {
                        // Add new author if AU is not the same as the previous FAU.
                        let prev = authors.last();
                        !prev.is_some_and(|n| n.full && n.au_equals(&name))
                    }
                };
                if keep {
                    authors.push(Author::au(name));
                } else {
                    diagnostics.report(Diagnostic::AbbreviatedAuthorIgnored { name });
                }
            }
        }
    }
    authors
}
