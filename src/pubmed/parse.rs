use crate::config::AuthorPolicy;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::pubmed::author::{AuthorLine, resolve_authors};
use crate::pubmed::structure::TagRecord;
use crate::pubmed::tags::NbibTag;
use crate::regex::Regex;
use crate::utils::normalize_whitespace;
use either::{Either, Left, Right};
use itertools::Itertools;
use std::iter::{Enumerate, Peekable};
use std::str::Split;
use std::sync::LazyLock;

/// A tag line: 2-4 uppercase letters, a hyphen, then the value.
static TAG_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]{2,4})\s*-\s*(.*)").unwrap());

/// Indentation that marks a line as the continuation of the previous value.
const CONTINUATION_INDENT: &str = "      ";

/// A tag line with its continuation lines folded in.
#[derive(Debug, PartialEq)]
struct TagLine<'a> {
    /// 1-based line number of the tag line.
    line: usize,
    tag: &'a str,
    /// Whitespace-normalized value.
    value: String,
}

/// A non-empty line that is neither a tag line nor a continuation.
#[derive(Debug, PartialEq)]
struct SkippedLine {
    line: usize,
    text: String,
}

/// Iterator over the tag lines of `.nbib` text. Empty lines are dropped; lines that
/// do not start a tag are yielded as [SkippedLine]s and never treated as
/// continuations.
struct TagLines<'a> {
    lines: Peekable<Enumerate<Split<'a, char>>>,
}

impl<'a> TagLines<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.split('\n').enumerate().peekable(),
        }
    }
}

impl<'a> Iterator for TagLines<'a> {
    type Item = Either<SkippedLine, TagLine<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, raw) = self.lines.next()?;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let Some((tag, first)) = split_tag_line(line) else {
                return Some(Left(SkippedLine {
                    line: index + 1,
                    text: line.to_string(),
                }));
            };
            let mut value = first.to_string();
            while let Some((_, next)) = self
                .lines
                .next_if(|(_, l)| l.starts_with(CONTINUATION_INDENT))
            {
                value.push(' ');
                value.push_str(next.trim());
            }
            return Some(Right(TagLine {
                line: index + 1,
                tag,
                value: normalize_whitespace(&value),
            }));
        }
    }
}

/// Split a trimmed line into its tag and the rest of the line.
fn split_tag_line(line: &str) -> Option<(&str, &str)> {
    let captures = TAG_LINE_REGEX.captures(line)?;
    let tag = captures.get(1)?.as_str();
    let value = captures.get(2).map_or("", |m| m.as_str());
    Some((tag, value))
}

/// Parse the content of one PubMed formatted `.nbib` record.
///
/// Never fails: unusable lines are recorded in [TagRecord::ignored_lines] and
/// reported to `diagnostics`.
pub(crate) fn nbib_parse(
    text: &str,
    author_policy: AuthorPolicy,
    diagnostics: &mut dyn Diagnostics,
) -> TagRecord {
    let (skipped, tag_lines): (Vec<_>, Vec<_>) = TagLines::new(text).partition_map(|x| x);

    let mut record = TagRecord::default();
    for SkippedLine { line, text } in skipped {
        diagnostics.report(Diagnostic::SkippedLine {
            line,
            text: text.clone(),
        });
        record.ignored_lines.push((line, text));
    }

    let mut author_lines = Vec::new();
    for TagLine { line, tag, value } in tag_lines {
        match NbibTag::from_tag(tag) {
            Some(NbibTag::FullAuthorName) => author_lines.push(AuthorLine::Full(value)),
            Some(NbibTag::Author) => author_lines.push(AuthorLine::Abbreviated(value)),
            Some(tag) => record.insert(tag, value),
            None => {
                diagnostics.report(Diagnostic::UnknownTag {
                    line,
                    tag: tag.to_string(),
                });
                record.ignored_lines.push((line, format!("{tag} - {value}")));
            }
        }
    }
    record.ignored_lines.sort_by_key(|(line, _)| *line);
    record.authors = resolve_authors(author_lines, author_policy, diagnostics);
    record
}
