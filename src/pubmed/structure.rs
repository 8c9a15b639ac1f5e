//! Structured data parsed from one PubMed formatted `.nbib` record.

use crate::pubmed::author::Author;
use crate::pubmed::tags::NbibTag;

/// The value(s) stored for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValue {
    /// Value of a single-valued tag; a later line overwrites an earlier one.
    Single(String),
    /// Values of a multi-valued tag in source order.
    List(Vec<String>),
}

impl TagValue {
    /// All values as a slice (one element for [TagValue::Single]).
    pub fn as_slice(&self) -> &[String] {
        match self {
            TagValue::Single(s) => std::slice::from_ref(s),
            TagValue::List(v) => v,
        }
    }
}

/// Tag data of a `.nbib` record, in first-seen tag order.
///
/// A tag is list-valued if and only if [`NbibTag::is_multi_valued`]; authors are kept
/// apart from the tag data, already resolved under the active
/// [`AuthorPolicy`](crate::AuthorPolicy).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRecord {
    pub(crate) entries: Vec<(NbibTag, TagValue)>,
    pub(crate) authors: Vec<Author>,
    /// Lines skipped by the parser, with their 1-based line number.
    pub(crate) ignored_lines: Vec<(usize, String)>,
}

impl TagRecord {
    /// Store a value under the single- or list-valued rule of its tag.
    pub(crate) fn insert(&mut self, tag: NbibTag, value: String) {
        let existing = self.entries.iter_mut().find(|(t, _)| *t == tag);
        match existing {
            Some((_, TagValue::List(values))) => values.push(value),
            Some((_, slot @ TagValue::Single(_))) => *slot = TagValue::Single(value),
            None if tag.is_multi_valued() => {
                self.entries.push((tag, TagValue::List(vec![value])))
            }
            None => self.entries.push((tag, TagValue::Single(value))),
        }
    }

    /// The stored value(s) of a tag.
    pub fn get(&self, tag: NbibTag) -> Option<&TagValue> {
        self.entries
            .iter()
            .find_map(|(t, v)| (*t == tag).then_some(v))
    }

    /// The value of a single-valued tag, or `""` when absent.
    ///
    /// For a list-valued tag this is the last value.
    pub fn single(&self, tag: NbibTag) -> &str {
        self.get(tag)
            .and_then(|v| v.as_slice().last())
            .map_or("", String::as_str)
    }

    /// Every value of a tag in source order; empty when absent.
    pub fn list(&self, tag: NbibTag) -> &[String] {
        self.get(tag).map(TagValue::as_slice).unwrap_or_default()
    }

    /// Tags present in the record, in first-seen order.
    pub fn tags(&self) -> impl Iterator<Item = NbibTag> + '_ {
        self.entries.iter().map(|(t, _)| *t)
    }

    /// Authors in source order.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Lines the parser did not use, with their 1-based line number.
    pub fn ignored_lines(&self) -> &[(usize, String)] {
        &self.ignored_lines
    }

    /// `true` if no tag or author was recognized.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.authors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_single_valued_last_write_wins() {
        let mut record = TagRecord::default();
        record.insert(NbibTag::Title, "First".to_string());
        record.insert(NbibTag::Title, "Second".to_string());
        assert_eq!(record.get(NbibTag::Title), Some(&TagValue::Single("Second".to_string())));
        assert_eq!(record.single(NbibTag::Title), "Second");
    }

    #[test]
    fn test_multi_valued_accumulates() {
        let mut record = TagRecord::default();
        record.insert(NbibTag::MeshTerms, "Humans".to_string());
        record.insert(NbibTag::MeshTerms, "Mice".to_string());
        assert_eq!(record.list(NbibTag::MeshTerms), ["Humans", "Mice"]);
    }

    #[test]
    fn test_first_seen_order() {
        let mut record = TagRecord::default();
        record.insert(NbibTag::PubmedUniqueIdentifier, "1".to_string());
        record.insert(NbibTag::Issn, "1234-5678 (Linking)".to_string());
        record.insert(NbibTag::Title, "T".to_string());
        record.insert(NbibTag::Issn, "8765-4321 (Electronic)".to_string());
        let tags: Vec<_> = record.tags().collect();
        assert_eq!(
            tags,
            [NbibTag::PubmedUniqueIdentifier, NbibTag::Issn, NbibTag::Title]
        );
    }

    #[test]
    fn test_absent_tags() {
        let record = TagRecord::default();
        assert!(record.is_empty());
        assert_eq!(record.single(NbibTag::Volume), "");
        assert!(record.list(NbibTag::OtherTerm).is_empty());
    }
}
