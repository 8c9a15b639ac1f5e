//! Derive a typed [CitationView] from a parsed [TagRecord].
//!
//! # Design Decision
//!
//! ## Field Processing Strategy
//! - **Authors required**: an empty author list is the only extraction failure
//! - **Independent journals**: `JT` and `TA` are kept separately; [CitationView::journal]
//!   prefers `JT`
//! - **Two-pass identifiers**: a `[doi]` value is looked up in `LID`, then in `AID`; only
//!   when neither has one is the same done for `[pii]`. A DOI in `AID` therefore wins
//!   over a PII in `LID`, rather than taking whatever `LID` holds before looking at `AID`
//! - **Verbatim lists**: list tags keep source order with blank entries dropped

use crate::config::ConvertOptions;
use crate::error::ParseError;
use crate::pubmed::{Author, NbibTag, TagRecord};
use crate::utils::{first_token, is_blank, strip_trailing_periods, title_case};

/// Marker of a linking ISSN in an `IS` value.
const LINKING_MARKER: &str = "(Linking)";
/// Marker of an electronic ISSN in an `IS` value.
const ELECTRONIC_MARKER: &str = "(Electronic)";
/// Identifier markers in `LID`/`AID` values, in order of preference.
const IDENTIFIER_MARKERS: [(&str, IdentifierKind); 2] =
    [("[doi]", IdentifierKind::Doi), ("[pii]", IdentifierKind::Pii)];

/// Kind of article identifier found in `LID` or `AID`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Digital Object Identifier
    Doi,
    /// Publisher Item Identifier
    Pii,
}

/// An article identifier extracted from a bracket-marked `LID`/`AID` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleId {
    pub kind: IdentifierKind,
    pub value: String,
}

/// ISSNs partitioned by their `(Linking)`/`(Electronic)` markers.
///
/// ISSNs carrying neither marker (e.g. `(Print)`) are in neither set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssnSet {
    pub linking: Vec<String>,
    pub electronic: Vec<String>,
}

impl IssnSet {
    /// Partition raw `IS` values.
    ///
    /// ```
    /// use nbib_endnote::IssnSet;
    ///
    /// let set = IssnSet::partition(&["1234-5678 (Linking)", "8765-4321 (Electronic)"]);
    /// assert_eq!(set.linking, ["1234-5678"]);
    /// assert_eq!(set.electronic, ["8765-4321"]);
    /// ```
    pub fn partition<S: AsRef<str>>(values: &[S]) -> Self {
        let mut set = IssnSet::default();
        for value in values {
            let value = value.as_ref();
            let Some(issn) = first_token(value) else {
                continue;
            };
            if value.contains(ELECTRONIC_MARKER) {
                set.electronic.push(issn.to_string());
            }
            if value.contains(LINKING_MARKER) {
                set.linking.push(issn.to_string());
            }
        }
        set
    }
}

/// Typed, read-only projection of a [TagRecord].
///
/// Absent single values are empty strings and absent lists are empty, except the
/// journal names, the month and the article identifier which are [Option]s.
#[derive(Debug, Clone, PartialEq)]
pub struct CitationView {
    /// PMID
    pub pmid: String,
    /// First four characters of `DP`
    pub year: String,
    /// Second token of `DP`, e.g. `Jun`
    pub month: Option<String>,
    /// `TI` with trailing periods removed
    pub title: String,
    /// `JT`
    pub journal_full: Option<String>,
    /// `TA`
    pub journal_abbr: Option<String>,
    /// `VI`
    pub volume: String,
    /// `IP`
    pub issue: String,
    /// `PG`
    pub pages: String,
    /// `AB`
    pub abstract_text: String,
    /// `LA`
    pub language: String,
    /// `PL`
    pub place: String,
    /// `SO`
    pub source: String,
    /// `OWN`
    pub owner: String,
    /// Date part of `EDAT`
    pub epub_date: String,
    /// Authors in source order; never empty.
    pub authors: Vec<Author>,
    /// `AD`
    pub addresses: Vec<String>,
    /// `OT`
    pub keywords: Vec<String>,
    /// `MH`
    pub mesh_terms: Vec<String>,
    /// `PT`
    pub publication_types: Vec<String>,
    /// `RN`
    pub registry_numbers: Vec<String>,
    /// `IS`
    pub issn: IssnSet,
    /// DOI or PII from `LID`, falling back to `AID`
    pub article_id: Option<ArticleId>,
}

impl CitationView {
    /// The journal name: full title if present, otherwise the abbreviation.
    pub fn journal(&self) -> Option<&str> {
        self.journal_full
            .as_deref()
            .or(self.journal_abbr.as_deref())
    }

    /// The first author; always present on a view built by [extract].
    pub fn first_author(&self) -> Option<&Author> {
        self.authors.first()
    }

    /// Surname of the first author, as used in display text.
    pub fn first_author_surname(&self) -> &str {
        self.first_author().map_or("", Author::surname)
    }

    /// The DOI, if the extracted identifier is one.
    pub fn doi(&self) -> Option<&str> {
        self.article_id
            .as_ref()
            .filter(|id| id.kind == IdentifierKind::Doi)
            .map(|id| id.value.as_str())
    }
}

/// Derive a [CitationView] from a parsed record.
///
/// # Errors
///
/// Returns `ParseError` with [`ValueError::NoAuthorsFound`](crate::ValueError::NoAuthorsFound)
/// when the record has no authors.
pub fn extract(record: &TagRecord, options: &ConvertOptions) -> Result<CitationView, ParseError> {
    if record.authors().is_empty() {
        return Err(ParseError::no_authors());
    }

    let date = record.single(NbibTag::PublicationDate);
    let journal = |tag: NbibTag| {
        let name = record.single(tag);
        if is_blank(name) {
            None
        } else if options.title_case_journals() {
            Some(title_case(name))
        } else {
            Some(name.to_string())
        }
    };

    Ok(CitationView {
        pmid: record.single(NbibTag::PubmedUniqueIdentifier).to_string(),
        year: publication_year(date).to_string(),
        month: date.split_whitespace().nth(1).map(str::to_string),
        title: strip_trailing_periods(record.single(NbibTag::Title)).to_string(),
        journal_full: journal(NbibTag::FullJournalTitle),
        journal_abbr: journal(NbibTag::JournalTitleAbbreviation),
        volume: record.single(NbibTag::Volume).to_string(),
        issue: record.single(NbibTag::Issue).to_string(),
        pages: record.single(NbibTag::Pagination).to_string(),
        abstract_text: record.single(NbibTag::Abstract).to_string(),
        language: record.single(NbibTag::Language).to_string(),
        place: record.single(NbibTag::PlaceOfPublication).to_string(),
        source: record.single(NbibTag::Source).to_string(),
        owner: record.single(NbibTag::Owner).to_string(),
        epub_date: first_token(record.single(NbibTag::EntrezDate))
            .unwrap_or_default()
            .to_string(),
        authors: record.authors().to_vec(),
        addresses: non_blank(record.list(NbibTag::Affiliation)),
        keywords: non_blank(record.list(NbibTag::OtherTerm)),
        mesh_terms: non_blank(record.list(NbibTag::MeshTerms)),
        publication_types: non_blank(record.list(NbibTag::PublicationType)),
        registry_numbers: non_blank(record.list(NbibTag::RegistryNumber)),
        issn: IssnSet::partition(non_blank(record.list(NbibTag::Issn)).as_slice()),
        article_id: find_article_id(
            record.list(NbibTag::LocationId),
            record.list(NbibTag::ArticleIdentifier),
        ),
    })
}

/// First four characters of a `DP` value, or `""` if it is shorter.
fn publication_year(date: &str) -> &str {
    match date.char_indices().nth(4) {
        Some((end, _)) => &date[..end],
        None if date.chars().count() == 4 => date,
        None => "",
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !is_blank(v)).cloned().collect()
}

/// Find an article identifier, preferring a DOI over a PII and `primary` (`LID`) over
/// `fallback` (`AID`).
fn find_article_id(primary: &[String], fallback: &[String]) -> Option<ArticleId> {
    IDENTIFIER_MARKERS.iter().find_map(|&(marker, kind)| {
        find_marked(primary, marker)
            .or_else(|| find_marked(fallback, marker))
            .map(|token| ArticleId {
                kind,
                value: token.to_string(),
            })
    })
}

/// First token of the first value containing `marker`.
fn find_marked<'a>(values: &'a [String], marker: &str) -> Option<&'a str> {
    values
        .iter()
        .filter(|v| v.contains(marker))
        .find_map(|v| first_token(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValueError;
    use crate::pubmed;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn view_of(input: &str) -> CitationView {
        let record = pubmed::parse(input, &mut Vec::new());
        extract(&record, &ConvertOptions::new()).unwrap()
    }

    #[test]
    fn test_end_to_end_fields() {
        let view = view_of(
            "FAU - Doe, Jane\nTI  - A Study\nDP  - 2024 Jun\nJT  - Journal Of Things\n",
        );
        assert_eq!(view.year, "2024");
        assert_eq!(view.month.as_deref(), Some("Jun"));
        assert_eq!(view.title, "A Study");
        assert_eq!(view.journal_full.as_deref(), Some("Journal Of Things"));
        assert_eq!(view.journal_abbr, None);
        assert_eq!(view.journal(), Some("Journal Of Things"));
        assert_eq!(view.first_author_surname(), "Doe");
    }

    #[test]
    fn test_no_authors() {
        let record = pubmed::parse("PMID- 1\nTI  - Title\nAU  - Doe J\n", &mut Vec::new());
        let err = extract(&record, &ConvertOptions::new()).unwrap_err();
        assert_eq!(err.error, ValueError::NoAuthorsFound { key: "FAU" });
    }

    #[test]
    fn test_authors_in_source_order() {
        let view = view_of("FAU - Zed, Zoe\nFAU - Alpha, Al\nFAU - Mid, Max\n");
        let names: Vec<_> = view.authors.iter().map(Author::name).collect();
        assert_eq!(names, ["Zed, Zoe", "Alpha, Al", "Mid, Max"]);
    }

    #[rstest]
    #[case("2024 Jun", "2024", Some("Jun"))]
    #[case("2024 Jun 5", "2024", Some("Jun"))]
    #[case("2024", "2024", None)]
    #[case("2024-Spring", "2024", None)]
    #[case("202", "", None)]
    #[case("", "", None)]
    fn test_dates(#[case] dp: &str, #[case] year: &str, #[case] month: Option<&str>) {
        let view = view_of(&format!("FAU - Doe, Jane\nDP  - {dp}\n"));
        assert_eq!(view.year, year);
        assert_eq!(view.month.as_deref(), month);
    }

    #[test]
    fn test_journal_fallback() {
        let view = view_of("FAU - Doe, Jane\nTA  - J Test\n");
        assert_eq!(view.journal_full, None);
        assert_eq!(view.journal_abbr.as_deref(), Some("J Test"));
        assert_eq!(view.journal(), Some("J Test"));
    }

    #[test]
    fn test_journal_title_case_option() {
        let input = "FAU - Doe, Jane\nJT  - JOURNAL OF THINGS\n";
        assert_eq!(view_of(input).journal_full.as_deref(), Some("Journal Of Things"));

        let record = pubmed::parse(input, &mut Vec::new());
        let mut options = ConvertOptions::new();
        options.set_title_case_journals(false);
        let view = extract(&record, &options).unwrap();
        assert_eq!(view.journal_full.as_deref(), Some("JOURNAL OF THINGS"));
    }

    #[test]
    fn test_title_trailing_period() {
        let view = view_of("FAU - Doe, Jane\nTI  - A study of things.\n");
        assert_eq!(view.title, "A study of things");
    }

    #[test]
    fn test_issn_partition() {
        let view = view_of(
            "FAU - Doe, Jane\nIS  - 1234-5678 (Linking)\nIS  - 8765-4321 (Electronic)\nIS  - 1111-2222 (Print)\n",
        );
        assert_eq!(view.issn.linking, ["1234-5678"]);
        assert_eq!(view.issn.electronic, ["8765-4321"]);
    }

    #[rstest]
    #[case(&["10.1000/xyz [doi]", "S0000-0000(24)00000-0 [pii]"], &[], Some((IdentifierKind::Doi, "10.1000/xyz")))]
    #[case(&["S0000-0000(24)00000-0 [pii]", "10.1000/xyz [doi]"], &[], Some((IdentifierKind::Doi, "10.1000/xyz")))]
    #[case(&["S0000-0000(24)00000-0 [pii]"], &[], Some((IdentifierKind::Pii, "S0000-0000(24)00000-0")))]
    #[case(&["S0000-0000(24)00000-0 [pii]"], &["10.2000/aid [doi]"], Some((IdentifierKind::Doi, "10.2000/aid")))]
    #[case(&[], &["S1 [pii]", "10.2000/aid [doi]"], Some((IdentifierKind::Doi, "10.2000/aid")))]
    #[case(&["e123 [pmc]"], &[], None)]
    #[case(&[], &[], None)]
    fn test_find_article_id(
        #[case] lid: &[&str],
        #[case] aid: &[&str],
        #[case] expected: Option<(IdentifierKind, &str)>,
    ) {
        let lid: Vec<String> = lid.iter().map(|s| s.to_string()).collect();
        let aid: Vec<String> = aid.iter().map(|s| s.to_string()).collect();
        let expected = expected.map(|(kind, value)| ArticleId {
            kind,
            value: value.to_string(),
        });
        assert_eq!(find_article_id(&lid, &aid), expected);
    }

    #[test]
    fn test_doi_from_aid_field() {
        let view = view_of("FAU - Doe, Jane\nAID - 10.1234/aid.test [doi]\n");
        assert_eq!(view.doi(), Some("10.1234/aid.test"));
    }

    #[test]
    fn test_doi_lid_takes_precedence_over_aid() {
        let view = view_of(
            "FAU - Doe, Jane\nLID - 10.1000/lid.doi [doi]\nAID - 10.1234/aid.doi [doi]\n",
        );
        assert_eq!(view.doi(), Some("10.1000/lid.doi"));
    }

    #[test]
    fn test_doi_from_aid_with_pii_in_lid() {
        let view = view_of(
            "FAU - Doe, Jane\nLID - S1234-5678(23)00001-X [pii]\nAID - 10.1016/j.example.2023.01.001 [doi]\n",
        );
        assert_eq!(view.doi(), Some("10.1016/j.example.2023.01.001"));
    }

    #[test]
    fn test_pii_when_no_doi_anywhere() {
        let view = view_of("FAU - Doe, Jane\nLID - S1234-5678(23)00001-X [pii]\n");
        assert_eq!(
            view.article_id,
            Some(ArticleId {
                kind: IdentifierKind::Pii,
                value: "S1234-5678(23)00001-X".to_string()
            })
        );
        assert_eq!(view.doi(), None);
    }

    #[test]
    fn test_lists_filter_blank_entries() {
        let view = view_of("FAU - Doe, Jane\nOT  - \nOT  - cells\nMH  - Humans\nMH  -   \n");
        assert_eq!(view.keywords, ["cells"]);
        assert_eq!(view.mesh_terms, ["Humans"]);
    }

    #[test]
    fn test_secondary_fields() {
        let view = view_of(
            "FAU - Doe, Jane\nSO  - J Things. 2024 Jun;1(2):3-4.\nOWN - NLM\nEDAT- 2024/09/23 03:15\nPL  - England\n",
        );
        assert_eq!(view.source, "J Things. 2024 Jun;1(2):3-4.");
        assert_eq!(view.owner, "NLM");
        assert_eq!(view.epub_date, "2024/09/23");
        assert_eq!(view.place, "England");
    }
}
