//! MEDLINE/PubMed `.nbib` field tags.
//!
//! See: <https://www.nlm.nih.gov/bsd/mms/medlineelements.html>

/// The closed set of tags recognized in a PubMed formatted `.nbib` record.
///
/// Lines carrying any other tag are skipped by the parser and reported
/// through [`crate::Diagnostics`].
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NbibTag {
    /// AB - Abstract
    Abstract,
    /// AD - Affiliation
    Affiliation,
    /// AID - Article identifier
    ArticleIdentifier,
    /// AU - Author
    Author,
    /// AUID - Author identifier
    AuthorIdentifier,
    /// BTI - Book title
    BookTitle,
    /// CI - Copyright information
    CopyrightInformation,
    /// CIN - Comment in
    CommentIn,
    /// CN - Corporate author
    CorporateAuthor,
    /// COIS - Conflict of interest statement
    ConflictOfInterest,
    /// CON - Comment on
    CommentOn,
    /// CRDT - Create date
    CreateDate,
    /// DA - Date created
    DateCreated,
    /// DCOM - Date completed
    DateCompleted,
    /// DEP - Date of electronic publication
    ElectronicPublicationDate,
    /// DP - Publication date
    PublicationDate,
    /// ED - Editor
    Editor,
    /// EDAT - Entrez date
    EntrezDate,
    /// EFR - Erratum for
    ErratumFor,
    /// EIN - Erratum in
    ErratumIn,
    /// EN - Edition
    Edition,
    /// FAU - Full author name
    FullAuthorName,
    /// FED - Full editor name
    FullEditorName,
    /// FIR - Full investigator name
    FullInvestigatorName,
    /// GN - General note
    GeneralNote,
    /// GR - Grant number
    GrantNumber,
    /// IP - Issue
    Issue,
    /// IR - Investigator name
    InvestigatorName,
    /// IRAD - Investigator affiliation
    InvestigatorAffiliation,
    /// IS - ISSN
    Issn,
    /// ISBN - ISBN
    Isbn,
    /// JID - NLM unique ID
    NlmUniqueId,
    /// JT - Full journal title
    FullJournalTitle,
    /// LA - Language
    Language,
    /// LID - Location identifier
    LocationId,
    /// LR - Date last revised
    DateLastRevised,
    /// MH - MeSH terms
    MeshTerms,
    /// MHDA - MeSH date
    MeshDate,
    /// OAB - Other abstract
    OtherAbstract,
    /// OT - Other term
    OtherTerm,
    /// OTO - Other term owner
    OtherTermOwner,
    /// OWN - Owner
    Owner,
    /// PB - Publisher
    Publisher,
    /// PG - Pagination
    Pagination,
    /// PHST - Publication history status
    PublicationHistoryStatus,
    /// PL - Place of publication
    PlaceOfPublication,
    /// PMC - PubMed Central identifier
    PubmedCentralIdentifier,
    /// PMCR - PubMed Central release
    PubmedCentralRelease,
    /// PMID - PubMed unique identifier
    PubmedUniqueIdentifier,
    /// PST - Publication status
    PublicationStatus,
    /// PT - Publication type
    PublicationType,
    /// RN - Registry number/EC number
    RegistryNumber,
    /// SB - Subset
    Subset,
    /// SI - Secondary source ID
    SecondarySourceId,
    /// SO - Source
    Source,
    /// STAT - Status
    Status,
    /// TA - Journal title abbreviation
    JournalTitleAbbreviation,
    /// TI - Title
    Title,
    /// TT - Transliterated title
    TransliteratedTitle,
    /// VI - Volume
    Volume,
}

impl NbibTag {
    /// Match a tag string with a known [NbibTag].
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = match tag {
            "AB" => NbibTag::Abstract,
            "AD" => NbibTag::Affiliation,
            "AID" => NbibTag::ArticleIdentifier,
            "AU" => NbibTag::Author,
            "AUID" => NbibTag::AuthorIdentifier,
            "BTI" => NbibTag::BookTitle,
            "CI" => NbibTag::CopyrightInformation,
            "CIN" => NbibTag::CommentIn,
            "CN" => NbibTag::CorporateAuthor,
            "COIS" => NbibTag::ConflictOfInterest,
            "CON" => NbibTag::CommentOn,
            "CRDT" => NbibTag::CreateDate,
            "DA" => NbibTag::DateCreated,
            "DCOM" => NbibTag::DateCompleted,
            "DEP" => NbibTag::ElectronicPublicationDate,
            "DP" => NbibTag::PublicationDate,
            "ED" => NbibTag::Editor,
            "EDAT" => NbibTag::EntrezDate,
            "EFR" => NbibTag::ErratumFor,
            "EIN" => NbibTag::ErratumIn,
            "EN" => NbibTag::Edition,
            "FAU" => NbibTag::FullAuthorName,
            "FED" => NbibTag::FullEditorName,
            "FIR" => NbibTag::FullInvestigatorName,
            "GN" => NbibTag::GeneralNote,
            "GR" => NbibTag::GrantNumber,
            "IP" => NbibTag::Issue,
            "IR" => NbibTag::InvestigatorName,
            "IRAD" => NbibTag::InvestigatorAffiliation,
            "IS" => NbibTag::Issn,
            "ISBN" => NbibTag::Isbn,
            "JID" => NbibTag::NlmUniqueId,
            "JT" => NbibTag::FullJournalTitle,
            "LA" => NbibTag::Language,
            "LID" => NbibTag::LocationId,
            "LR" => NbibTag::DateLastRevised,
            "MH" => NbibTag::MeshTerms,
            "MHDA" => NbibTag::MeshDate,
            "OAB" => NbibTag::OtherAbstract,
            "OT" => NbibTag::OtherTerm,
            "OTO" => NbibTag::OtherTermOwner,
            "OWN" => NbibTag::Owner,
            "PB" => NbibTag::Publisher,
            "PG" => NbibTag::Pagination,
            "PHST" => NbibTag::PublicationHistoryStatus,
            "PL" => NbibTag::PlaceOfPublication,
            "PMC" => NbibTag::PubmedCentralIdentifier,
            "PMCR" => NbibTag::PubmedCentralRelease,
            "PMID" => NbibTag::PubmedUniqueIdentifier,
            "PST" => NbibTag::PublicationStatus,
            "PT" => NbibTag::PublicationType,
            "RN" => NbibTag::RegistryNumber,
            "SB" => NbibTag::Subset,
            "SI" => NbibTag::SecondarySourceId,
            "SO" => NbibTag::Source,
            "STAT" => NbibTag::Status,
            "TA" => NbibTag::JournalTitleAbbreviation,
            "TI" => NbibTag::Title,
            "TT" => NbibTag::TransliteratedTitle,
            "VI" => NbibTag::Volume,
            _ => return None,
        };
        Some(tag)
    }

    /// Convert a [NbibTag] back to its string representation.
    pub fn as_tag(&self) -> &'static str {
        match self {
            NbibTag::Abstract => "AB",
            NbibTag::Affiliation => "AD",
            NbibTag::ArticleIdentifier => "AID",
            NbibTag::Author => "AU",
            NbibTag::AuthorIdentifier => "AUID",
            NbibTag::BookTitle => "BTI",
            NbibTag::CopyrightInformation => "CI",
            NbibTag::CommentIn => "CIN",
            NbibTag::CorporateAuthor => "CN",
            NbibTag::ConflictOfInterest => "COIS",
            NbibTag::CommentOn => "CON",
            NbibTag::CreateDate => "CRDT",
            NbibTag::DateCreated => "DA",
            NbibTag::DateCompleted => "DCOM",
            NbibTag::ElectronicPublicationDate => "DEP",
            NbibTag::PublicationDate => "DP",
            NbibTag::Editor => "ED",
            NbibTag::EntrezDate => "EDAT",
            NbibTag::ErratumFor => "EFR",
            NbibTag::ErratumIn => "EIN",
            NbibTag::Edition => "EN",
            NbibTag::FullAuthorName => "FAU",
            NbibTag::FullEditorName => "FED",
            NbibTag::FullInvestigatorName => "FIR",
            NbibTag::GeneralNote => "GN",
            NbibTag::GrantNumber => "GR",
            NbibTag::Issue => "IP",
            NbibTag::InvestigatorName => "IR",
            NbibTag::InvestigatorAffiliation => "IRAD",
            NbibTag::Issn => "IS",
            NbibTag::Isbn => "ISBN",
            NbibTag::NlmUniqueId => "JID",
            NbibTag::FullJournalTitle => "JT",
            NbibTag::Language => "LA",
            NbibTag::LocationId => "LID",
            NbibTag::DateLastRevised => "LR",
            NbibTag::MeshTerms => "MH",
            NbibTag::MeshDate => "MHDA",
            NbibTag::OtherAbstract => "OAB",
            NbibTag::OtherTerm => "OT",
            NbibTag::OtherTermOwner => "OTO",
            NbibTag::Owner => "OWN",
            NbibTag::Publisher => "PB",
            NbibTag::Pagination => "PG",
            NbibTag::PublicationHistoryStatus => "PHST",
            NbibTag::PlaceOfPublication => "PL",
            NbibTag::PubmedCentralIdentifier => "PMC",
            NbibTag::PubmedCentralRelease => "PMCR",
            NbibTag::PubmedUniqueIdentifier => "PMID",
            NbibTag::PublicationStatus => "PST",
            NbibTag::PublicationType => "PT",
            NbibTag::RegistryNumber => "RN",
            NbibTag::Subset => "SB",
            NbibTag::SecondarySourceId => "SI",
            NbibTag::Source => "SO",
            NbibTag::Status => "STAT",
            NbibTag::JournalTitleAbbreviation => "TA",
            NbibTag::Title => "TI",
            NbibTag::TransliteratedTitle => "TT",
            NbibTag::Volume => "VI",
        }
    }

    /// Whether values of this tag accumulate into a list rather than
    /// overwriting each other.
    pub fn is_multi_valued(&self) -> bool {
        matches!(
            self,
            NbibTag::Affiliation
                | NbibTag::OtherTerm
                | NbibTag::MeshTerms
                | NbibTag::PublicationType
                | NbibTag::RegistryNumber
                | NbibTag::ArticleIdentifier
                | NbibTag::Issn
                | NbibTag::LocationId
        )
    }
}

impl std::fmt::Display for NbibTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("PMID", Some(NbibTag::PubmedUniqueIdentifier))]
    #[case("FAU", Some(NbibTag::FullAuthorName))]
    #[case("AU", Some(NbibTag::Author))]
    #[case("JT", Some(NbibTag::FullJournalTitle))]
    #[case("LID", Some(NbibTag::LocationId))]
    #[case("XYZ", None)]
    #[case("pmid", None)]
    fn test_from_tag(#[case] input: &str, #[case] expected: Option<NbibTag>) {
        assert_eq!(NbibTag::from_tag(input), expected);
    }

    #[rstest]
    #[case(NbibTag::PubmedUniqueIdentifier, "PMID")]
    #[case(NbibTag::Title, "TI")]
    #[case(NbibTag::EntrezDate, "EDAT")]
    fn test_as_tag_inverts_from_tag(#[case] tag: NbibTag, #[case] expected: &str) {
        assert_eq!(tag.as_tag(), expected);
        assert_eq!(NbibTag::from_tag(expected), Some(tag));
    }

    #[rstest]
    #[case(NbibTag::Affiliation, true)]
    #[case(NbibTag::OtherTerm, true)]
    #[case(NbibTag::MeshTerms, true)]
    #[case(NbibTag::PublicationType, true)]
    #[case(NbibTag::RegistryNumber, true)]
    #[case(NbibTag::ArticleIdentifier, true)]
    #[case(NbibTag::Issn, true)]
    #[case(NbibTag::LocationId, true)]
    #[case(NbibTag::Title, false)]
    #[case(NbibTag::PublicationDate, false)]
    #[case(NbibTag::FullJournalTitle, false)]
    fn test_is_multi_valued(#[case] tag: NbibTag, #[case] expected: bool) {
        assert_eq!(tag.is_multi_valued(), expected);
    }
}
