//! Conversion options.
//!
//! Every option has a default matching what EndNote expects from a pasted
//! citation, so most callers only need [`ConvertOptions::new`].

use crate::rtf::TextEncoding;

/// Field instruction prefix EndNote looks for in a citation field.
pub const DEFAULT_FIELD_MARKER: &str = "ADDIN EN.CITE";

/// Font declared in the RTF font table.
pub const DEFAULT_FONT: &str = "Arial";

/// Font size in half-points (`\fs24` is 12pt).
pub const DEFAULT_FONT_SIZE: u16 = 24;

/// Upper bound on an incoming transport message.
pub const DEFAULT_MAX_MESSAGE_SIZE: u32 = 64 * 1024 * 1024;

/// How `AU` (abbreviated author) lines relate to `FAU` (full author) lines.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AuthorPolicy {
    /// Only `FAU` lines contribute authors; every `AU` line is ignored.
    #[default]
    FullNameOnly,
    /// `FAU` lines are authoritative. An `AU` line is kept as a separate author
    /// unless it abbreviates the immediately preceding `FAU` name.
    AbbreviatedFallback,
}

/// Which form of an author's name is written into `<author>` elements.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum AuthorStyle {
    /// The name as supplied, e.g. `Smith, John Paul`.
    #[default]
    Full,
    /// Surname and initials, e.g. `Smith, J. P.`.
    Initials,
}

/// Options for one conversion run.
///
/// # Examples
///
/// ```
/// use nbib_endnote::{AuthorStyle, ConvertOptions, TextEncoding};
///
/// let mut options = ConvertOptions::new();
/// options
///     .set_author_style(AuthorStyle::Initials)
///     .set_encoding(TextEncoding::Ascii);
/// assert_eq!(options.author_style(), AuthorStyle::Initials);
/// ```
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub(crate) author_policy: AuthorPolicy,
    pub(crate) author_style: AuthorStyle,
    pub(crate) title_case_journals: bool,
    pub(crate) field_marker: String,
    pub(crate) font: String,
    pub(crate) font_size: u16,
    pub(crate) encoding: TextEncoding,
    pub(crate) max_message_size: u32,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ConvertOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            author_policy: AuthorPolicy::default(),
            author_style: AuthorStyle::default(),
            title_case_journals: true,
            field_marker: DEFAULT_FIELD_MARKER.to_string(),
            font: DEFAULT_FONT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            encoding: TextEncoding::default(),
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    pub fn set_author_policy(&mut self, policy: AuthorPolicy) -> &mut Self {
        self.author_policy = policy;
        self
    }

    pub fn set_author_style(&mut self, style: AuthorStyle) -> &mut Self {
        self.author_style = style;
        self
    }

    /// Title-case `JT` and `TA` values (`"JOURNAL OF THINGS"` → `"Journal Of Things"`).
    pub fn set_title_case_journals(&mut self, enabled: bool) -> &mut Self {
        self.title_case_journals = enabled;
        self
    }

    pub fn set_field_marker(&mut self, marker: impl Into<String>) -> &mut Self {
        self.field_marker = marker.into();
        self
    }

    pub fn set_font(&mut self, font: impl Into<String>) -> &mut Self {
        self.font = font.into();
        self
    }

    /// Font size in half-points.
    pub fn set_font_size(&mut self, half_points: u16) -> &mut Self {
        self.font_size = half_points;
        self
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) -> &mut Self {
        self.encoding = encoding;
        self
    }

    pub fn set_max_message_size(&mut self, bytes: u32) -> &mut Self {
        self.max_message_size = bytes;
        self
    }

    pub fn author_policy(&self) -> AuthorPolicy {
        self.author_policy
    }

    pub fn author_style(&self) -> AuthorStyle {
        self.author_style
    }

    pub fn title_case_journals(&self) -> bool {
        self.title_case_journals
    }

    pub fn field_marker(&self) -> &str {
        &self.field_marker
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn max_message_size(&self) -> u32 {
        self.max_message_size
    }
}
