//! RTF field-code wrapper.
//!
//! Embeds a serialized citation in a one-field RTF document, the shape a word
//! processor receives when EndNote itself places a citation on the clipboard:
//!
//! ```text
//! {\rtf1\ansi\deff0{\fonttbl{\f0 Arial;}}\pard\fs24 {\field{\*\fldinst { ADDIN EN.CITE <xml> }}{\fldrslt (Doe, 2024)}}}
//! ```
//!
//! The XML goes into the field instruction as is. It is already XML-escaped and
//! EndNote reads it back without RTF unescaping, so only the display text in the
//! field result is RTF-escaped.
//!
//! # Example
//!
//! ```
//! use nbib_endnote::ConvertOptions;
//! use nbib_endnote::rtf::wrap;
//!
//! let payload = wrap("<EndNote/>", "(Doe, 2024)", &ConvertOptions::new(), &mut Vec::new());
//! assert!(payload.rtf.starts_with(br"{\rtf1\ansi"));
//! assert_eq!(payload.text.len(), 2 * "(Doe, 2024)".len());
//! ```

mod codepage;

pub use codepage::{Encoded, TextEncoding, UnknownEncoding, utf16le};

use crate::config::ConvertOptions;
use crate::diagnostics::{Diagnostic, Diagnostics};

/// The two byte buffers handed to a payload sink together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCodePayload {
    /// Encoded RTF document.
    pub rtf: Vec<u8>,
    /// Display text as UTF-16LE, for the plain-text clipboard slot.
    pub text: Vec<u8>,
}

/// Build the RTF document as a string, before encoding.
pub fn rtf_document(xml: &str, display_text: &str, options: &ConvertOptions) -> String {
    format!(
        r"{{\rtf1\ansi\deff0{{\fonttbl{{\f0 {font};}}}}\pard\fs{size} {{\field{{\*\fldinst {{ {marker} {xml} }}}}{{\fldrslt {display}}}}}}}",
        font = options.font(),
        size = options.font_size(),
        marker = options.field_marker(),
        display = escape_rtf(display_text),
    )
}

/// Wrap serialized XML and its display text into a [FieldCodePayload].
///
/// Characters the configured encoding cannot represent become `?`; this is reported
/// to `diagnostics` as [Diagnostic::EncodingFallback] and never fails.
pub fn wrap(
    xml: &str,
    display_text: &str,
    options: &ConvertOptions,
    diagnostics: &mut dyn Diagnostics,
) -> FieldCodePayload {
    let document = rtf_document(xml, display_text, options);
    let encoding = options.encoding();
    let Encoded { bytes, substituted } = encoding.encode(&document);
    if substituted > 0 {
        diagnostics.report(Diagnostic::EncodingFallback {
            encoding,
            substituted,
        });
    }

    FieldCodePayload {
        rtf: bytes,
        text: utf16le(display_text),
    }
}

/// Escape the RTF control characters `\`, `{` and `}`.
pub fn escape_rtf(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '{' | '}') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
