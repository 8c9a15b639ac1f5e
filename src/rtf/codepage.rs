//! Single-byte text encodings for the RTF payload.

use std::fmt;
use std::str::FromStr;

/// Byte written in place of a character the encoding cannot represent.
pub const SUBSTITUTE: u8 = b'?';

/// Characters of Windows-1252 bytes `0x80..=0x9F`; `None` marks unassigned bytes.
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Byte encoding of the RTF document.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// Windows-1252, the `\ansi` code page word processors assume.
    #[default]
    Windows1252,
    /// 7-bit ASCII.
    Ascii,
}

/// Bytes produced by [TextEncoding::encode].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Number of characters replaced by [SUBSTITUTE].
    pub substituted: usize,
}

impl TextEncoding {
    /// Canonical label, as used by `--encoding`.
    pub fn label(self) -> &'static str {
        match self {
            TextEncoding::Windows1252 => "windows-1252",
            TextEncoding::Ascii => "us-ascii",
        }
    }

    /// Byte for `c`, if representable.
    pub fn encode_char(self, c: char) -> Option<u8> {
        let code = u32::from(c);
        match self {
            TextEncoding::Ascii => u8::try_from(code).ok().filter(u8::is_ascii),
            TextEncoding::Windows1252 => match code {
                0x00..=0x7F | 0xA0..=0xFF => u8::try_from(code).ok(),
                _ => WINDOWS_1252_HIGH
                    .iter()
                    .position(|&mapped| mapped == Some(c))
                    .and_then(|i| u8::try_from(0x80 + i).ok()),
            },
        }
    }

    /// Encode `text`, substituting [SUBSTITUTE] for every unrepresentable character.
    pub fn encode(self, text: &str) -> Encoded {
        let mut bytes = Vec::with_capacity(text.len());
        let mut substituted = 0;
        for c in text.chars() {
            match self.encode_char(c) {
                Some(b) => bytes.push(b),
                None => {
                    bytes.push(SUBSTITUTE);
                    substituted += 1;
                }
            }
        }
        Encoded { bytes, substituted }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognised encoding label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported encoding: {0} (expected windows-1252 or us-ascii)")]
pub struct UnknownEncoding(pub String);

impl FromStr for TextEncoding {
    type Err = UnknownEncoding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows-1252" | "cp1252" | "cp-1252" => Ok(TextEncoding::Windows1252),
            "us-ascii" | "ascii" => Ok(TextEncoding::Ascii),
            _ => Err(UnknownEncoding(s.to_string())),
        }
    }
}

/// Encode `text` as UTF-16 little-endian, without a byte order mark.
pub fn utf16le(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case('A', Some(b'A'))]
    #[case('é', Some(0xE9))]
    #[case('ü', Some(0xFC))]
    #[case('€', Some(0x80))]
    #[case('—', Some(0x97))]
    #[case('\u{201C}', Some(0x93))]
    #[case('Ÿ', Some(0x9F))]
    #[case('\u{0081}', None)]
    #[case('α', None)]
    #[case('日', None)]
    fn test_windows_1252_chars(#[case] c: char, #[case] expected: Option<u8>) {
        assert_eq!(TextEncoding::Windows1252.encode_char(c), expected);
    }

    #[test]
    fn test_ascii_rejects_high_chars() {
        assert_eq!(TextEncoding::Ascii.encode_char('z'), Some(b'z'));
        assert_eq!(TextEncoding::Ascii.encode_char('é'), None);
        assert_eq!(TextEncoding::Ascii.encode_char('€'), None);
    }

    #[test]
    fn test_encode_counts_substitutions() {
        let encoded = TextEncoding::Windows1252.encode("Müller – β-cells");
        assert_eq!(encoded.bytes, b"M\xFCller \x96 ?-cells");
        assert_eq!(encoded.substituted, 1);

        let encoded = TextEncoding::Ascii.encode("Müller – β-cells");
        assert_eq!(encoded.bytes, b"M?ller ? ?-cells");
        assert_eq!(encoded.substituted, 3);
    }

    #[test]
    fn test_encode_preserves_byte_per_char() {
        let text = "Zoë “quoted” …";
        let encoded = TextEncoding::Windows1252.encode(text);
        assert_eq!(encoded.bytes.len(), text.chars().count());
        assert_eq!(encoded.substituted, 0);
    }

    #[rstest]
    #[case("windows-1252", TextEncoding::Windows1252)]
    #[case("CP1252", TextEncoding::Windows1252)]
    #[case("ascii", TextEncoding::Ascii)]
    #[case(" us-ascii ", TextEncoding::Ascii)]
    fn test_from_str(#[case] label: &str, #[case] expected: TextEncoding) {
        assert_eq!(label.parse::<TextEncoding>(), Ok(expected));
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "latin-2".parse::<TextEncoding>().unwrap_err();
        assert_eq!(err, UnknownEncoding("latin-2".to_string()));
        assert_eq!(TextEncoding::Ascii.to_string(), "us-ascii");
    }

    #[test]
    fn test_utf16le() {
        assert_eq!(utf16le("(Doe)"), b"(\0D\0o\0e\0)\0");
        assert_eq!(utf16le("é"), b"\xE9\x00");
        assert_eq!(utf16le("𝄞"), b"\x34\xD8\x1E\xDD");
        assert!(utf16le("").is_empty());
    }
}
