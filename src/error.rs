//! Error types for citation conversion.
//!
//! [`ParseError`] is the only way the conversion itself can fail. Transport and
//! sink errors belong to the host boundary around it, and all three meet in
//! [`CitationError`].

use thiserror::Error;

/// Top-level error type for one host invocation.
#[derive(Error, Debug)]
pub enum CitationError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Conversion error.
#[derive(Error, Debug)]
#[error("Error in PubMed format: {error}")]
pub struct ParseError {
    /// The specific error that occurred
    pub error: ValueError,
}

impl ParseError {
    /// Create a new ParseError.
    pub fn new(error: ValueError) -> Self {
        Self { error }
    }

    /// The record has no author that can be cited.
    pub fn no_authors() -> Self {
        Self::new(ValueError::NoAuthorsFound { key: "FAU" })
    }
}

/// Specific value-level errors that can occur during conversion.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValueError {
    #[error("No authors found ({key} tag)")]
    NoAuthorsFound { key: &'static str },
}

/// Errors reading or writing a framed host message.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("I/O error on host pipe: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Message of {size} bytes exceeds the {max} byte limit")]
    MessageTooLarge { size: u32, max: u32 },

    #[error("Message ended after {read} of {expected} bytes")]
    Truncated { read: usize, expected: usize },
}

/// Errors delivering a payload to its destination.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Sink is unavailable: {0}")]
    Unavailable(String),

    #[error("Sink session is already open")]
    Busy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::no_authors();
        assert_eq!(
            format!("{}", error),
            "Error in PubMed format: No authors found (FAU tag)"
        );

        let error = ParseError::new(ValueError::NoAuthorsFound { key: "AU" });
        assert_eq!(error.to_string(), "Error in PubMed format: No authors found (AU tag)");
    }

    #[test]
    fn test_citation_error_is_transparent() {
        let error: CitationError = ParseError::no_authors().into();
        assert_eq!(
            error.to_string(),
            "Error in PubMed format: No authors found (FAU tag)"
        );

        let error: CitationError = TransportError::MessageTooLarge { size: 10, max: 5 }.into();
        assert_eq!(
            error.to_string(),
            "Message of 10 bytes exceeds the 5 byte limit"
        );
    }

    #[test]
    fn test_sink_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: SinkError = io.into();
        assert!(matches!(error, SinkError::Io(_)));
        assert!(error.to_string().contains("denied"));
    }
}
