//! Switch between the full `regex` crate and `regex-lite`.

#[cfg(feature = "regex")]
pub(crate) use regex::Regex;

#[cfg(all(feature = "lite", not(feature = "regex")))]
pub(crate) use regex_lite::Regex;

#[cfg(not(any(feature = "regex", feature = "lite")))]
compile_error!("one of the `regex` or `lite` features must be enabled");
