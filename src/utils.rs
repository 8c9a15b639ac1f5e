use itertools::Itertools;

/// Collapse every run of whitespace into a single space and trim both ends.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().join(" ")
}

/// The first whitespace-separated token of `s`, if any.
pub(crate) fn first_token(s: &str) -> Option<&str> {
    s.split_whitespace().next()
}

/// Remove every trailing `.` from a title.
pub(crate) fn strip_trailing_periods(s: &str) -> &str {
    s.trim_end_matches('.')
}

/// Title-case a string: the first letter of every run of letters is uppercased and
/// the rest of the run lowercased. Any non-letter character starts a new run, so
/// `"j. biol. chem."` becomes `"J. Biol. Chem."`.
pub(crate) fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// `true` if the string is empty or only whitespace.
pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}
