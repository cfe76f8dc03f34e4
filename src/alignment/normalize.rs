use once_cell::sync::Lazy;
use regex::Regex;

// @module: Text canonicalization for matching

// @const: Anything that is neither a word character nor whitespace
static PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

// @const: Whitespace runs
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Case-fold, drop punctuation and collapse whitespace runs to one space.
pub fn normalize_for_display(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_REGEX.replace_all(&lowered, "");
    let collapsed = WHITESPACE_REGEX.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

/// Case-fold, drop punctuation and remove all whitespace.
///
/// Word texts are concatenated without separators, so sentence keys must
/// carry none either.
pub fn normalize_for_matching(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = PUNCTUATION_REGEX.replace_all(&lowered, "");
    WHITESPACE_REGEX.replace_all(&stripped, "").into_owned()
}
