//! Language-code and whitespace helpers.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s{2,}").expect("whitespace pattern is valid"));

/// Returns the primary language subtag, i.e. the text before the first `_`.
///
/// `"fr_FR"` becomes `"fr"`, `"ast"` stays `"ast"`.
pub fn primary_subtag(language: &str) -> &str {
    language.split('_').next().unwrap_or(language)
}

/// Replaces every run of two or more whitespace characters with a single
/// space and trims the result.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}
