//! Integration tests for lingo-common crate.

use lingo_common::{collapse_whitespace, primary_subtag, LingoError};
use proptest::prelude::*;

#[test]
fn test_primary_subtag_keeps_three_letter_codes() {
    assert_eq!(primary_subtag("sah"), "sah");
    assert_eq!(primary_subtag("sah_RU"), "sah");
}

#[test]
fn test_collapse_multiline_text() {
    let raw = "\n      Hello\n      %{ name }\n    ";
    assert_eq!(collapse_whitespace(raw), "Hello %{ name }");
    assert_eq!(collapse_whitespace("a \t b"), "a b");
    assert_eq!(collapse_whitespace("a b"), "a b");
}

#[test]
fn test_missing_translations_message() {
    assert_eq!(
        LingoError::MissingTranslations.to_string(),
        "No translations available."
    );
}

proptest! {
    #[test]
    fn collapsed_text_has_no_runs(words in proptest::collection::vec("[a-z]{1,5}", 1..5), gap in "[ \t\n]{2,5}") {
        let text = words.join(&gap);
        let collapsed = collapse_whitespace(&text);
        prop_assert!(!collapsed.contains("  "));
        prop_assert_eq!(collapsed, words.join(" "));
    }

    #[test]
    fn collapse_is_idempotent(text in "[a-z \t\n]{0,24}") {
        let once = collapse_whitespace(&text);
        prop_assert_eq!(collapse_whitespace(&once), once.clone());
    }
}
