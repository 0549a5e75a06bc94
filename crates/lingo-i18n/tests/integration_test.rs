//! Integration tests for lingo-i18n crate.
//!
//! These tests exercise the public facade end to end: options in, strings out.

use lingo_common::collapse_whitespace;
use lingo_common::test_utils::catalog_fixtures::{sample_catalog, sample_options};
use lingo_common::test_utils::init_test_logging;
use lingo_common::test_utils::property_testing::{
    count_strategy, language_code_strategy, spaced_text_strategy,
};
use lingo_config::PluginOptions;
use lingo_i18n::{
    form_count, interpolate_with, resolve_form_index, Catalog, Diagnostic, DiagnosticSink,
    Diagnostics, TranslateBlock, Translator, SUPPORTED_LANGUAGES,
};
use proptest::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Debug, Default)]
struct Recorder(Mutex<Vec<String>>);

impl DiagnosticSink for Recorder {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.0.lock().unwrap().push(diagnostic.to_string());
    }
}

fn translator() -> Translator {
    init_test_logging();
    Translator::from_options(PluginOptions::from_value(sample_options()).unwrap()).unwrap()
}

#[test]
fn test_plural_examples() {
    let cases: &[(&str, i64, usize)] = &[
        ("fr", 0, 0),
        ("fr", 1, 0),
        ("fr", 2, 1),
        ("ru", 1, 0),
        ("ru", 2, 1),
        ("ru", 5, 2),
        ("ru", 11, 2),
        ("ar", 0, 0),
        ("ar", 1, 1),
        ("ar", 2, 2),
        ("ar", 7, 3),
        ("ar", 15, 4),
        ("ar", 100, 5),
    ];
    for &(language, n, expected) in cases {
        assert_eq!(resolve_form_index(language, n), expected, "{language} {n}");
    }
}

#[test]
fn test_missing_language_falls_back() {
    let recorder = Arc::new(Recorder::default());
    let catalog = Catalog::from_value(json!({ "en_US": { "Hello": "Hello" } })).unwrap();
    let translator = translator().with_diagnostics(Arc::new(Diagnostics::with_sink(
        recorder.clone(),
        false,
    )));
    translator.replace_catalog(catalog);
    translator.set_language("en_GB");

    assert_eq!(translator.gettext("Hello"), "Hello");
    assert_eq!(
        recorder.0.lock().unwrap().as_slice(),
        ["No translations found for en_GB"]
    );
}

#[test]
fn test_context_and_plural() {
    let translator = translator();
    assert_eq!(translator.npgettext("animal", "cat", "cats", 2), "chats");
}

#[test]
fn test_whitespace_insensitive_keys() {
    let translator = translator();
    assert_eq!(translator.gettext("Hello world"), "Bonjour le monde");

    translator.replace_catalog(
        Catalog::from_value(json!({ "fr_FR": { "Hello world": "Salut" } })).unwrap(),
    );
    assert_eq!(translator.gettext("Hello  world"), "Salut");
}

#[test]
fn test_interpolation_examples() {
    let diagnostics = Diagnostics::new(true);
    assert_eq!(
        interpolate_with("Hi %{ user.name }", &json!({ "user": { "name": "Bob" } }), &diagnostics),
        "Hi Bob"
    );
    assert_eq!(
        interpolate_with("%{ missing.path }", &json!({}), &diagnostics),
        "missing.path"
    );
}

#[test]
fn test_empty_msgid_everywhere() {
    let translator = translator();
    translator.set_language("xx_XX");
    assert_eq!(translator.gettext(""), "");
    assert_eq!(translator.pgettext("ctx", ""), "");
    assert_eq!(translator.ngettext("", "many", 3), "");
    assert_eq!(translator.npgettext("ctx", "", "many", 3), "");
}

#[test]
fn test_translate_block_end_to_end() {
    let translator = translator();
    let parent = json!({ "n": 22 });
    translator.set_language("ru_RU");
    let block = TranslateBlock::builder(" %{ n } file ")
        .n(22)
        .plural("%{ n } files")
        .build()
        .unwrap();
    assert_eq!(block.render_element(&translator, &[&parent]), "<span>22 файла</span>");
}

#[test]
fn test_hot_reload_swaps_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, sample_catalog().to_string()).unwrap();

    let options = PluginOptions::from_value(sample_options())
        .unwrap()
        .with_translations(sample_catalog());
    let translator = Translator::from_options(PluginOptions { hot: true, ..options }).unwrap();
    let _watcher = translator.watch_catalog(&path).unwrap().unwrap();

    std::fs::write(&path, json!({ "fr_FR": { "Pending": "En attente" } }).to_string()).unwrap();

    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    while translator.gettext("Pending") != "En attente" && std::time::Instant::now() < deadline {
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
    assert_eq!(translator.gettext("Pending"), "En attente");
}

proptest! {
    #[test]
    fn prop_form_index_in_range(
        language in proptest::sample::select(SUPPORTED_LANGUAGES),
        n in count_strategy()
    ) {
        let index = resolve_form_index(language, n);
        prop_assert!(index < form_count(language));
        prop_assert_eq!(index, resolve_form_index(language, n));
    }

    #[test]
    fn prop_regional_codes_follow_primary(
        language in proptest::sample::select(SUPPORTED_LANGUAGES),
        n in count_strategy()
    ) {
        prop_assume!(!language.contains('_'));
        let regional = format!("{language}_XX");
        prop_assert_eq!(resolve_form_index(&regional, n), resolve_form_index(language, n));
    }

    #[test]
    fn prop_any_code_has_a_valid_index(language in language_code_strategy(), n in count_strategy()) {
        prop_assert!(resolve_form_index(&language, n) < form_count(&language));
    }

    #[test]
    fn prop_spacing_does_not_change_lookup(text in spaced_text_strategy()) {
        let key = collapse_whitespace(&text);
        prop_assume!(!key.is_empty());
        let mut table = serde_json::Map::new();
        table.insert(key, json!("übersetzt"));
        let catalog = Catalog::from_value(json!({ "de": table })).unwrap();
        let translator = Translator::new(
            Arc::new(lingo_i18n::CatalogStore::new(catalog)),
            Arc::new(lingo_i18n::LanguageSelector::new("de_DE")),
            Arc::new(Diagnostics::new(true)),
        );
        prop_assert_eq!(translator.gettext(&text), "übersetzt");
    }
}
