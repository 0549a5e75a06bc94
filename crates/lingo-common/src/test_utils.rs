//! Test utilities and shared test helpers for Lingo.
//!
//! This module provides logging setup, catalog fixtures and property-testing
//! strategies that can be used across all crates in the workspace for unit and
//! integration testing.

use std::sync::Once;

#[cfg(feature = "tracing-subscriber")]
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
#[cfg(feature = "tracing-subscriber")]
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        fmt().with_test_writer().with_env_filter(filter).init();
    });
}

/// No-op version when tracing-subscriber is not available
#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_test_logging() {
    INIT.call_once(|| {});
}

/// Catalog fixtures in the JSON shape produced by gettext compilers.
#[cfg(feature = "serde_json")]
pub mod catalog_fixtures {
    use serde_json::{json, Value};

    /// A small multi-language catalog covering every entry shape.
    pub fn sample_catalog() -> Value {
        json!({
            "en_US": {
                "Answer": "Answer",
                "Pending": "Pending",
                "%{ carCount } car": ["%{ carCount } car", "%{ carCount } cars"]
            },
            "fr_FR": {
                "Answer": {
                    "Verb": "Réponse (verbe)",
                    "Noun": "Réponse (nom)",
                    "": "Réponse"
                },
                "Pending": "En cours",
                "Hello   world": "Bonjour le monde",
                "%{ carCount } car": ["%{ carCount } voiture", "%{ carCount } voitures"],
                "cat": {
                    "animal": ["chat", "chats"]
                },
                "Untranslated": "",
                "Short": ["Court"]
            },
            "ru": {
                "%{ n } file": ["%{ n } файл", "%{ n } файла", "%{ n } файлов"]
            }
        })
    }

    /// The options document a host would pass at start-up.
    pub fn sample_options() -> Value {
        json!({
            "availableLanguages": {
                "en_US": "American English",
                "fr_FR": "Français",
                "ru": "Русский"
            },
            "defaultLanguage": "fr_FR",
            "silent": false,
            "translations": sample_catalog()
        })
    }
}

/// Property testing utilities and strategies.
#[cfg(feature = "proptest")]
pub mod property_testing {
    use proptest::prelude::*;

    /// Generate gettext-style language codes such as `fr`, `pt_BR` or `ast`.
    pub fn language_code_strategy() -> impl Strategy<Value = String> {
        "[a-z]{2,3}(_[A-Z]{2})?"
    }

    /// Generate non-negative counts across several magnitudes.
    pub fn count_strategy() -> impl Strategy<Value = i64> {
        prop_oneof![0i64..=30, 0i64..=1_000, 0i64..=i64::from(u32::MAX)]
    }

    /// Generate text with irregular whitespace runs.
    pub fn spaced_text_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(("[a-zA-Z]{1,6}", "[ \t\n]{1,4}"), 1..6).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(word, gap)| format!("{word}{gap}"))
                .collect()
        })
    }
}
