//! Default option values.

use crate::schema::PluginOptions;
use std::collections::BTreeMap;

/// Language selected when the options do not name one.
pub const DEFAULT_LANGUAGE: &str = "en_US";

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            available_languages: BTreeMap::from([(
                DEFAULT_LANGUAGE.to_string(),
                "English".to_string(),
            )]),
            default_language: DEFAULT_LANGUAGE.to_string(),
            silent: false,
            translations: None,
            hot: false,
        }
    }
}
