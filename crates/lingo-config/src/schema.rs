//! Plugin options schema.

use lingo_common::{LingoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::validator::OptionsValidator;

/// Option keys the plugin recognizes, in their serialized spelling.
pub const OPTION_KEYS: [&str; 5] = [
    "availableLanguages",
    "defaultLanguage",
    "silent",
    "translations",
    "hot",
];

/// Options given to the plugin at start-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PluginOptions {
    /// Language code to display name. Metadata only, never used by lookups.
    pub available_languages: BTreeMap<String, String>,
    /// Language selected until the host picks another one.
    pub default_language: String,
    /// Suppresses lookup diagnostics.
    pub silent: bool,
    /// The compiled catalog document. Required.
    pub translations: Option<Value>,
    /// Lets the host re-extract block text and reload the catalog on change.
    pub hot: bool,
}

impl PluginOptions {
    /// Parses and validates options from a JSON-like document.
    ///
    /// Unknown keys are rejected before anything else, then the catalog
    /// presence is checked.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(raw) = &value else {
            return Err(LingoError::Config(
                "plugin options must be an object".to_string(),
            ));
        };
        OptionsValidator::check_keys(raw)?;

        let options: Self = serde_json::from_value(value)
            .map_err(|e| LingoError::Config(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Attaches a catalog document.
    #[must_use]
    pub fn with_translations(mut self, translations: Value) -> Self {
        self.translations = Some(translations);
        self
    }

    /// Validates the options.
    pub fn validate(&self) -> Result<()> {
        OptionsValidator::validate(self)
    }

    /// Display name of `language`, if listed.
    pub fn display_name(&self, language: &str) -> Option<&str> {
        self.available_languages.get(language).map(String::as_str)
    }
}
