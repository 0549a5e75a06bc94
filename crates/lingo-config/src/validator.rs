//! Option validation.

use lingo_common::{LingoError, Result};
use serde_json::{Map, Value};

use crate::schema::{PluginOptions, OPTION_KEYS};

/// Options validator.
pub struct OptionsValidator;

impl OptionsValidator {
    /// Rejects the first key that is not a known option.
    pub fn check_keys(raw: &Map<String, Value>) -> Result<()> {
        match raw.keys().find(|key| !OPTION_KEYS.contains(&key.as_str())) {
            Some(key) => Err(LingoError::InvalidOption(key.clone())),
            None => Ok(()),
        }
    }

    /// Validates parsed options.
    pub fn validate(options: &PluginOptions) -> Result<()> {
        let translations = options
            .translations
            .as_ref()
            .filter(|value| is_truthy(value))
            .ok_or(LingoError::MissingTranslations)?;

        if !translations.is_object() {
            return Err(LingoError::Catalog(
                "translations must be an object keyed by language code".to_string(),
            ));
        }

        if options.default_language.trim().is_empty() {
            return Err(LingoError::Config(
                "defaultLanguage cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Whether `value` counts as supplied: `null`, `false`, `0` and `""` do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
