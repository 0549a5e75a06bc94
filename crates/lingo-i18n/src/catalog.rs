//! Catalog model for compiled gettext JSON.
//!
//! A catalog maps language codes to tables, tables map msgids to entries.
//! Tables keep the key order of the source document because the
//! whitespace-tolerant key scan accepts the first match it meets.

use lingo_common::{collapse_whitespace, LingoError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::plural::form_count;

/// The translation of one msgid under one context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Variant {
    /// A message without plural forms.
    Single(String),
    /// Plural forms, indexed by the language's plural rule.
    Forms(Vec<String>),
}

impl Variant {
    /// The form at `index`. A single string behaves as a one-element list.
    pub fn form(&self, index: usize) -> Option<&str> {
        match self {
            Self::Single(text) if index == 0 => Some(text),
            Self::Single(_) => None,
            Self::Forms(forms) => forms.get(index).map(String::as_str),
        }
    }

    /// Number of forms held.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Forms(forms) => forms.len(),
        }
    }

    /// Whether there is no form at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a table stores for one msgid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageEntry {
    /// A plain translation.
    Single(String),
    /// Plural forms without context.
    Forms(Vec<String>),
    /// Translations keyed by context; `""` is the context-free variant.
    Contextual(HashMap<String, Variant>),
}

impl MessageEntry {
    /// Entries that compilers emit for untranslated messages.
    ///
    /// An empty string is the only such shape; lookups treat it as absent.
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Single(text) if text.is_empty())
    }

    /// The form at `index` of the variant selected by `context`.
    ///
    /// Without a context, a contextual entry falls back to its `""` variant.
    /// A context on an entry that has none selects nothing.
    pub fn form(&self, context: Option<&str>, index: usize) -> Option<&str> {
        match (self, context) {
            (Self::Contextual(variants), context) => {
                variants.get(context.unwrap_or("")).and_then(|v| v.form(index))
            }
            (Self::Single(text), None) if index == 0 => Some(text),
            (Self::Forms(forms), None) => forms.get(index).map(String::as_str),
            _ => None,
        }
    }

    fn plural_lengths(&self) -> Vec<usize> {
        match self {
            Self::Single(_) => Vec::new(),
            Self::Forms(forms) => vec![forms.len()],
            Self::Contextual(variants) => variants
                .values()
                .filter_map(|variant| match variant {
                    Variant::Forms(forms) => Some(forms.len()),
                    Variant::Single(_) => None,
                })
                .collect(),
        }
    }
}

/// All messages of one language, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct LanguageTable {
    entries: Vec<(String, MessageEntry)>,
    positions: HashMap<String, usize>,
}

impl LanguageTable {
    /// Exact lookup. Blank entries count as missing.
    pub fn get(&self, msgid: &str) -> Option<&MessageEntry> {
        self.positions
            .get(msgid)
            .map(|&position| &self.entries[position].1)
            .filter(|entry| !entry.is_blank())
    }

    /// Looks for a key that reads like `msgid` once whitespace runs are
    /// collapsed. The first such key in source order wins.
    pub fn find_collapsed(&self, msgid: &str) -> Option<(&str, &MessageEntry)> {
        let wanted = collapse_whitespace(msgid);
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.is_blank())
            .find(|(key, _)| collapse_whitespace(key) == wanted)
            .map(|(key, entry)| (key.as_str(), entry))
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Number of msgids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no msgid.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TryFrom<Map<String, Value>> for LanguageTable {
    type Error = String;

    /// The error is a bare message; [`Catalog::from_value`] adds the
    /// `LingoError::Catalog` wrapping.
    fn try_from(map: Map<String, Value>) -> std::result::Result<Self, String> {
        let mut table = Self::default();
        for (msgid, value) in map {
            let entry: MessageEntry = serde_json::from_value(value)
                .map_err(|e| format!("entry {msgid:?} has an unexpected shape: {e}"))?;
            match table.positions.get(&msgid) {
                Some(&position) => table.entries[position].1 = entry,
                None => {
                    table.positions.insert(msgid.clone(), table.entries.len());
                    table.entries.push((msgid, entry));
                }
            }
        }
        Ok(table)
    }
}

/// A plural entry whose number of forms disagrees with its language's rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormCountMismatch {
    /// Catalog language code.
    pub language: String,
    /// Offending msgid.
    pub msgid: String,
    /// Forms the plural rule expects.
    pub expected: usize,
    /// Forms the catalog provides.
    pub found: usize,
}

/// Translations for every language, as compiled from `.po` files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    languages: HashMap<String, LanguageTable>,
}

impl Catalog {
    /// Builds a catalog from its JSON document.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(LingoError::Catalog(
                "the catalog must be an object keyed by language code".to_string(),
            ));
        }
        let catalog: Self = serde_json::from_value(value).map_err(|e| match e.classify() {
            serde_json::error::Category::Data => LingoError::Catalog(e.to_string()),
            _ => LingoError::Serialization(e.to_string()),
        })?;
        debug!("Built catalog with {} languages", catalog.languages.len());
        Ok(catalog)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| LingoError::Serialization(e.to_string()))?;
        Self::from_value(value)
    }

    /// The table stored under exactly `language`.
    pub fn language(&self, language: &str) -> Option<&LanguageTable> {
        self.languages.get(language)
    }

    /// Whether a table exists under exactly `language`.
    pub fn has_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Language codes present, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Plural entries that provide a different number of forms than their
    /// language's rule selects from.
    pub fn form_count_mismatches(&self) -> Vec<FormCountMismatch> {
        let mut mismatches = Vec::new();
        for language in self.languages() {
            let expected = form_count(language);
            for (msgid, entry) in self.languages[language].iter() {
                for found in entry.plural_lengths() {
                    if found != expected {
                        mismatches.push(FormCountMismatch {
                            language: language.to_string(),
                            msgid: msgid.to_string(),
                            expected,
                            found,
                        });
                    }
                }
            }
        }
        mismatches
    }
}
