//! Catalog resolution: from a translation request to the localized string.

use lingo_common::primary_subtag;
use tracing::debug;

use crate::catalog::{Catalog, LanguageTable, MessageEntry};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::plural::{resolve_form_index, PluralCount};

/// One lookup, built per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationRequest<'a> {
    /// Message key, conventionally the untranslated text.
    pub msgid: &'a str,
    /// Target language code, e.g. `fr_FR`.
    pub language: &'a str,
    /// Grammatical number.
    pub count: PluralCount,
    /// Disambiguation context.
    pub context: Option<&'a str>,
    /// Untranslated plural, returned when nothing is found and the count is
    /// plural.
    pub default_plural: Option<&'a str>,
}

impl<'a> TranslationRequest<'a> {
    /// Singular, context-free request.
    pub fn new(msgid: &'a str, language: &'a str) -> Self {
        Self {
            msgid,
            language,
            count: PluralCount::default(),
            context: None,
            default_plural: None,
        }
    }

    /// Sets the count.
    #[must_use]
    pub fn with_count(mut self, count: impl Into<PluralCount>) -> Self {
        self.count = count.into();
        self
    }

    /// Sets the context.
    #[must_use]
    pub const fn with_context(mut self, context: &'a str) -> Self {
        self.context = Some(context);
        self
    }

    /// Sets the untranslated plural.
    #[must_use]
    pub const fn with_default_plural(mut self, plural: &'a str) -> Self {
        self.default_plural = Some(plural);
        self
    }

    fn form_index(&self) -> usize {
        resolve_form_index(self.language, self.count)
    }

    /// What to show when the catalog has nothing for this request.
    fn fallback(&self) -> &'a str {
        match self.default_plural {
            Some(plural) if !plural.is_empty() && self.form_index() > 0 => plural,
            _ => self.msgid,
        }
    }

    /// An empty context is no context.
    fn context(&self) -> Option<&'a str> {
        self.context.filter(|context| !context.is_empty())
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The catalog had a translation.
    Translated(&'a str),
    /// Language or key missing: the untranslated singular or plural.
    Fallback(&'a str),
    /// The entry exists but has no variant for the context, or no form at
    /// the plural index.
    ///
    /// A plain string entry only has form 0. Languages whose rule sends the
    /// default count of 1 to a later form (`ar`, `jv`, `mnk`) therefore get
    /// `Undefined` for it, and the facade shows the msgid.
    Undefined,
}

impl Resolution<'_> {
    /// The text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Translated(text) | Self::Fallback(text) => Some(*text),
            Self::Undefined => None,
        }
    }

    /// Whether the catalog provided the text.
    pub const fn is_translated(&self) -> bool {
        matches!(self, Self::Translated(_))
    }

    /// Owned text, with `Undefined` replaced by `default`.
    pub fn into_string_or(self, default: &str) -> String {
        self.text().unwrap_or(default).to_string()
    }
}

/// Finds the table for `language`, then for its primary subtag.
pub fn language_table<'c>(catalog: &'c Catalog, language: &str) -> Option<&'c LanguageTable> {
    catalog
        .language(language)
        .or_else(|| catalog.language(primary_subtag(language)))
}

/// Finds the entry for `msgid`, tolerating whitespace differences.
pub fn find_entry<'t>(table: &'t LanguageTable, msgid: &str) -> Option<&'t MessageEntry> {
    table.get(msgid).or_else(|| {
        table.find_collapsed(msgid).map(|(key, entry)| {
            debug!("Matched {:?} to catalog key {:?} after collapsing whitespace", msgid, key);
            entry
        })
    })
}

/// Resolves `request` against `catalog`.
///
/// Misses are reported to `diagnostics` and degrade to the untranslated
/// text; nothing here fails.
pub fn resolve<'a>(
    catalog: &'a Catalog,
    request: &TranslationRequest<'a>,
    diagnostics: &Diagnostics,
) -> Resolution<'a> {
    // Empty messages are always valid and never looked up.
    if request.msgid.is_empty() {
        return Resolution::Fallback(request.msgid);
    }

    let Some(table) = language_table(catalog, request.language) else {
        diagnostics.report(Diagnostic::MissingLanguage {
            language: request.language.to_string(),
        });
        return Resolution::Fallback(request.fallback());
    };

    let Some(entry) = find_entry(table, request.msgid) else {
        diagnostics.report(Diagnostic::MissingKey {
            language: request.language.to_string(),
            msgid: request.msgid.to_string(),
        });
        return Resolution::Fallback(request.fallback());
    };

    let index = request.form_index();
    match entry.form(request.context(), index) {
        Some(text) => Resolution::Translated(text),
        None => {
            debug!(
                msgid = request.msgid,
                language = request.language,
                context = ?request.context,
                index,
                "Catalog entry has no matching form"
            );
            Resolution::Undefined
        }
    }
}
