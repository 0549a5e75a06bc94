//! The translation facade handed to host code.

use lingo_common::Result;
use lingo_config::{CatalogWatcher, PluginOptions};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::interpolation;
use crate::plural::PluralCount;
use crate::resolver::{resolve, TranslationRequest};
use crate::store::{CatalogStore, LanguageSelector};

/// gettext-style lookups against shared, swappable state.
///
/// Cloning is cheap and every clone sees the same catalog, language and
/// silence flag.
#[derive(Debug, Clone)]
pub struct Translator {
    catalog: Arc<CatalogStore>,
    language: Arc<LanguageSelector>,
    diagnostics: Arc<Diagnostics>,
    available_languages: Arc<BTreeMap<String, String>>,
    default_language: Arc<str>,
    hot: bool,
}

impl Translator {
    /// Creates a translator over existing state, with default metadata.
    pub fn new(
        catalog: Arc<CatalogStore>,
        language: Arc<LanguageSelector>,
        diagnostics: Arc<Diagnostics>,
    ) -> Self {
        let defaults = PluginOptions::default();
        Self {
            catalog,
            language,
            diagnostics,
            available_languages: Arc::new(defaults.available_languages),
            default_language: defaults.default_language.into(),
            hot: defaults.hot,
        }
    }

    /// Builds a translator from validated start-up options.
    pub fn from_options(options: PluginOptions) -> Result<Self> {
        options.validate()?;
        let PluginOptions {
            available_languages,
            default_language,
            silent,
            translations,
            hot,
        } = options;

        let catalog = Catalog::from_value(translations.unwrap_or(Value::Null))?;
        info!(
            "Translator ready: {} catalog languages, default {}",
            catalog.languages().len(),
            default_language
        );

        let translator = Self {
            catalog: Arc::new(CatalogStore::new(catalog)),
            language: Arc::new(LanguageSelector::new(default_language.clone())),
            diagnostics: Arc::new(Diagnostics::new(silent)),
            available_languages: Arc::new(available_languages),
            default_language: default_language.into(),
            hot,
        };
        translator.audit_catalog();
        Ok(translator)
    }

    /// Reports every plural entry whose form count does not match its
    /// language, and returns how many there are.
    ///
    /// Reports go through the diagnostics channel, so a silent translator
    /// stays quiet. The count is returned either way.
    pub fn audit_catalog(&self) -> usize {
        let mismatches = self.catalog.get().form_count_mismatches();
        for mismatch in &mismatches {
            self.diagnostics.report(Diagnostic::FormCountMismatch {
                language: mismatch.language.clone(),
                msgid: mismatch.msgid.clone(),
                expected: mismatch.expected,
                found: mismatch.found,
            });
        }
        mismatches.len()
    }

    /// Routes diagnostics to another channel.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Translates `msgid`.
    pub fn gettext(&self, msgid: &str) -> String {
        self.gettext_in(&self.current_language(), msgid)
    }

    /// Translates `msgid` under `context`.
    pub fn pgettext(&self, context: &str, msgid: &str) -> String {
        self.pgettext_in(&self.current_language(), context, msgid)
    }

    /// Translates `msgid` for `count`; `plural` is the untranslated plural.
    pub fn ngettext(&self, msgid: &str, plural: &str, count: impl Into<PluralCount>) -> String {
        self.ngettext_in(&self.current_language(), msgid, plural, count)
    }

    /// Translates `msgid` under `context` for `count`.
    pub fn npgettext(
        &self,
        context: &str,
        msgid: &str,
        plural: &str,
        count: impl Into<PluralCount>,
    ) -> String {
        self.npgettext_in(&self.current_language(), context, msgid, plural, count)
    }

    /// [`Self::gettext`] in an explicit language.
    pub fn gettext_in(&self, language: &str, msgid: &str) -> String {
        self.translate(&TranslationRequest::new(msgid, language))
    }

    /// [`Self::pgettext`] in an explicit language.
    pub fn pgettext_in(&self, language: &str, context: &str, msgid: &str) -> String {
        self.translate(&TranslationRequest::new(msgid, language).with_context(context))
    }

    /// [`Self::ngettext`] in an explicit language.
    pub fn ngettext_in(
        &self,
        language: &str,
        msgid: &str,
        plural: &str,
        count: impl Into<PluralCount>,
    ) -> String {
        self.translate(
            &TranslationRequest::new(msgid, language)
                .with_count(count)
                .with_default_plural(plural),
        )
    }

    /// [`Self::npgettext`] in an explicit language.
    pub fn npgettext_in(
        &self,
        language: &str,
        context: &str,
        msgid: &str,
        plural: &str,
        count: impl Into<PluralCount>,
    ) -> String {
        self.translate(
            &TranslationRequest::new(msgid, language)
                .with_context(context)
                .with_count(count)
                .with_default_plural(plural),
        )
    }

    /// Resolves a fully specified request. An entry without a matching form
    /// yields the msgid.
    pub fn translate(&self, request: &TranslationRequest<'_>) -> String {
        let catalog = self.catalog.get();
        resolve(&catalog, request, &self.diagnostics).into_string_or(request.msgid)
    }

    /// Interpolates `template` against `layers`, innermost first.
    pub fn interpolate(&self, template: &str, layers: &[&Value]) -> String {
        interpolation::interpolate(template, layers, &self.diagnostics)
    }

    /// The active language code.
    pub fn current_language(&self) -> Arc<String> {
        self.language.get()
    }

    /// Switches the active language. The next lookup uses it.
    pub fn set_language(&self, language: impl Into<String>) {
        self.language.set(language);
    }

    /// Language codes and display names from the options.
    pub fn available_languages(&self) -> &BTreeMap<String, String> {
        &self.available_languages
    }

    /// The language selected at start-up.
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Whether hot reload was requested.
    pub const fn is_hot(&self) -> bool {
        self.hot
    }

    /// The diagnostics channel.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Mutes or unmutes diagnostics.
    pub fn set_silent(&self, silent: bool) {
        self.diagnostics.set_silent(silent);
    }

    /// The active catalog.
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog.get()
    }

    /// Swaps in a new catalog. The next lookup uses it.
    pub fn replace_catalog(&self, catalog: Catalog) {
        self.catalog.replace(catalog);
    }

    /// Reloads the catalog whenever the file at `path` changes.
    ///
    /// Returns `None` unless hot reload is enabled. Keep the watcher alive for
    /// as long as reloads are wanted.
    pub fn watch_catalog(&self, path: impl AsRef<Path>) -> Result<Option<CatalogWatcher>> {
        if !self.hot {
            debug!("Hot reload disabled, not watching {}", path.as_ref().display());
            return Ok(None);
        }
        let store = Arc::clone(&self.catalog);
        let watcher = CatalogWatcher::spawn(path.as_ref(), move |value| {
            match Catalog::from_value(value) {
                Ok(catalog) => store.replace(catalog),
                Err(e) => warn!("Keeping previous catalog: {}", e),
            }
        })?;
        Ok(Some(watcher))
    }
}
