//! # Lingo I18n
//!
//! gettext-style runtime translation: plural-form selection for 100+
//! languages, catalog lookup with language and whitespace fallback, and
//! `%{ expression }` interpolation against layered JSON contexts.
//!
//! ```
//! use lingo_config::PluginOptions;
//! use lingo_i18n::Translator;
//! use serde_json::json;
//!
//! let options = PluginOptions::from_value(json!({
//!     "defaultLanguage": "fr_FR",
//!     "translations": {
//!         "fr_FR": { "%{ n } apple": ["%{ n } pomme", "%{ n } pommes"] }
//!     }
//! }))?;
//! let translator = Translator::from_options(options)?;
//!
//! let text = translator.ngettext("%{ n } apple", "%{ n } apples", 3);
//! assert_eq!(translator.interpolate(&text, &[&json!({ "n": 3 })]), "3 pommes");
//! # Ok::<(), lingo_common::LingoError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod component;
pub mod diagnostics;
pub mod expression;
pub mod interpolation;
pub mod plural;
pub mod resolver;
pub mod store;
pub mod translator;

pub use catalog::{Catalog, FormCountMismatch, LanguageTable, MessageEntry, Variant};
pub use component::{TranslateBlock, TranslateBlockBuilder, DEFAULT_TAG};
pub use diagnostics::{Diagnostic, DiagnosticSink, Diagnostics, TracingSink};
pub use expression::{render_value, Accessor, Expression, ExpressionError};
pub use interpolation::{interpolate, interpolate_with};
pub use plural::{form_count, resolve_form_index, PluralCount, PluralFamily, SUPPORTED_LANGUAGES};
pub use resolver::{resolve, Resolution, TranslationRequest};
pub use store::{CatalogStore, LanguageSelector};
pub use translator::Translator;

#[cfg(any(test, feature = "testing"))]
pub use diagnostics::MemorySink;
