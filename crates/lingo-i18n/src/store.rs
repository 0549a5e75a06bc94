//! Hot-swappable state shared by every lookup.
//!
//! Both stores use arc-swap so that lookups read without locking while a
//! host can replace the catalog or switch the language at any time. A
//! replacement is observed by the next lookup.

use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::info;

use crate::catalog::Catalog;

/// The active catalog.
#[derive(Debug)]
pub struct CatalogStore {
    catalog: ArcSwap<Catalog>,
}

impl CatalogStore {
    /// Creates a store holding `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(catalog),
        }
    }

    /// Gets the current catalog.
    pub fn get(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Replaces the catalog atomically.
    pub fn replace(&self, catalog: Catalog) {
        info!("Replacing catalog ({} languages)", catalog.languages().len());
        self.catalog.store(Arc::new(catalog));
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

/// The language every facade lookup uses unless told otherwise.
///
/// Owned by the host; read on every request and never cached.
#[derive(Debug)]
pub struct LanguageSelector {
    language: ArcSwap<String>,
}

impl LanguageSelector {
    /// Creates a selector pointing at `language`.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: ArcSwap::from_pointee(language.into()),
        }
    }

    /// Gets the current language code.
    pub fn get(&self) -> Arc<String> {
        self.language.load_full()
    }

    /// Switches language.
    pub fn set(&self, language: impl Into<String>) {
        let language = language.into();
        info!("Switching language to {}", language);
        self.language.store(Arc::new(language));
    }
}

impl Default for LanguageSelector {
    fn default() -> Self {
        Self::new(lingo_config::DEFAULT_LANGUAGE)
    }
}
