//! Loading plugin options and catalogs from disk.

use lingo_common::{LingoError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::schema::PluginOptions;

/// Document formats understood by the loader, picked by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
    /// `.yaml` or `.yml`
    Yaml,
}

impl OptionsFormat {
    /// Format for `path`, from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(LingoError::Config(format!(
                "unsupported options file: {}",
                path.display()
            ))),
        }
    }

    /// Parses `content` into a JSON value.
    pub fn parse(self, content: &str) -> Result<Value> {
        match self {
            Self::Json => serde_json::from_str(content)
                .map_err(|e| LingoError::Serialization(e.to_string())),
            Self::Toml => toml::from_str(content)
                .map_err(|e| LingoError::Serialization(e.to_string())),
            Self::Yaml => serde_yaml::from_str(content)
                .map_err(|e| LingoError::Serialization(e.to_string())),
        }
    }
}

/// Reads plugin options from a file.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a loader for the options file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The options file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates the options.
    ///
    /// A relative string under `translations` names a catalog file,
    /// resolved against the options file's directory.
    pub async fn load(&self) -> Result<PluginOptions> {
        let format = OptionsFormat::from_path(&self.path)?;
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut value = format.parse(&content)?;

        let catalog_file = value
            .get("translations")
            .and_then(Value::as_str)
            .filter(|file| !file.is_empty())
            .map(|file| self.resolve_relative(Path::new(file)));
        if let Some(catalog_file) = catalog_file {
            value["translations"] = Self::load_catalog(&catalog_file).await?;
        }

        let options = PluginOptions::from_value(value)?;
        info!("Loaded plugin options from {}", self.path.display());
        Ok(options)
    }

    /// Reads a compiled catalog document.
    pub async fn load_catalog(path: impl AsRef<Path>) -> Result<Value> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let value = parse_catalog(&content)?;
        debug!("Read catalog from {}", path.display());
        Ok(value)
    }

    fn resolve_relative(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        self.path
            .parent()
            .map_or_else(|| path.to_path_buf(), |dir| dir.join(path))
    }
}

/// Blocking catalog read, for callers outside a runtime.
pub fn read_catalog_file(path: impl AsRef<Path>) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    parse_catalog(&content)
}

/// Parses catalog JSON. The document must be an object keyed by language.
pub fn parse_catalog(content: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| LingoError::Serialization(e.to_string()))?;
    if !value.is_object() {
        return Err(LingoError::Catalog(
            "the catalog must be an object keyed by language code".to_string(),
        ));
    }
    Ok(value)
}
