//! Catalog file watching for hot reload.

use lingo_common::{LingoError, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::Value;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::loader::read_catalog_file;

/// Watches one catalog file and hands every successfully parsed version to a
/// callback. The watch stops when the value is dropped.
pub struct CatalogWatcher {
    path: PathBuf,
    _watcher: RecommendedWatcher,
}

impl CatalogWatcher {
    /// Starts watching `path`.
    ///
    /// The parent directory is watched so that editors replacing the file
    /// are noticed. Unparseable versions are logged and skipped.
    pub fn spawn<F>(path: impl Into<PathBuf>, on_change: F) -> Result<Self>
    where
        F: Fn(Value) + Send + 'static,
    {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| LingoError::Config(format!("not a file: {}", path.display())))?;
        let directory = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let target = path.clone();
        let mut watcher = notify::recommended_watcher(
            move |event: notify::Result<Event>| match event {
                Ok(event) if touches(&event, &file_name) => match read_catalog_file(&target) {
                    Ok(catalog) => {
                        debug!("Catalog {} changed", target.display());
                        on_change(catalog);
                    }
                    Err(e) => warn!("Ignoring catalog update {}: {}", target.display(), e),
                },
                Ok(_) => {}
                Err(e) => warn!("Catalog watch error: {}", e),
            },
        )
        .map_err(|e| LingoError::Config(format!("cannot create watcher: {e}")))?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| LingoError::Config(format!("cannot watch {}: {e}", directory.display())))?;

        info!("Watching catalog {}", path.display());
        Ok(Self {
            path,
            _watcher: watcher,
        })
    }

    /// The watched file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for CatalogWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogWatcher")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()))
}
