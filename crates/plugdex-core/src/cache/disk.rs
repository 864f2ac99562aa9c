//! JSON-file snapshot store.

use super::traits::{CatalogSnapshot, SnapshotStore};
use crate::config::CatalogConfig;
use crate::error::{PlugdexError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Stores the catalog snapshot as one JSON file under a cache directory.
pub struct DiskStore {
    path: PathBuf,
}

impl DiskStore {
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            path: cache_dir.as_ref().join(CatalogConfig::SNAPSHOT_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for DiskStore {
    fn load(&self) -> Option<CatalogSnapshot> {
        if !self.path.exists() {
            return None;
        }

        match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!(
                        "Failed to parse catalog snapshot {}: {}",
                        self.path.display(),
                        e
                    );
                    None
                }
            },
            Err(e) => {
                warn!(
                    "Failed to read catalog snapshot {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    fn save(&self, snapshot: &CatalogSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlugdexError::io_with_path(e, parent))?;
        }

        let contents = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, contents)
            .map_err(|e| PlugdexError::io_with_path(e, &self.path))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .map_err(|e| PlugdexError::io_with_path(e, &self.path))?;
        }
        Ok(())
    }
}
