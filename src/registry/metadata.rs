//! Registry metadata file.
//!
//! The whole registry state lives in one `registry.toml`:
//!
//! ```toml
//! updated = "2026-01-05T10:00:00Z"
//!
//! [templates.rust-cli]
//! name = "rust-cli"
//! path = "/home/me/.local/share/stamp/templates/rust-cli"
//! ...
//! ```
//!
//! Mutations go through [`MetadataStore::update`], which holds an exclusive
//! lock on `registry.lock` for the read-modify-write and replaces the file
//! with a rename so readers never see a partial write.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::entry::TemplateEntry;
use crate::error::{Result, StampError};

/// Metadata file name under the registry root.
pub const METADATA_FILE: &str = "registry.toml";

/// Lock file name under the registry root.
pub const LOCK_FILE: &str = "registry.lock";

/// Persisted registry state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryMetadata {
    /// Time of the last write
    pub updated: DateTime<Utc>,

    #[serde(default)]
    pub templates: BTreeMap<String, TemplateEntry>,
}

impl Default for RegistryMetadata {
    fn default() -> Self {
        Self {
            updated: Utc::now(),
            templates: BTreeMap::new(),
        }
    }
}

/// Exclusive lock on the registry, released on drop.
#[derive(Debug)]
pub struct RegistryLock {
    _file: File,
}

impl RegistryLock {
    /// Block until the registry lock is held.
    pub fn acquire(root: &Path) -> Result<Self> {
        let path = root.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open lock file {}", path.display()))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to lock {}", path.display()))?;
        debug!(path = %path.display(), "Registry lock acquired");

        Ok(Self { _file: file })
    }
}

/// Reads and writes the metadata file of one registry root.
#[derive(Debug, Clone)]
pub struct MetadataStore {
    root: PathBuf,
}

impl MetadataStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the metadata file.
    pub fn path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// Load the metadata; a missing file is an empty registry.
    pub fn load(&self) -> Result<RegistryMetadata> {
        let path = self.path();
        if !path.exists() {
            return Ok(RegistryMetadata::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).map_err(|e| StampError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })
    }

    /// Write the metadata, replacing the file atomically.
    pub fn save(&self, metadata: &RegistryMetadata) -> Result<()> {
        let path = self.path();
        let content = toml::to_string_pretty(metadata)
            .context("Failed to serialize registry metadata")?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, &content)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!(path = %path.display(), templates = metadata.templates.len(), "Registry metadata saved");
        Ok(())
    }

    /// Read-modify-write under the registry lock.
    ///
    /// `mutate` runs on the freshly loaded metadata. When it returns `Ok`, the
    /// `updated` stamp is refreshed and the whole file is rewritten; when it
    /// fails nothing is written.
    pub fn update<T>(&self, mutate: impl FnOnce(&mut RegistryMetadata) -> Result<T>) -> Result<T> {
        let _lock = RegistryLock::acquire(&self.root)?;

        let mut metadata = self.load()?;
        let value = mutate(&mut metadata)?;
        metadata.updated = Utc::now();
        self.save(&metadata)?;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(name: &str, root: &Path) -> TemplateEntry {
        TemplateEntry {
            name: name.to_string(),
            path: root.join("templates").join(name),
            description: String::new(),
            source: PathBuf::from("/src"),
            template_type: String::new(),
            size: 0,
            files: 0,
            added: Utc::now(),
            variables: vec![],
        }
    }

    #[test]
    fn missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = MetadataStore::new(temp.path());
        assert!(store.load().unwrap().templates.is_empty());
    }

    #[test]
    fn update_persists_whole_state() {
        let temp = TempDir::new().unwrap();
        let store = MetadataStore::new(temp.path());

        store
            .update(|m| {
                m.templates.insert("a".into(), entry("a", temp.path()));
                Ok(())
            })
            .unwrap();
        store
            .update(|m| {
                m.templates.insert("b".into(), entry("b", temp.path()));
                Ok(())
            })
            .unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.templates.len(), 2);
        assert!(!temp.path().join("registry.toml.tmp").exists());

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("updated"));
        assert!(text.contains("[templates.a]"));
    }

    #[test]
    fn failed_update_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let store = MetadataStore::new(temp.path());

        let result: Result<()> = store.update(|m| {
            m.templates.insert("a".into(), entry("a", temp.path()));
            Err(StampError::AlreadyExists { name: "a".into() })
        });

        assert!(result.is_err());
        assert!(!store.path().exists());
    }

    #[test]
    fn corrupt_file_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let store = MetadataStore::new(temp.path());
        fs::write(store.path(), "templates = [").unwrap();
        assert!(matches!(
            store.load().unwrap_err(),
            StampError::ConfigParse { .. }
        ));
    }

    #[test]
    fn lock_is_reacquirable_after_drop() {
        let temp = TempDir::new().unwrap();
        {
            let _lock = RegistryLock::acquire(temp.path()).unwrap();
        }
        let _again = RegistryLock::acquire(temp.path()).unwrap();
        assert!(temp.path().join(LOCK_FILE).exists());
    }
}
