//! The local template registry.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{anyhow, Context};
use chrono::Utc;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::entry::TemplateEntry;
use super::metadata::MetadataStore;
use super::storage::{analyze, copy_tree};
use crate::error::{Result, StampError};
use crate::template::TemplateConfig;

/// Environment variable overriding the registry root.
pub const HOME_ENV: &str = "STAMP_HOME";

/// Allowed template names: one path component, no leading dot.
static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("NAME_REGEX must compile")
});

/// Options for [`Registry::remove`].
#[derive(Debug, Clone, Default)]
pub struct RemoveOptions {
    /// Copy the template somewhere before deleting it.
    pub backup: bool,
    /// Where backups go (defaults to `backups/` under the registry root).
    pub backup_dir: Option<PathBuf>,
}

/// Persistent store of registered templates.
///
/// Layout under the root:
///
/// ```text
/// registry.toml       metadata of every template
/// registry.lock       held during metadata updates
/// templates/<name>/   registry-owned copy of each template
/// backups/            default destination of remove backups
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    root: PathBuf,
    templates_dir: PathBuf,
    metadata: MetadataStore,
}

impl Registry {
    /// Open the registry at the default location, creating it if needed.
    ///
    /// The root is `$STAMP_HOME` when set, otherwise `stamp/` under the
    /// platform data directory.
    pub fn new() -> Result<Self> {
        Self::open(Self::default_root()?)
    }

    /// Open the registry at `root`, creating it if needed.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = std::path::absolute(root.as_ref())
            .with_context(|| format!("Invalid registry path {}", root.as_ref().display()))?;
        let templates_dir = root.join("templates");

        fs::create_dir_all(&templates_dir)
            .with_context(|| format!("Failed to create registry at {}", root.display()))?;
        debug!(root = %root.display(), "Registry opened");

        Ok(Self {
            metadata: MetadataStore::new(&root),
            templates_dir,
            root,
        })
    }

    /// Default registry root.
    pub fn default_root() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(home));
        }

        dirs::data_dir()
            .map(|d| d.join("stamp"))
            .ok_or_else(|| anyhow!("Could not determine a data directory; set {}", HOME_ENV).into())
    }

    /// Registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the template copies.
    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    /// Default backup directory.
    pub fn backups_dir(&self) -> PathBuf {
        self.root.join("backups")
    }

    /// Path of the metadata file.
    pub fn metadata_path(&self) -> PathBuf {
        self.metadata.path()
    }

    /// All registered templates, ordered by name.
    pub fn list(&self) -> Result<Vec<TemplateEntry>> {
        Ok(self.metadata.load()?.templates.into_values().collect())
    }

    /// Full entry of a template.
    pub fn entry(&self, name: &str) -> Result<TemplateEntry> {
        self.metadata
            .load()?
            .templates
            .remove(name)
            .ok_or_else(|| not_registered(name))
    }

    /// Path of the registry-owned copy of a template.
    pub fn get(&self, name: &str) -> Result<PathBuf> {
        self.entry(name).map(|e| e.path)
    }

    /// Whether a template is registered.
    pub fn contains(&self, name: &str) -> Result<bool> {
        Ok(self.metadata.load()?.templates.contains_key(name))
    }

    /// Register the directory `source` as template `name`.
    ///
    /// The tree is copied into `templates/<name>/`. `description` and
    /// `template_type` fall back to the template config when not given.
    ///
    /// # Errors
    ///
    /// - `InvalidName` if `name` cannot be a registry key
    /// - `NotFound` / `NotADirectory` for a bad `source`
    /// - `AlreadyExists` if `name` is registered
    pub fn add(
        &self,
        name: &str,
        source: &Path,
        description: Option<&str>,
        template_type: Option<&str>,
    ) -> Result<TemplateEntry> {
        validate_name(name)?;

        if !source.exists() {
            return Err(StampError::missing_path(source));
        }
        if !source.is_dir() {
            return Err(StampError::NotADirectory {
                path: source.to_path_buf(),
            });
        }
        if self.contains(name)? {
            return Err(StampError::AlreadyExists {
                name: name.to_string(),
            });
        }

        let source = std::path::absolute(source)
            .with_context(|| format!("Invalid source path {}", source.display()))?;

        // Copy outside the final location first so a failed copy never
        // leaves a half-filled templates/<name>.
        let staging = self
            .templates_dir
            .join(format!(".staging-{}-{}", name, Uuid::new_v4()));
        let staged = self.stage(name, &source, &staging, description, template_type);
        let entry = match staged {
            Ok(entry) => entry,
            Err(e) => {
                remove_quietly(&staging);
                return Err(e);
            }
        };

        let result = self.metadata.update(|metadata| {
            if metadata.templates.contains_key(name) {
                return Err(StampError::AlreadyExists {
                    name: name.to_string(),
                });
            }

            if entry.path.exists() {
                warn!(path = %entry.path.display(), "Removing unregistered leftover directory");
                fs::remove_dir_all(&entry.path)
                    .with_context(|| format!("Failed to remove {}", entry.path.display()))?;
            }
            fs::rename(&staging, &entry.path).with_context(|| {
                format!(
                    "Failed to move {} to {}",
                    staging.display(),
                    entry.path.display()
                )
            })?;

            metadata.templates.insert(name.to_string(), entry.clone());
            Ok(())
        });

        if let Err(e) = result {
            remove_quietly(&staging);
            if !matches!(e, StampError::AlreadyExists { .. }) && !self.contains(name).unwrap_or(true)
            {
                remove_quietly(&entry.path);
            }
            return Err(e);
        }

        info!(name, files = entry.files, size = entry.size, "Registered template");
        Ok(entry)
    }

    /// Copy `source` into `staging` and build the entry it will become.
    fn stage(
        &self,
        name: &str,
        source: &Path,
        staging: &Path,
        description: Option<&str>,
        template_type: Option<&str>,
    ) -> Result<TemplateEntry> {
        copy_tree(source, staging)?;
        let stats = analyze(staging)?;

        let config = match TemplateConfig::load_from_dir(staging) {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                warn!(name, error = %e, "Ignoring unreadable template config");
                TemplateConfig::default()
            }
        };

        let pick = |given: Option<&str>, fallback: &Option<String>| {
            given
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .or_else(|| fallback.clone())
                .unwrap_or_default()
        };

        Ok(TemplateEntry {
            name: name.to_string(),
            path: self.templates_dir.join(name),
            description: pick(description, &config.description),
            source: source.to_path_buf(),
            template_type: pick(template_type, &config.template_type),
            size: stats.size,
            files: stats.files,
            added: Utc::now(),
            variables: config.variable_names(),
        })
    }

    /// Unregister template `name` and delete its copy.
    ///
    /// With `options.backup`, the copy is first duplicated into
    /// `<backup_dir>/<name>-<YYYYmmdd-HHMMSS>/`. Returns the backup path when
    /// one was made.
    ///
    /// The entry is dropped from the metadata before the directory is
    /// deleted, so an interrupted removal leaves at worst an unregistered
    /// directory.
    pub fn remove(&self, name: &str, options: &RemoveOptions) -> Result<Option<PathBuf>> {
        let entry = self.entry(name)?;

        let backup = if options.backup {
            let dir = options
                .backup_dir
                .clone()
                .unwrap_or_else(|| self.backups_dir());
            let dest = backup_destination(&dir, name);
            copy_tree(&entry.path, &dest)?;
            info!(name, backup = %dest.display(), "Backed up template");
            Some(dest)
        } else {
            None
        };

        let removed = self.metadata.update(|metadata| {
            metadata
                .templates
                .remove(name)
                .ok_or_else(|| not_registered(name))
        })?;

        if removed.path.exists() {
            if !removed.path.starts_with(&self.templates_dir) {
                return Err(anyhow!(
                    "Refusing to delete {}: not inside {}",
                    removed.path.display(),
                    self.templates_dir.display()
                )
                .into());
            }
            fs::remove_dir_all(&removed.path)
                .with_context(|| format!("Failed to delete {}", removed.path.display()))?;
        }

        info!(name, "Removed template");
        Ok(backup)
    }
}

/// Check that `name` can be used as a registry key.
pub fn validate_name(name: &str) -> Result<()> {
    if NAME_REGEX.is_match(name) {
        Ok(())
    } else {
        Err(StampError::InvalidName {
            name: name.to_string(),
            reason: "use letters, digits, '.', '-' or '_', not starting with '.'".to_string(),
        })
    }
}

fn not_registered(name: &str) -> StampError {
    StampError::NotFound {
        what: format!("template '{}'", name),
    }
}

/// Timestamped backup directory that does not exist yet.
fn backup_destination(dir: &Path, name: &str) -> PathBuf {
    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    let base = dir.join(format!("{}-{}", name, stamp));
    let mut candidate = base.clone();
    let mut n = 1;
    while candidate.exists() {
        candidate = PathBuf::from(format!("{}-{}", base.display(), n));
        n += 1;
    }
    candidate
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(e) = fs::remove_dir_all(path) {
            warn!(path = %path.display(), error = %e, "Cleanup failed");
        }
    }
}
