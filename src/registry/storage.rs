//! Copying and measuring template trees.

use std::fs;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;
use crate::template;

/// Size and file count of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub size: u64,
    pub files: u64,
}

/// Copy the visible entries of `src` into `dest`.
///
/// Hidden entries are left behind, except the allowed dot-files. `dest` is
/// created if needed.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {}", dest.display()))?;

    for entry in template::walk(src) {
        let entry = entry.with_context(|| format!("Failed to walk {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} is outside {}", entry.path().display(), src.display()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else if entry.file_type().is_file() {
            fs::copy(entry.path(), &target).with_context(|| {
                format!(
                    "Failed to copy {} to {}",
                    entry.path().display(),
                    target.display()
                )
            })?;
        } else {
            tracing::warn!(path = %entry.path().display(), "Skipping symlink");
        }
    }

    Ok(())
}

/// Count files and total bytes under `dir`.
pub fn analyze(dir: &Path) -> Result<TreeStats> {
    let mut stats = TreeStats::default();

    for entry in template::walk(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if entry.file_type().is_file() {
            let metadata = entry
                .metadata()
                .with_context(|| format!("Failed to stat {}", entry.path().display()))?;
            stats.files += 1;
            stats.size += metadata.len();
        }
    }

    Ok(stats)
}
