//! Template directories.
//!
//! A template is a directory tree, optionally carrying a config file
//! (see [`config`]) at its root. This module holds what the generator and the
//! registry agree on about such trees:
//! - which entries are visible ([`is_skipped_name`], [`walk`])
//! - which files are copied verbatim ([`binary`])
//! - structural checks ([`validate`])

pub mod binary;
pub mod config;
pub mod validate;

pub use binary::BinaryClassifier;
pub use config::{TemplateConfig, VariableSpec, CONFIG_FILE_NAMES};
pub use validate::{validate_template, ValidationReport};

use std::path::Path;
use walkdir::{DirEntry, FilterEntry, IntoIter, WalkDir};

/// Dot-files that are still part of a template.
pub const ALLOWED_DOTFILES: &[&str] = &[".gitignore", ".env.example"];

/// Whether an entry with this base name is left out of templates.
pub fn is_skipped_name(name: &str) -> bool {
    name.starts_with('.') && !ALLOWED_DOTFILES.contains(&name)
}

fn is_visible(entry: &DirEntry) -> bool {
    entry.depth() == 0 || !is_skipped_name(&entry.file_name().to_string_lossy())
}

/// Walk a template tree depth-first in lexical order.
///
/// The root itself is not yielded. Hidden entries are skipped and hidden
/// directories are not descended into.
pub fn walk(root: &Path) -> FilterEntry<IntoIter, fn(&DirEntry) -> bool> {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(is_visible as fn(&DirEntry) -> bool)
}
