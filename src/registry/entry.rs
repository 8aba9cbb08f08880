//! Registry entry schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A registered template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateEntry {
    /// Unique registry key
    pub name: String,

    /// Registry-owned copy of the template (always under `templates/`)
    pub path: PathBuf,

    #[serde(default)]
    pub description: String,

    /// Directory the template was registered from
    pub source: PathBuf,

    #[serde(rename = "type", default)]
    pub template_type: String,

    /// Total bytes of all files
    pub size: u64,

    /// Number of files
    pub files: u64,

    /// When the template was registered
    pub added: DateTime<Utc>,

    /// Variable names declared by the template config
    #[serde(default)]
    pub variables: Vec<String>,
}

impl TemplateEntry {
    /// Whether `needle` occurs (case-insensitively) in the name, description
    /// or type.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
            || self.template_type.to_lowercase().contains(&needle)
    }
}
