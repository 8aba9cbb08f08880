//! Structural checks over a template directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use super::{walk, BinaryClassifier, TemplateConfig};
use crate::error::{Result, StampError};
use crate::render;

/// Outcome of [`validate_template`].
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// Number of template files found (directories excluded)
    pub files: usize,
    /// Parsed config file, if the template has one
    pub config: Option<TemplateConfig>,
    /// Problems that make the template unusable
    pub errors: Vec<String>,
    /// Files whose contents could not be checked
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the template passed every check.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check that `dir` is a usable template.
///
/// - it has at least one file
/// - its config file, if any, parses
/// - every text file parses as a template
///
/// Only a missing or non-directory `dir` is returned as `Err`; everything else
/// is collected in the report.
pub fn validate_template(dir: &Path) -> Result<ValidationReport> {
    if !dir.exists() {
        return Err(StampError::missing_path(dir));
    }
    if !dir.is_dir() {
        return Err(StampError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut report = ValidationReport::default();

    match TemplateConfig::load_from_dir(dir) {
        Ok(config) => report.config = config,
        Err(e) => report.errors.push(e.to_string()),
    }

    let classifier = BinaryClassifier::default();
    let mut text_files: Vec<PathBuf> = Vec::new();

    for entry in walk(dir) {
        let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        report.files += 1;
        if !classifier.is_binary_path(entry.path()) {
            text_files.push(entry.into_path());
        }
    }

    if report.files == 0 {
        report.errors.push("template contains no files".to_string());
    }

    for path in text_files {
        let relative = path.strip_prefix(dir).unwrap_or(&path).display().to_string();

        if let Err(e) = render::check_syntax(&relative) {
            report.errors.push(format!("path {}: {}", relative, e));
        }

        match fs::read_to_string(&path) {
            Ok(text) => {
                if let Err(e) = render::check_syntax(&text) {
                    report.errors.push(format!("{}: {}", relative, e));
                }
            }
            Err(e) => report
                .warnings
                .push(format!("{}: not readable as text ({})", relative, e)),
        }
    }

    tracing::debug!(
        path = %dir.display(),
        files = report.files,
        errors = report.errors.len(),
        "Validated template"
    );

    Ok(report)
}
