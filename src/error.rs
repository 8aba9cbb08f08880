//! Error types for stamp operations.
//!
//! This module defines [`StampError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `StampError` for conditions callers may want to match on
//! - Wrap filesystem failures with `anyhow::Context` naming the path, and
//!   surface them through `StampError::Other`
//! - Every error aborts the current top-level operation; nothing is retried

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stamp operations.
#[derive(Debug, Error)]
pub enum StampError {
    /// A file, directory or registry entry does not exist.
    #[error("Not found: {what}")]
    NotFound { what: String },

    /// A template source path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// A template with this name is already registered.
    #[error("Template '{name}' already exists (remove it first or use --force)")]
    AlreadyExists { name: String },

    /// A template name that cannot be used as a registry key.
    #[error("Invalid template name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    /// Template text could not be parsed.
    #[error("Template syntax error in {origin}: {message}")]
    TemplateSyntax { origin: String, message: String },

    /// Template text parsed but failed while rendering.
    #[error("Failed to render {origin}: {message}")]
    Render { origin: String, message: String },

    /// A variable file with an extension we do not read.
    #[error("Unsupported variable file format: {path} (expected .toml, .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// Failed to parse a structured file (variables, template config, metadata).
    #[error("Failed to parse {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A rendered destination would land outside the output directory.
    #[error("Rendered path '{rendered}' escapes the output directory {root}")]
    PathEscape { rendered: String, root: PathBuf },

    /// The output directory is the template directory or lies inside it.
    #[error("Output directory {output} is inside the template {template}")]
    OutputInsideTemplate { output: PathBuf, template: PathBuf },

    /// Required template variables were not supplied.
    #[error("Missing required variables: {}", names.join(", "))]
    MissingVariables { names: Vec<String> },

    /// A `--var` argument that is not `key=value`.
    #[error("Invalid variable assignment '{input}' (expected key=value)")]
    InvalidAssignment { input: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StampError {
    /// Shorthand for a [`StampError::NotFound`] naming a path.
    pub fn missing_path(path: &std::path::Path) -> Self {
        Self::NotFound {
            what: path.display().to_string(),
        }
    }

    /// Whether this error reports something that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for stamp operations.
pub type Result<T> = std::result::Result<T, StampError>;
