//! Extension-based binary file classification.
//!
//! Content is never inspected: a file is binary if and only if its extension
//! is in the table. Binary files are copied byte for byte instead of rendered.

use std::collections::BTreeSet;
use std::path::Path;

/// Extensions treated as binary by default.
pub const DEFAULT_BINARY_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "bmp", "ico", "webp", "tif", "tiff", "psd",
    // archives
    "zip", "tar", "gz", "tgz", "bz2", "xz", "7z", "rar", "jar", "war",
    // fonts
    "ttf", "otf", "woff", "woff2", "eot",
    // executables and libraries
    "exe", "dll", "so", "dylib", "a", "lib", "o", "bin", "class", "wasm",
    // documents and media
    "pdf", "mp3", "mp4", "wav", "ogg", "mov", "avi", "webm",
    // databases
    "db", "sqlite", "sqlite3",
];

/// Decides which files are copied verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryClassifier {
    extensions: BTreeSet<String>,
}

impl Default for BinaryClassifier {
    fn default() -> Self {
        Self::from_extensions(DEFAULT_BINARY_EXTENSIONS.iter().copied())
    }
}

impl BinaryClassifier {
    /// Classifier with an explicit extension table (no defaults).
    pub fn from_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| normalize(e.as_ref()))
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Add an extension to the table.
    pub fn with_extension(mut self, ext: &str) -> Self {
        let ext = normalize(ext);
        if !ext.is_empty() {
            self.extensions.insert(ext);
        }
        self
    }

    /// Remove an extension from the table.
    pub fn without_extension(mut self, ext: &str) -> Self {
        self.extensions.remove(&normalize(ext));
        self
    }

    /// Whether files with this extension are binary. Case-insensitive; a
    /// leading dot is ignored.
    pub fn is_binary(&self, ext: &str) -> bool {
        self.extensions.contains(&normalize(ext))
    }

    /// Whether the file at `path` is binary, judged by its extension.
    pub fn is_binary_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| self.is_binary(e))
    }
}

fn normalize(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}
