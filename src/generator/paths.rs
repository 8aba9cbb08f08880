//! Keeping rendered destinations inside the output directory.
//!
//! A rendered relative path is normalized lexically. It is rejected when it
//! is absolute or when a `..` would climb above the output root; it is never
//! clamped back inside.
//!
//! The output root itself must not be the template root or lie inside it.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use anyhow::Context;

use crate::error::{Result, StampError};

/// Normalize `rendered` into a path relative to `root`.
///
/// # Errors
///
/// Returns `PathEscape` for absolute paths, drive prefixes, and `..` segments
/// that leave `root`.
pub fn contained_relative(rendered: &str, root: &Path) -> Result<PathBuf> {
    let escape = || StampError::PathEscape {
        rendered: rendered.to_string(),
        root: root.to_path_buf(),
    };

    let mut normalized = PathBuf::new();
    for component in Path::new(rendered).components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return Err(escape());
                }
            }
            Component::RootDir | Component::Prefix(_) => return Err(escape()),
        }
    }

    Ok(normalized)
}

/// Reject an `output_root` equal to or nested in `template_root`.
///
/// Both sides are resolved through [`resolve`], so `.`, `..` and symlinked
/// ancestors compare equal to the directory they name.
pub fn ensure_outside(template_root: &Path, output_root: &Path) -> Result<()> {
    let template = resolve(template_root)?;
    let output = resolve(output_root)?;

    if output.starts_with(&template) {
        return Err(StampError::OutputInsideTemplate {
            output: output_root.to_path_buf(),
            template: template_root.to_path_buf(),
        });
    }
    Ok(())
}

/// Absolute form of `path` with symlinks resolved.
///
/// The path does not have to exist: the deepest existing ancestor is
/// canonicalized and the missing tail is appended to it.
pub fn resolve(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;
    let absolute = normalize(&absolute);

    let mut existing = absolute.as_path();
    let mut tail: Vec<OsString> = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut resolved = canonical;
            resolved.extend(tail.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                tail.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

/// Drop `.` and fold `..` in an absolute path.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Template-relative path as template text, always using `/`.
///
/// Backslash separators would otherwise read as template escapes.
pub fn template_text(relative: &Path) -> String {
    let text = relative.to_string_lossy();
    if MAIN_SEPARATOR == '\\' {
        text.replace('\\', "/")
    } else {
        text.into_owned()
    }
}
