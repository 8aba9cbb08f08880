//! Variable file loading.
//!
//! Variable files are TOML, YAML or JSON documents, either flat
//! (`key = "value"`) or wrapped in a top-level `variables` table.
//!
//! ```toml
//! [variables]
//! name = "api"
//! port = { default = "8080", description = "listen port" }
//! ```

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::Variables;
use crate::error::{Result, StampError};

/// Top-level keys the flat TOML fallback never treats as variables.
const RESERVED_TOML_KEYS: &[&str] = &["template", "variables"];

/// Supported variable file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableFormat {
    Toml,
    Yaml,
    Json,
}

impl VariableFormat {
    /// Pick a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Load variables from a TOML, YAML or JSON file.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for any other extension, `NotFound` if the file
/// is missing and `ConfigParse` if the document is malformed.
pub fn load(path: &Path) -> Result<Variables> {
    let format = VariableFormat::from_path(path).ok_or_else(|| StampError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StampError::missing_path(path)
        } else {
            StampError::Io(e)
        }
    })?;

    let vars = parse(&content, format, path)?;
    tracing::debug!(path = %path.display(), count = vars.len(), "Loaded variable file");
    Ok(vars)
}

/// Parse variable file content.
///
/// `source_path` is only used for error reporting.
pub fn parse(content: &str, format: VariableFormat, source_path: &Path) -> Result<Variables> {
    let parse_error = |message: String| StampError::ConfigParse {
        path: source_path.to_path_buf(),
        message,
    };

    match format {
        VariableFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            Ok(from_toml(&table))
        }
        VariableFormat::Yaml => {
            let doc: Value =
                serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            from_document(doc).map_err(parse_error)
        }
        VariableFormat::Json => {
            let doc: Value = serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            from_document(doc).map_err(parse_error)
        }
    }
}

/// Extract variables from a TOML document.
///
/// A template-style `variables` table is tried first. When it yields nothing
/// the whole document is read as a flat table, minus the reserved keys.
fn from_toml(table: &toml::Table) -> Variables {
    let mut vars = Variables::new();

    if let Some(toml::Value::Table(declared)) = table.get("variables") {
        for (key, value) in declared {
            match value {
                toml::Value::String(s) => {
                    vars.insert(key.clone(), s.clone());
                }
                toml::Value::Table(spec) => {
                    if let Some(default) = spec.get("default") {
                        vars.insert(key.clone(), stringify_toml(default));
                    }
                }
                _ => {}
            }
        }
    }

    if !vars.is_empty() {
        return vars;
    }

    for (key, value) in table {
        if RESERVED_TOML_KEYS.contains(&key.as_str()) {
            continue;
        }
        vars.insert(key.clone(), stringify_toml(value));
    }

    vars
}

fn stringify_toml(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        other => serde_json::to_value(other)
            .map(|v| v.to_string())
            .unwrap_or_default(),
    }
}

/// Extract variables from a YAML or JSON document.
fn from_document(doc: Value) -> std::result::Result<Variables, String> {
    let mut root = match doc {
        Value::Null => return Ok(Variables::new()),
        Value::Object(map) => map,
        other => {
            return Err(format!(
                "expected a mapping of variables, found {}",
                kind_of(&other)
            ))
        }
    };

    let map = match root.remove("variables") {
        Some(Value::Object(wrapped)) => wrapped,
        Some(other) => {
            root.insert("variables".to_string(), other);
            root
        }
        None => root,
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(mut spec) if spec.contains_key("default") => {
                    spec.remove("default").unwrap_or(Value::Null)
                }
                other => other,
            };
            (key, stringify(&value))
        })
        .collect())
}

/// Format a value the way it should appear in rendered output.
pub(crate) fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
