//! Template config file.
//!
//! A template may carry `template.toml` (or `.yaml`, `.yml`, `.json`) at its
//! root describing itself and the variables it expects:
//!
//! ```toml
//! name = "rust-cli"
//! description = "A small Rust command-line tool"
//! type = "rust"
//! ignore = ["target/**", "*.log"]
//!
//! [[variables]]
//! name = "name"
//! description = "Crate name"
//! required = true
//!
//! [[variables]]
//! name = "edition"
//! default = "2021"
//! options = ["2018", "2021"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StampError};
use crate::render::RenderContext;

/// Config file names, in lookup order.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    "template.toml",
    "template.yaml",
    "template.yml",
    "template.json",
];

/// Metadata and variable declarations of a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    pub name: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,

    /// Free-form kind (e.g. "rust", "web")
    #[serde(rename = "type")]
    pub template_type: Option<String>,

    /// Declared variables, in declaration order
    pub variables: Vec<VariableSpec>,

    /// Glob patterns (relative to the template root) left out of generation
    pub ignore: Vec<String>,

    pub tags: Vec<String>,
}

/// A variable declared by a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariableSpec {
    pub name: String,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<serde_json::Value>,

    #[serde(rename = "type")]
    pub var_type: Option<String>,

    /// Allowed values, if restricted
    pub options: Vec<String>,
}

impl TemplateConfig {
    /// Find the config file in a template directory.
    pub fn find(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load the config of a template directory, if it has one.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        match Self::find(dir) {
            Some(path) => Self::load(&path).map(Some),
            None => Ok(None),
        }
    }

    /// Load a config file. The format follows the extension.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StampError::missing_path(path)
            } else {
                StampError::Io(e)
            }
        })?;

        let parse_error = |message: String| StampError::ConfigParse {
            path: path.to_path_buf(),
            message,
        };

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let config: Self = match ext.as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            "json" => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
            _ => {
                return Err(StampError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        config.ignore_patterns().map_err(|e| match e {
            StampError::ConfigParse { message, .. } => parse_error(message),
            other => other,
        })?;

        Ok(config)
    }

    /// Names of the declared variables, in declaration order.
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Fill variables missing from `ctx` with their declared defaults.
    pub fn apply_defaults(&self, ctx: &mut RenderContext) {
        for spec in &self.variables {
            if ctx.contains(&spec.name) {
                continue;
            }
            if let Some(default) = &spec.default {
                ctx.insert(spec.name.clone(), default.clone());
            }
        }
    }

    /// Required variables absent from `ctx`.
    pub fn missing_required(&self, ctx: &RenderContext) -> Vec<String> {
        self.variables
            .iter()
            .filter(|spec| spec.required && !ctx.contains(&spec.name))
            .map(|spec| spec.name.clone())
            .collect()
    }

    /// Compile the `ignore` globs.
    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignore
            .iter()
            .map(|raw| {
                Pattern::new(raw).map_err(|e| StampError::ConfigParse {
                    path: PathBuf::from("ignore"),
                    message: format!("invalid ignore pattern '{}': {}", raw, e),
                })
            })
            .collect()
    }
}

/// Whether a template-relative path is matched by any ignore pattern.
///
/// Patterns are tried against the whole relative path (with `/` separators)
/// and against the base name. A directory is also tried with a trailing `/`,
/// so `target/**` drops the `target` directory itself and not just its
/// contents.
pub fn is_ignored(patterns: &[Pattern], relative: &Path, is_dir: bool) -> bool {
    if patterns.is_empty() {
        return false;
    }
    let rel = relative.to_string_lossy().replace('\\', "/");
    let base = relative
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let dir = is_dir.then(|| format!("{}/", rel));

    patterns.iter().any(|p| {
        p.matches(&rel) || p.matches(&base) || dir.as_deref().is_some_and(|d| p.matches(d))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TOML_CONFIG: &str = r#"
name = "rust-cli"
description = "A small CLI"
version = "1.2.0"
author = "Jo"
type = "rust"
ignore = ["target/**", "*.log"]
tags = ["cli", "rust"]

[[variables]]
name = "name"
description = "Crate name"
required = true

[[variables]]
name = "edition"
default = "2021"
options = ["2018", "2021"]

[[variables]]
name = "port"
type = "number"
default = 8080
"#;

    #[test]
    fn parse_toml_config() {
        let config: TemplateConfig = toml::from_str(TOML_CONFIG).unwrap();
        assert_eq!(config.name.as_deref(), Some("rust-cli"));
        assert_eq!(config.template_type.as_deref(), Some("rust"));
        assert_eq!(config.variable_names(), vec!["name", "edition", "port"]);
        assert!(config.variables[0].required);
        assert_eq!(config.variables[1].options.len(), 2);
        assert_eq!(config.variables[2].var_type.as_deref(), Some("number"));
        assert_eq!(config.tags, vec!["cli", "rust"]);
    }

    #[test]
    fn parse_yaml_config() {
        let yaml = r#"
name: web
type: node
variables:
  - name: title
    default: Hello
"#;
        let config: TemplateConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.template_type.as_deref(), Some("node"));
        assert_eq!(
            config.variables[0].default,
            Some(serde_json::Value::from("Hello"))
        );
    }

    #[test]
    fn empty_config_is_default() {
        let config: TemplateConfig = toml::from_str("").unwrap();
        assert_eq!(config, TemplateConfig::default());
    }

    #[test]
    fn apply_defaults_keeps_supplied_values() {
        let config: TemplateConfig = toml::from_str(TOML_CONFIG).unwrap();
        let mut ctx = RenderContext::new().with("edition", "2018");
        config.apply_defaults(&mut ctx);

        assert_eq!(ctx.get("edition"), Some(&serde_json::Value::from("2018")));
        assert_eq!(ctx.get("port"), Some(&serde_json::Value::from(8080)));
        assert!(!ctx.contains("name"));
    }

    #[test]
    fn missing_required_lists_absent() {
        let config: TemplateConfig = toml::from_str(TOML_CONFIG).unwrap();
        let ctx = RenderContext::new();
        assert_eq!(config.missing_required(&ctx), vec!["name"]);

        let ctx = RenderContext::new().with("name", "tool");
        assert!(config.missing_required(&ctx).is_empty());
    }

    #[test]
    fn find_prefers_toml() {
        let temp = TempDir::new().unwrap();
        assert!(TemplateConfig::find(temp.path()).is_none());

        fs::write(temp.path().join("template.yaml"), "name: y").unwrap();
        fs::write(temp.path().join("template.toml"), "name = \"t\"").unwrap();

        let found = TemplateConfig::find(temp.path()).unwrap();
        assert!(found.ends_with("template.toml"));
        let config = TemplateConfig::load_from_dir(temp.path()).unwrap().unwrap();
        assert_eq!(config.name.as_deref(), Some("t"));
    }

    #[test]
    fn load_from_dir_without_config() {
        let temp = TempDir::new().unwrap();
        assert!(TemplateConfig::load_from_dir(temp.path()).unwrap().is_none());
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("template.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            TemplateConfig::load(&path).unwrap_err(),
            StampError::ConfigParse { .. }
        ));
    }

    #[test]
    fn invalid_ignore_pattern_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("template.toml");
        fs::write(&path, "ignore = [\"[\"]").unwrap();
        let err = TemplateConfig::load(&path).unwrap_err();
        match err {
            StampError::ConfigParse { path: p, message } => {
                assert_eq!(p, path);
                assert!(message.contains("invalid ignore pattern"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ignore_matches_path_or_base_name() {
        let config: TemplateConfig = toml::from_str(TOML_CONFIG).unwrap();
        let patterns = config.ignore_patterns().unwrap();

        assert!(is_ignored(&patterns, Path::new("target/debug/app"), false));
        assert!(is_ignored(&patterns, Path::new("logs/run.log"), false));
        assert!(!is_ignored(&patterns, Path::new("src/main.rs"), false));
        assert!(!is_ignored(&[], Path::new("anything"), true));
    }

    #[test]
    fn recursive_pattern_matches_its_directory() {
        let patterns = vec![Pattern::new("target/**").unwrap()];

        assert!(is_ignored(&patterns, Path::new("target"), true));
        assert!(!is_ignored(&patterns, Path::new("target"), false));
        assert!(!is_ignored(&patterns, Path::new("src"), true));
        assert!(!is_ignored(&patterns, Path::new("src/target"), true));
    }
}
