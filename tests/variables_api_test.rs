//! Integration tests for the variable resolution public API.

use stamp::variables::{load, merge, parse_assignments, Variables};
use stamp::StampError;
use std::fs;
use tempfile::TempDir;

#[test]
fn cli_override_wins_over_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("base.toml");
    fs::write(&path, "env = \"dev\"\nregion = \"eu\"\n").unwrap();

    let file_vars = load(&path).unwrap();
    let cli_vars = parse_assignments(&["env=prod"]).unwrap();
    let merged = merge(&file_vars, &cli_vars);

    assert_eq!(merged["env"], "prod");
    assert_eq!(merged["region"], "eu");
    assert_eq!(file_vars["env"], "dev");
}

#[test]
fn merge_is_union() {
    let file_vars: Variables = [("a", "1"), ("b", "2")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let cli_vars: Variables = [("b", "x"), ("c", "3")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let merged = merge(&file_vars, &cli_vars);
    assert_eq!(merged.len(), 3);
    assert_eq!(merged["a"], "1");
    assert_eq!(merged["b"], "x");
    assert_eq!(merged["c"], "3");
}

#[test]
fn loads_every_format() {
    let temp = TempDir::new().unwrap();
    let toml = temp.path().join("v.toml");
    let yaml = temp.path().join("v.yml");
    let json = temp.path().join("v.json");
    fs::write(&toml, "name = \"a\"\nport = 8080\n").unwrap();
    fs::write(&yaml, "name: a\nport: 8080\n").unwrap();
    fs::write(&json, r#"{"name": "a", "port": 8080}"#).unwrap();

    for path in [toml, yaml, json] {
        let vars = load(&path).unwrap();
        assert_eq!(vars["name"], "a", "{}", path.display());
        assert_eq!(vars["port"], "8080", "{}", path.display());
    }
}

#[test]
fn template_style_defaults_are_read() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("template.yaml");
    fs::write(
        &path,
        "variables:\n  name:\n    default: demo\n  license: MIT\n",
    )
    .unwrap();

    let vars = load(&path).unwrap();
    assert_eq!(vars["name"], "demo");
    assert_eq!(vars["license"], "MIT");
}

#[test]
fn unsupported_and_missing_files() {
    let temp = TempDir::new().unwrap();
    let ini = temp.path().join("vars.ini");
    fs::write(&ini, "a=b").unwrap();

    assert!(matches!(
        load(&ini).unwrap_err(),
        StampError::UnsupportedFormat { .. }
    ));
    assert!(load(&temp.path().join("none.toml")).unwrap_err().is_not_found());
}

#[test]
fn malformed_file_is_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.json");
    fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        load(&path).unwrap_err(),
        StampError::ConfigParse { .. }
    ));
}
