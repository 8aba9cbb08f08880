//! Merging file variables with command-line overrides.
//!
//! # Merge Rules
//!
//! - The result holds every key from both inputs
//! - A key present in both takes the command-line value
//! - Neither input is modified

use super::Variables;
use crate::error::{Result, StampError};

/// Merge file variables with command-line variables (command line wins).
pub fn merge(file_vars: &Variables, cli_vars: &Variables) -> Variables {
    let mut merged = file_vars.clone();
    for (key, value) in cli_vars {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Parse a single `key=value` assignment.
///
/// Splits on the first `=`, so values may contain `=`. The key is trimmed and
/// must not be empty; the value is kept verbatim.
pub fn parse_assignment(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| StampError::InvalidAssignment {
            input: input.to_string(),
        })?;

    let key = key.trim();
    if key.is_empty() {
        return Err(StampError::InvalidAssignment {
            input: input.to_string(),
        });
    }

    Ok((key.to_string(), value.to_string()))
}

/// Parse repeated `--var key=value` arguments. Later assignments win.
pub fn parse_assignments<S: AsRef<str>>(inputs: &[S]) -> Result<Variables> {
    inputs
        .iter()
        .map(|s| parse_assignment(s.as_ref()))
        .collect()
}
