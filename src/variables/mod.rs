//! Variable resolution.
//!
//! Variables come from two places:
//! - variable files passed with `--var-file` ([`loader`])
//! - `--var key=value` arguments ([`merge::parse_assignments`])
//!
//! The two are combined with [`merge`], command-line values winning.
//!
//! # Example
//!
//! ```
//! use stamp::variables::{merge, parse_assignments, Variables};
//!
//! let mut file_vars = Variables::new();
//! file_vars.insert("env".to_string(), "dev".to_string());
//!
//! let cli_vars = parse_assignments(&["env=prod"]).unwrap();
//! assert_eq!(merge(&file_vars, &cli_vars)["env"], "prod");
//! ```

pub mod loader;
pub mod merge;

use std::collections::BTreeMap;

pub use loader::{load, parse, VariableFormat};
pub use merge::{merge, parse_assignment, parse_assignments};

/// Resolved variables, ordered by name.
pub type Variables = BTreeMap<String, String>;
