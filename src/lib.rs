//! Stamp - project scaffolding from reusable directory templates.
//!
//! A template is a plain directory whose file names and file contents may
//! contain `{{variable}}` placeholders. Templates are registered once into a
//! local registry and then instantiated with different variable values.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`generator`] - Rendering a template tree into an output directory
//! - [`registry`] - Local store of registered templates
//! - [`render`] - Template text rendering
//! - [`template`] - Template config files, binary detection and validation
//! - [`ui`] - Terminal output
//! - [`variables`] - Variable files and command-line overrides
//!
//! # Example
//!
//! ```
//! use stamp::render::{RenderContext, Renderer};
//! use stamp::variables::{merge, parse_assignments, Variables};
//!
//! let mut file_vars = Variables::new();
//! file_vars.insert("env".to_string(), "dev".to_string());
//! let cli_vars = parse_assignments(&["env=prod"]).unwrap();
//!
//! let ctx = RenderContext::from(merge(&file_vars, &cli_vars));
//! let text = Renderer::new().render("deploy to {{ env }}", &ctx).unwrap();
//! assert_eq!(text, "deploy to prod");
//! ```

pub mod cli;
pub mod error;
pub mod generator;
pub mod registry;
pub mod render;
pub mod template;
pub mod ui;
pub mod variables;

pub use error::{Result, StampError};
