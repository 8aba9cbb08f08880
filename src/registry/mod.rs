//! Local template registry.
//!
//! Registering a template copies its directory into a registry-owned location
//! and records it in a metadata file, so later generation does not depend on
//! the original source staying around.
//!
//! # Example
//!
//! ```no_run
//! use stamp::registry::{Registry, RemoveOptions};
//! use std::path::Path;
//!
//! let registry = Registry::new().unwrap();
//! registry
//!     .add("rust-cli", Path::new("./templates/rust-cli"), None, None)
//!     .unwrap();
//!
//! for entry in registry.list().unwrap() {
//!     println!("{} ({} files)", entry.name, entry.files);
//! }
//!
//! registry.remove("rust-cli", &RemoveOptions::default()).unwrap();
//! ```

pub mod entry;
pub mod local;
pub mod metadata;
pub mod storage;

pub use entry::TemplateEntry;
pub use local::{validate_name, Registry, RemoveOptions, HOME_ENV};
pub use metadata::{MetadataStore, RegistryMetadata};
pub use storage::TreeStats;
