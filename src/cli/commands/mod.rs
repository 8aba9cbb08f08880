//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which opens the
//! registry once and routes CLI subcommands to their implementations.

pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod new;
pub mod register;
pub mod remove;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
