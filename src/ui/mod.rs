//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for styled output on a terminal
//! - [`NonInteractiveUI`] for pipes, CI and other headless use
//! - [`MockUI`] for capturing output in tests
//! - [`Table`] for `stamp list`
//!
//! # Example
//!
//! ```
//! use stamp::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.success("Generated 3 files");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod table;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::{format_size, OutputMode};
pub use table::{Align, Table};
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, StampTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Display a follow-up hint (e.g. the command to run next).
    fn show_hint(&mut self, hint: &str);

    /// Display one planned file action.
    fn show_action(&mut self, action: &str, path: &str);

    /// Write requested data (JSON, YAML, tables) to stdout regardless of mode.
    fn output(&mut self, text: &str);

    /// Check if running on an interactive terminal.
    fn is_interactive(&self) -> bool;
}
