//! Validate command implementation.
//!
//! The `stamp validate` command checks that a directory is a usable template.

use crate::cli::args::ValidateArgs;
use crate::error::Result;
use crate::template::validate_template;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The validate command implementation.
pub struct ValidateCommand {
    args: ValidateArgs,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(args: ValidateArgs) -> Self {
        Self { args }
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let path = &self.args.path;
        let report = validate_template(path)?;

        if ui.output_mode().shows_details() {
            if let Some(config) = &report.config {
                if let Some(name) = &config.name {
                    ui.message(&format!("Name: {}", name));
                }
                if !config.variables.is_empty() {
                    ui.message(&format!("Variables: {}", config.variable_names().join(", ")));
                }
            }
        }

        for warning in &report.warnings {
            ui.warning(warning);
        }

        if report.is_valid() {
            ui.success(&format!(
                "{} is a valid template ({} files)",
                path.display(),
                report.files
            ));
            Ok(CommandResult::success())
        } else {
            for error in &report.errors {
                ui.error(error);
            }
            ui.error(&format!(
                "{} has {} problem(s)",
                path.display(),
                report.errors.len()
            ));
            Ok(CommandResult::failure(1))
        }
    }
}
