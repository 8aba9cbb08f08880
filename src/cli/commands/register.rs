//! Register command implementation.
//!
//! The `stamp register` command (alias `add`) copies a template directory into
//! the registry.

use crate::cli::args::RegisterArgs;
use crate::error::{Result, StampError};
use crate::registry::storage::analyze;
use crate::registry::{validate_name, Registry, RemoveOptions};
use crate::template::validate_template;
use crate::ui::{format_size, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The register command implementation.
pub struct RegisterCommand {
    registry: Registry,
    args: RegisterArgs,
}

impl RegisterCommand {
    /// Create a new register command.
    pub fn new(registry: Registry, args: RegisterArgs) -> Self {
        Self { registry, args }
    }

    fn check_source(&self) -> Result<()> {
        let path = &self.args.path;
        if !path.exists() {
            return Err(StampError::missing_path(path));
        }
        if !path.is_dir() {
            return Err(StampError::NotADirectory { path: path.clone() });
        }
        Ok(())
    }
}

impl Command for RegisterCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let args = &self.args;
        validate_name(&args.name)?;
        self.check_source()?;

        if args.validate {
            let report = validate_template(&args.path)?;
            for warning in &report.warnings {
                ui.warning(warning);
            }
            if !report.is_valid() {
                for error in &report.errors {
                    ui.error(error);
                }
                ui.error(&format!("{} is not a valid template", args.path.display()));
                return Ok(CommandResult::failure(1));
            }
        }

        let exists = self.registry.contains(&args.name)?;
        if exists && !args.force {
            return Err(StampError::AlreadyExists {
                name: args.name.clone(),
            });
        }

        if args.dry_run {
            let stats = analyze(&args.path)?;
            if exists {
                ui.message(&format!("Would replace template '{}'", args.name));
            }
            ui.success(&format!(
                "Dry run: would register '{}' from {} ({} files, {})",
                args.name,
                args.path.display(),
                stats.files,
                format_size(stats.size)
            ));
            return Ok(CommandResult::success());
        }

        if exists {
            self.registry.remove(&args.name, &RemoveOptions::default())?;
            ui.message(&format!("Replacing template '{}'", args.name));
        }

        let entry = self.registry.add(
            &args.name,
            &args.path,
            args.description.as_deref(),
            args.template_type.as_deref(),
        )?;

        ui.success(&format!(
            "Registered '{}' ({} files, {})",
            entry.name,
            entry.files,
            format_size(entry.size)
        ));
        if ui.output_mode().shows_details() {
            ui.message(&format!("  Stored at {}", entry.path.display()));
            if !entry.variables.is_empty() {
                ui.message(&format!("  Variables: {}", entry.variables.join(", ")));
            }
        }
        ui.show_hint(&format!("stamp new {} <output>", entry.name));

        Ok(CommandResult::success())
    }
}
