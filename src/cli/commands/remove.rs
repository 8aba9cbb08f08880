//! Remove command implementation.
//!
//! The `stamp remove` command (aliases `rm`, `delete`) unregisters a template
//! and deletes the registry's copy, optionally backing it up first.

use crate::cli::args::RemoveArgs;
use crate::error::Result;
use crate::registry::{Registry, RemoveOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The remove command implementation.
pub struct RemoveCommand {
    registry: Registry,
    args: RemoveArgs,
}

impl RemoveCommand {
    /// Create a new remove command.
    pub fn new(registry: Registry, args: RemoveArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for RemoveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let options = RemoveOptions {
            backup: self.args.backup,
            backup_dir: self.args.backup_dir.clone(),
        };

        let backup = self.registry.remove(&self.args.name, &options)?;

        if let Some(path) = backup {
            ui.message(&format!("Backup saved to {}", path.display()));
        }
        ui.success(&format!("Removed template '{}'", self.args.name));

        Ok(CommandResult::success())
    }
}
