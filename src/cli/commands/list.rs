//! List command implementation.
//!
//! The `stamp list` command shows registered templates as a table, JSON or
//! YAML.

use anyhow::Context;

use crate::cli::args::{ListArgs, ListFormat, SortKey};
use crate::error::Result;
use crate::registry::{Registry, TemplateEntry};
use crate::ui::{format_size, Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    registry: Registry,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(registry: Registry, args: ListArgs) -> Self {
        Self { registry, args }
    }

    /// Registry entries after filtering and sorting.
    pub fn entries(&self) -> Result<Vec<TemplateEntry>> {
        let mut entries = self.registry.list()?;

        if let Some(filter) = &self.args.filter {
            entries.retain(|e| e.matches(filter));
        }

        // Stable sort over a name-ordered list keeps ties in name order.
        match self.args.sort {
            SortKey::Name => {}
            SortKey::Added => entries.sort_by_key(|e| e.added),
            SortKey::Size => entries.sort_by_key(|e| e.size),
            SortKey::Files => entries.sort_by_key(|e| e.files),
        }
        if self.args.reverse {
            entries.reverse();
        }

        Ok(entries)
    }
}

fn render_table(entries: &[TemplateEntry]) -> String {
    let mut table = Table::new(&["Name", "Type", "Files", "Size", "Added", "Description"])
        .align_right(2)
        .align_right(3);

    for entry in entries {
        table.add_row(&[
            entry.name.clone(),
            entry.template_type.clone(),
            entry.files.to_string(),
            format_size(entry.size),
            entry.added.format("%Y-%m-%d").to_string(),
            entry.description.clone(),
        ]);
    }

    table.render()
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let entries = self.entries()?;

        match self.args.format {
            ListFormat::Json => {
                let json = serde_json::to_string_pretty(&entries)
                    .context("Failed to serialize templates as JSON")?;
                ui.output(&json);
            }
            ListFormat::Yaml => {
                let yaml = serde_yaml::to_string(&entries)
                    .context("Failed to serialize templates as YAML")?;
                ui.output(yaml.trim_end());
            }
            ListFormat::Table => {
                if entries.is_empty() {
                    if self.args.filter.is_some() {
                        ui.message("No templates match the filter");
                    } else {
                        ui.message("No templates registered");
                        ui.show_hint("stamp register <name> <path>");
                    }
                } else {
                    ui.output(&render_table(&entries));
                }
            }
        }

        Ok(CommandResult::success())
    }
}
