//! New command implementation.
//!
//! The `stamp new` command generates a project from a registered template or
//! a template directory.

use std::path::{Path, PathBuf};

use crate::cli::args::NewArgs;
use crate::error::{Result, StampError};
use crate::generator::{GenerateOptions, Generator};
use crate::registry::{validate_name, Registry};
use crate::render::RenderContext;
use crate::template::TemplateConfig;
use crate::ui::UserInterface;
use crate::variables::{self, Variables};

use super::dispatcher::{Command, CommandResult};

/// The new command implementation.
pub struct NewCommand {
    registry: Registry,
    args: NewArgs,
}

impl NewCommand {
    /// Create a new `new` command.
    pub fn new(registry: Registry, args: NewArgs) -> Self {
        Self { registry, args }
    }

    /// Find the template directory and the name used for the default output.
    ///
    /// Registered names win over paths with the same spelling.
    pub fn resolve_template(&self) -> Result<(String, PathBuf)> {
        let template = &self.args.template;

        if validate_name(template).is_ok() && self.registry.contains(template)? {
            let entry = self.registry.entry(template)?;
            return Ok((entry.name, entry.path));
        }

        let path = PathBuf::from(template);
        if path.is_dir() {
            let name = std::path::absolute(&path)
                .ok()
                .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                .unwrap_or_else(|| template.clone());
            return Ok((name, path));
        }

        Err(StampError::NotFound {
            what: format!(
                "template '{}' (not registered and not a directory)",
                template
            ),
        })
    }

    /// Merge variable file and `--var` values, then apply the template's
    /// declared defaults.
    pub fn build_context(&self, template_dir: &Path) -> Result<RenderContext> {
        let file_vars = match &self.args.var_file {
            Some(path) => variables::load(path)?,
            None => Variables::new(),
        };
        let cli_vars = variables::parse_assignments(&self.args.vars)?;
        let mut ctx = RenderContext::from(variables::merge(&file_vars, &cli_vars));

        if let Some(config) = TemplateConfig::load_from_dir(template_dir)? {
            config.apply_defaults(&mut ctx);
            let missing = config.missing_required(&ctx);
            if !missing.is_empty() {
                return Err(StampError::MissingVariables { names: missing });
            }
        }

        Ok(ctx)
    }
}

impl Command for NewCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (name, template_dir) = self.resolve_template()?;
        let ctx = self.build_context(&template_dir)?;
        let output = self
            .args
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&name));

        if ui.output_mode().shows_details() {
            ui.message(&format!("Template: {}", template_dir.display()));
            for (key, value) in ctx.iter() {
                let shown = value
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string());
                ui.message(&format!("  {} = {}", key, shown));
            }
        }

        let dry_run = self.args.dry_run;
        if !dry_run && output.is_dir() && output.read_dir()?.next().is_some() {
            ui.warning(&format!(
                "{} is not empty; existing files may be overwritten",
                output.display()
            ));
        }

        let generator = Generator::new(GenerateOptions {
            dry_run,
            ..Default::default()
        });
        let report = generator.generate(&template_dir, &output, &ctx)?;

        for planned in report.actions() {
            let shown = planned
                .destination
                .strip_prefix(&output)
                .unwrap_or(&planned.destination);
            ui.show_action(&planned.action.to_string(), &shown.display().to_string());
        }

        if dry_run {
            ui.success(&format!(
                "Dry run: would create {} files and {} directories in {}",
                report.file_count(),
                report.dir_count(),
                output.display()
            ));
        } else {
            ui.success(&format!(
                "Generated {} from '{}' ({} files)",
                output.display(),
                name,
                report.file_count()
            ));
            ui.show_hint(&format!("cd {}", output.display()));
        }

        Ok(CommandResult::success())
    }
}
