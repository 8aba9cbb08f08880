//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

/// Stamp - scaffold projects from reusable directory templates.
#[derive(Debug, Parser)]
#[command(name = "stamp")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Registry directory (overrides the platform data directory)
    #[arg(long, global = true, env = "STAMP_HOME", value_name = "DIR")]
    pub registry: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a project from a template
    New(NewArgs),

    /// Register a template directory
    #[command(visible_alias = "add")]
    Register(RegisterArgs),

    /// Remove a registered template
    #[command(visible_aliases = ["rm", "delete"])]
    Remove(RemoveArgs),

    /// List registered templates
    List(ListArgs),

    /// Check that a directory is a usable template
    Validate(ValidateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct NewArgs {
    /// Registered template name or path to a template directory
    pub template: String,

    /// Output directory (defaults to ./<template name>)
    pub output: Option<PathBuf>,

    /// Set a variable (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE")]
    pub vars: Vec<String>,

    /// Load variables from a TOML, YAML or JSON file
    #[arg(long, value_name = "FILE")]
    pub var_file: Option<PathBuf>,

    /// Show what would be generated without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `register` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RegisterArgs {
    /// Name to register the template under
    pub name: String,

    /// Template directory
    pub path: PathBuf,

    /// Description (defaults to the template config's)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Template type, e.g. rust or node (defaults to the template config's)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub template_type: Option<String>,

    /// Replace an existing template with the same name
    #[arg(short, long)]
    pub force: bool,

    /// Validate the template before registering
    #[arg(long)]
    pub validate: bool,

    /// Show what would be registered without changing the registry
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `remove` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RemoveArgs {
    /// Template name
    pub name: String,

    /// Remove without asking (there is no prompt; accepted for scripts)
    #[arg(short, long)]
    pub force: bool,

    /// Copy the template to the backup directory before removing it
    #[arg(short, long)]
    pub backup: bool,

    /// Backup directory (defaults to <registry>/backups)
    #[arg(long, value_name = "DIR", requires = "backup")]
    pub backup_dir: Option<PathBuf>,
}

/// Output format of `list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// Sort key of `list`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SortKey {
    #[default]
    Name,
    Added,
    Size,
    Files,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,

    /// Only show templates whose name, description or type contains this
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort by
    #[arg(long, value_enum, default_value_t = SortKey::Name)]
    pub sort: SortKey,

    /// Reverse the sort order
    #[arg(short, long)]
    pub reverse: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Template directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
