//! What a generation run did (or, in dry-run mode, would do).

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Kind of filesystem action for one destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Directory created from a template directory.
    CreateDir,

    /// File written from a rendered template file.
    RenderFile,

    /// File copied byte for byte (binary by extension).
    CopyFile,
}

impl Action {
    /// Whether this action produces a file.
    pub fn is_file(&self) -> bool {
        matches!(self, Action::RenderFile | Action::CopyFile)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Action::CreateDir => "create",
            Action::RenderFile => "render",
            Action::CopyFile => "copy",
        };
        write!(f, "{}", s)
    }
}

/// One destination and what happens to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAction {
    pub destination: PathBuf,
    pub action: Action,
}

/// Ordered list of actions of a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    dry_run: bool,
    actions: Vec<PlannedAction>,
}

impl GenerationReport {
    /// Create an empty report.
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            actions: Vec::new(),
        }
    }

    /// Record an action.
    pub fn push(&mut self, destination: impl Into<PathBuf>, action: Action) {
        self.actions.push(PlannedAction {
            destination: destination.into(),
            action,
        });
    }

    /// Whether nothing was written.
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Actions in walk order.
    pub fn actions(&self) -> &[PlannedAction] {
        &self.actions
    }

    /// Every destination path.
    pub fn destinations(&self) -> BTreeSet<PathBuf> {
        self.actions.iter().map(|a| a.destination.clone()).collect()
    }

    /// Number of files rendered or copied.
    pub fn file_count(&self) -> usize {
        self.actions.iter().filter(|a| a.action.is_file()).count()
    }

    /// Number of directories.
    pub fn dir_count(&self) -> usize {
        self.actions.len() - self.file_count()
    }

    /// Whether an action targets `path`.
    pub fn contains(&self, path: &Path) -> bool {
        self.actions.iter().any(|a| a.destination == path)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
