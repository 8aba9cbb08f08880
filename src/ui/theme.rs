//! Visual theme and styling.

use console::Style;

/// Stamp's visual theme.
#[derive(Debug, Clone)]
pub struct StampTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (orange).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for action labels such as `render` or `copy` (cyan).
    pub action: Style,
    /// Style for contextual hints (cyan dim).
    pub hint: Style,
}

impl Default for StampTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl StampTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            action: Style::new().cyan(),
            hint: Style::new().cyan().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            action: Style::new(),
            hint: Style::new(),
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in orange).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format one planned file action, e.g. `  render  src/main.rs`.
    pub fn format_action(&self, action: &str, path: &str) -> String {
        format!("  {} {}", self.action.apply_to(format!("{:>6}", action)), path)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let msg = StampTheme::plain().format_success("Complete");
        assert_eq!(msg, "✓ Complete");
    }

    #[test]
    fn theme_formats_warning() {
        let msg = StampTheme::plain().format_warning("Caution");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Caution"));
    }

    #[test]
    fn theme_formats_error() {
        let msg = StampTheme::plain().format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn theme_aligns_actions() {
        let theme = StampTheme::plain();
        assert_eq!(theme.format_action("copy", "logo.png"), "    copy logo.png");
        assert_eq!(theme.format_action("render", "a.txt"), "  render a.txt");
    }

    #[test]
    fn default_impl_matches_new() {
        assert_eq!(
            StampTheme::default().format_success("test"),
            StampTheme::new().format_success("test")
        );
    }
}
