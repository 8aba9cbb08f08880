//! Template rendering.
//!
//! Templates use handlebars syntax. Both `{{name}}` and `{{ name }}` are
//! accepted, and the renderer is lenient: a variable missing from the
//! [`RenderContext`] renders as the empty string.
//!
//! Rendering is a single substitution pass. A value that itself looks like a
//! template is inserted literally:
//!
//! ```
//! use stamp::render::{RenderContext, Renderer};
//!
//! let renderer = Renderer::new();
//! let ctx = RenderContext::new().with("x", "{{y}}");
//! assert_eq!(renderer.render("{{x}}", &ctx).unwrap(), "{{y}}");
//! ```

pub mod context;
pub mod helpers;

pub use context::RenderContext;

use handlebars::{Handlebars, Template};
use std::fs;
use std::path::Path;

use crate::error::{Result, StampError};

/// Stateless template renderer.
///
/// Parsed templates are not cached; every call parses its input again.
#[derive(Clone)]
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer").finish_non_exhaustive()
    }
}

impl Renderer {
    /// Create a renderer with the built-in helpers registered.
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        // Generated files are source code, not HTML.
        handlebars.register_escape_fn(handlebars::no_escape);
        helpers::register_helpers(&mut handlebars);

        Self { handlebars }
    }

    /// Render `text` with `ctx`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateSyntax` if `text` cannot be parsed, and `Render` if a
    /// helper fails while rendering.
    pub fn render(&self, text: &str, ctx: &RenderContext) -> Result<String> {
        self.render_named(text, ctx, "template")
    }

    /// Render `text`, naming it `origin` in error messages.
    pub fn render_named(&self, text: &str, ctx: &RenderContext, origin: &str) -> Result<String> {
        check_syntax_named(text, origin)?;

        self.handlebars
            .render_template(text, ctx)
            .map_err(|e| StampError::Render {
                origin: origin.to_string(),
                message: e.to_string(),
            })
    }

    /// Read `path` and render its contents.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the file is missing or unreadable.
    pub fn render_file(&self, path: &Path, ctx: &RenderContext) -> Result<String> {
        let text = fs::read_to_string(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "Template file unreadable");
            StampError::missing_path(path)
        })?;

        self.render_named(&text, ctx, &path.display().to_string())
    }
}

/// Check that `text` parses as a template without rendering it.
pub fn check_syntax(text: &str) -> Result<()> {
    check_syntax_named(text, "template")
}

fn check_syntax_named(text: &str, origin: &str) -> Result<()> {
    Template::compile(text)
        .map(|_| ())
        .map_err(|e| StampError::TemplateSyntax {
            origin: origin.to_string(),
            message: e.to_string(),
        })
}
