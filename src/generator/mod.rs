//! Project generation from a template directory.
//!
//! The [`Generator`] walks a template tree depth-first in lexical order and,
//! for every visible entry:
//! 1. renders the entry's relative path (so `{{name}}/main.go` becomes
//!    `myapp/main.go`)
//! 2. checks the result stays inside the output directory
//! 3. creates the directory, renders the text file, or copies the binary file
//!
//! In dry-run mode nothing is read or written; the returned
//! [`GenerationReport`] lists the same destinations a real run would produce.
//!
//! # Example
//!
//! ```
//! use stamp::generator::{GenerateOptions, Generator};
//! use stamp::render::RenderContext;
//! use std::fs;
//! use tempfile::TempDir;
//!
//! let template = TempDir::new().unwrap();
//! fs::write(template.path().join("README.md"), "# {{ name }}").unwrap();
//!
//! let out = TempDir::new().unwrap();
//! let ctx = RenderContext::new().with("name", "Foo");
//! Generator::new(GenerateOptions::default())
//!     .generate(template.path(), out.path(), &ctx)
//!     .unwrap();
//!
//! assert_eq!(fs::read_to_string(out.path().join("README.md")).unwrap(), "# Foo");
//! ```

pub mod paths;
pub mod report;

pub use paths::contained_relative;
pub use report::{Action, GenerationReport, PlannedAction};

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::error::{Result, StampError};
use crate::render::{RenderContext, Renderer};
use crate::template::config::is_ignored;
use crate::template::{self, BinaryClassifier, TemplateConfig};

/// Permission bits of written files.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Report actions without touching the filesystem.
    pub dry_run: bool,
    /// Which files are copied instead of rendered.
    pub classifier: BinaryClassifier,
}

impl GenerateOptions {
    /// Options for a dry run with the default binary table.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Default::default()
        }
    }
}

/// Renders template trees into output directories.
///
/// A generator holds no per-run state and can be reused.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GenerateOptions,
    renderer: Renderer,
}

impl Generator {
    /// Create a generator.
    pub fn new(options: GenerateOptions) -> Self {
        Self {
            options,
            renderer: Renderer::new(),
        }
    }

    /// Get the options.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate `output_root` from `template_root`.
    ///
    /// The first failing entry aborts the run. Files already written stay
    /// in place.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `NotADirectory` for a bad `template_root`
    /// - `OutputInsideTemplate` when `output_root` is `template_root` or lies
    ///   inside it
    /// - `TemplateSyntax` / `Render` for a path or file that fails to render
    /// - `PathEscape` when a rendered path leaves `output_root`
    /// - `Other` for filesystem failures, naming the path involved
    pub fn generate(
        &self,
        template_root: &Path,
        output_root: &Path,
        ctx: &RenderContext,
    ) -> Result<GenerationReport> {
        if !template_root.exists() {
            return Err(StampError::missing_path(template_root));
        }
        if !template_root.is_dir() {
            return Err(StampError::NotADirectory {
                path: template_root.to_path_buf(),
            });
        }
        paths::ensure_outside(template_root, output_root)?;

        let config_path = TemplateConfig::find(template_root);
        let ignore = match &config_path {
            Some(path) => TemplateConfig::load(path)?.ignore_patterns()?,
            None => Vec::new(),
        };

        let dry_run = self.options.dry_run;
        let mut report = GenerationReport::new(dry_run);

        debug!(
            template = %template_root.display(),
            output = %output_root.display(),
            dry_run,
            "Generating"
        );

        if !dry_run {
            fs::create_dir_all(output_root).with_context(|| {
                format!("Failed to create output directory {}", output_root.display())
            })?;
        }

        let mut walker = template::walk(template_root);
        while let Some(entry) = walker.next() {
            let entry =
                entry.with_context(|| format!("Failed to walk {}", template_root.display()))?;
            let source = entry.path();
            let file_type = entry.file_type();

            if config_path.as_deref() == Some(source) {
                continue;
            }

            let relative = source
                .strip_prefix(template_root)
                .with_context(|| format!("{} is outside the template", source.display()))?;

            if is_ignored(&ignore, relative, file_type.is_dir()) {
                debug!(path = %relative.display(), "Ignored by template config");
                if file_type.is_dir() {
                    walker.skip_current_dir();
                }
                continue;
            }

            let text = paths::template_text(relative);
            let rendered = self
                .renderer
                .render_named(&text, ctx, &format!("path '{}'", text))?;
            let destination = output_root.join(contained_relative(&rendered, output_root)?);

            if file_type.is_dir() {
                if !dry_run {
                    create_dir_like(source, &destination)?;
                }
                debug!(dest = %destination.display(), "Directory");
                report.push(destination, Action::CreateDir);
            } else if file_type.is_file() {
                let action = if self.options.classifier.is_binary_path(source) {
                    Action::CopyFile
                } else {
                    Action::RenderFile
                };

                if !dry_run {
                    let bytes = match action {
                        Action::CopyFile => fs::read(source)
                            .with_context(|| format!("Failed to read {}", source.display()))?,
                        _ => self.renderer.render_file(source, ctx)?.into_bytes(),
                    };
                    write_file(&destination, &bytes)?;
                }
                debug!(dest = %destination.display(), %action, "File");
                report.push(destination, action);
            } else {
                tracing::warn!(path = %source.display(), "Skipping symlink in template");
            }
        }

        Ok(report)
    }
}

/// Create `dest` with the permission bits of `source`.
///
/// An existing directory is left as it is.
fn create_dir_like(source: &Path, dest: &Path) -> Result<()> {
    if dest.is_dir() {
        return Ok(());
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

        let mode = fs::metadata(source)
            .with_context(|| format!("Failed to stat {}", source.display()))?
            .permissions()
            .mode();
        fs::DirBuilder::new()
            .recursive(true)
            .mode(mode & 0o7777)
            .create(dest)
            .with_context(|| format!("Failed to create directory {}", dest.display()))?;
    }

    #[cfg(not(unix))]
    {
        let _ = source;
        fs::create_dir_all(dest)
            .with_context(|| format!("Failed to create directory {}", dest.display()))?;
    }

    Ok(())
}

/// Write `bytes` to `dest`, creating it with the default file mode.
fn write_file(dest: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options
        .open(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    file.write_all(bytes)
        .with_context(|| format!("Failed to write {}", dest.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn template(files: &[(&str, &[u8])]) -> TempDir {
        let temp = TempDir::new().unwrap();
        for (path, content) in files {
            let full = temp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, content).unwrap();
        }
        temp
    }

    fn tree(root: &Path) -> BTreeSet<PathBuf> {
        walkdir::WalkDir::new(root)
            .min_depth(1)
            .into_iter()
            .map(|e| e.unwrap().into_path())
            .collect()
    }

    #[test]
    fn renders_file_contents() {
        let tpl = template(&[("README.md", b"# {{ name }}")]);
        let out = TempDir::new().unwrap();
        let ctx = RenderContext::new().with("name", "Foo");

        let report = Generator::default()
            .generate(tpl.path(), out.path(), &ctx)
            .unwrap();

        assert_eq!(
            fs::read_to_string(out.path().join("README.md")).unwrap(),
            "# Foo"
        );
        assert_eq!(report.actions()[0].action, Action::RenderFile);
    }

    #[test]
    fn renders_path_segments() {
        let tpl = template(&[("{{ proj }}/main.go", b"package main")]);
        let out = TempDir::new().unwrap();
        let ctx = RenderContext::new().with("proj", "x");

        Generator::default()
            .generate(tpl.path(), out.path(), &ctx)
            .unwrap();

        assert!(out.path().join("x").is_dir());
        assert!(out.path().join("x/main.go").is_file());
        assert!(!out.path().join("{{ proj }}").exists());
    }

    #[test]
    fn binary_files_are_copied_verbatim() {
        let png: &[u8] = &[0x89, b'P', b'N', b'G', b'{', b'{', b'n', b'}', b'}', 0x00, 0xff];
        let tpl = template(&[("logo.png", png)]);
        let out = TempDir::new().unwrap();
        let ctx = RenderContext::new().with("n", "SHOULD NOT APPEAR");

        let report = Generator::default()
            .generate(tpl.path(), out.path(), &ctx)
            .unwrap();

        assert_eq!(fs::read(out.path().join("logo.png")).unwrap(), png);
        assert_eq!(report.actions()[0].action, Action::CopyFile);
    }

    #[test]
    fn hidden_entries_skipped_except_allow_list() {
        let tpl = template(&[
            (".git/HEAD", b"ref"),
            (".DS_Store", b""),
            (".gitignore", b"target/"),
            (".env.example", b"KEY={{key}}"),
            ("main.rs", b""),
        ]);
        let out = TempDir::new().unwrap();
        let ctx = RenderContext::new().with("key", "v");

        Generator::default()
            .generate(tpl.path(), out.path(), &ctx)
            .unwrap();

        assert!(!out.path().join(".git").exists());
        assert!(!out.path().join(".DS_Store").exists());
        assert!(out.path().join(".gitignore").exists());
        assert_eq!(
            fs::read_to_string(out.path().join(".env.example")).unwrap(),
            "KEY=v"
        );
        assert!(out.path().join("main.rs").exists());
    }

    #[test]
    fn dry_run_writes_nothing_and_matches_real_run() {
        let tpl = template(&[
            ("{{name}}/src/lib.rs", b"// {{name}}"),
            ("{{name}}/assets/icon.ico", b"\x00\x01"),
            ("README.md", b"# {{name}}"),
        ]);
        let ctx = RenderContext::new().with("name", "app");

        let dry_out = TempDir::new().unwrap();
        let target = dry_out.path().join("project");
        let dry = Generator::new(GenerateOptions::dry_run())
            .generate(tpl.path(), &target, &ctx)
            .unwrap();
        assert!(dry.is_dry_run());
        assert!(!target.exists());

        let real = Generator::default()
            .generate(tpl.path(), &target, &ctx)
            .unwrap();

        assert_eq!(dry.destinations(), real.destinations());
        assert_eq!(real.destinations(), tree(&target));
    }

    #[test]
    fn walk_is_lexical() {
        let tpl = template(&[("b.txt", b""), ("a.txt", b""), ("c/d.txt", b"")]);
        let out = TempDir::new().unwrap();
        let report = Generator::new(GenerateOptions::dry_run())
            .generate(tpl.path(), out.path(), &RenderContext::new())
            .unwrap();

        let names: Vec<PathBuf> = report
            .actions()
            .iter()
            .map(|a| a.destination.strip_prefix(out.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("c"),
                PathBuf::from("c").join("d.txt"),
            ]
        );
    }

    #[test]
    fn escaping_path_is_rejected() {
        let tpl = template(&[("{{dir}}/evil.txt", b"x")]);
        let out = TempDir::new().unwrap();
        let target = out.path().join("inner");
        let ctx = RenderContext::new().with("dir", "../..");

        let err = Generator::default()
            .generate(tpl.path(), &target, &ctx)
            .unwrap_err();

        assert!(matches!(err, StampError::PathEscape { .. }));
        assert!(!out.path().join("evil.txt").exists());
    }

    #[test]
    fn first_failure_aborts() {
        let tpl = template(&[("a.txt", b"ok"), ("b.txt", b"{{#if x}}broken"), ("c.txt", b"later")]);
        let out = TempDir::new().unwrap();

        let err = Generator::default()
            .generate(tpl.path(), out.path(), &RenderContext::new())
            .unwrap_err();

        assert!(matches!(err, StampError::TemplateSyntax { .. }));
        assert!(out.path().join("a.txt").exists());
        assert!(!out.path().join("c.txt").exists());
    }

    #[test]
    fn config_file_and_ignored_paths_not_generated() {
        let tpl = template(&[
            ("template.toml", b"ignore = [\"build\", \"*.log\"]"),
            ("build/out.bin", b""),
            ("debug.log", b""),
            ("src/main.rs", b""),
        ]);
        let out = TempDir::new().unwrap();

        let report = Generator::default()
            .generate(tpl.path(), out.path(), &RenderContext::new())
            .unwrap();

        assert!(!out.path().join("template.toml").exists());
        assert!(!out.path().join("build").exists());
        assert!(!out.path().join("debug.log").exists());
        assert!(out.path().join("src/main.rs").exists());
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn recursive_ignore_drops_the_directory_itself() {
        let tpl = template(&[
            ("template.toml", b"ignore = [\"target/**\"]"),
            ("target/debug/app", b""),
            ("src/main.rs", b""),
        ]);
        let out = TempDir::new().unwrap();

        Generator::default()
            .generate(tpl.path(), out.path(), &RenderContext::new())
            .unwrap();

        assert!(!out.path().join("target").exists());
        assert!(out.path().join("src/main.rs").exists());
    }

    #[test]
    fn missing_template_root_is_not_found() {
        let out = TempDir::new().unwrap();
        let err = Generator::default()
            .generate(&out.path().join("nope"), out.path(), &RenderContext::new())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn output_inside_template_leaves_sources_alone() {
        let tpl = template(&[("README.md", b"# {{name}}")]);
        let ctx = RenderContext::new().with("name", "Foo");

        for output in [tpl.path().to_path_buf(), tpl.path().join("out")] {
            let err = Generator::default()
                .generate(tpl.path(), &output, &ctx)
                .unwrap_err();
            assert!(matches!(err, StampError::OutputInsideTemplate { .. }));
        }

        assert_eq!(
            fs::read_to_string(tpl.path().join("README.md")).unwrap(),
            "# {{name}}"
        );
        assert!(!tpl.path().join("out").exists());
    }

    #[cfg(unix)]
    #[test]
    fn file_mode_and_dir_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tpl = template(&[("bin/run.sh", b"#!/bin/sh")]);
        fs::set_permissions(tpl.path().join("bin/run.sh"), fs::Permissions::from_mode(0o755))
            .unwrap();
        fs::set_permissions(tpl.path().join("bin"), fs::Permissions::from_mode(0o700)).unwrap();
        let out = TempDir::new().unwrap();

        Generator::default()
            .generate(tpl.path(), out.path(), &RenderContext::new())
            .unwrap();

        let file_mode = fs::metadata(out.path().join("bin/run.sh"))
            .unwrap()
            .permissions()
            .mode();
        let dir_mode = fs::metadata(out.path().join("bin"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(file_mode & 0o111, 0);
        assert_eq!(dir_mode & 0o777, 0o700);
    }

    #[test]
    fn generator_is_reusable() {
        let tpl = template(&[("{{n}}.txt", b"{{n}}")]);
        let out = TempDir::new().unwrap();
        let generator = Generator::default();

        for n in ["one", "two"] {
            let ctx = RenderContext::new().with("n", n);
            generator.generate(tpl.path(), out.path(), &ctx).unwrap();
        }

        assert_eq!(fs::read_to_string(out.path().join("one.txt")).unwrap(), "one");
        assert_eq!(fs::read_to_string(out.path().join("two.txt")).unwrap(), "two");
    }
}
