//! Integration tests for the generator public API.

use stamp::generator::{Action, GenerateOptions, Generator};
use stamp::render::RenderContext;
use stamp::template::BinaryClassifier;
use stamp::StampError;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn renders_paths_and_contents() {
    let template = TempDir::new().unwrap();
    write(template.path(), "{{name}}/main.go", b"package {{name}}");
    write(template.path(), "README.md", b"# {{ name }}");

    let out = TempDir::new().unwrap();
    let ctx = RenderContext::new().with("name", "myapp");
    let report = Generator::default()
        .generate(template.path(), out.path(), &ctx)
        .unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("myapp/main.go")).unwrap(),
        "package myapp"
    );
    assert_eq!(
        fs::read_to_string(out.path().join("README.md")).unwrap(),
        "# myapp"
    );
    assert!(!report.is_dry_run());
    assert_eq!(report.file_count(), 2);
    assert_eq!(report.dir_count(), 1);
}

#[test]
fn binary_files_are_copied_verbatim() {
    let template = TempDir::new().unwrap();
    let bytes = [0x89, b'P', b'N', b'G', b'{', b'{', b'x', b'}', b'}', 0x00];
    write(template.path(), "logo.png", &bytes);

    let out = TempDir::new().unwrap();
    let ctx = RenderContext::new().with("x", "EXPANDED");
    let report = Generator::default()
        .generate(template.path(), out.path(), &ctx)
        .unwrap();

    assert_eq!(fs::read(out.path().join("logo.png")).unwrap(), bytes);
    assert_eq!(report.actions()[0].action, Action::CopyFile);
}

#[test]
fn custom_classifier_changes_binary_set() {
    let template = TempDir::new().unwrap();
    write(template.path(), "data.tpl", b"{{x}}");

    let out = TempDir::new().unwrap();
    let options = GenerateOptions {
        classifier: BinaryClassifier::default().with_extension("tpl"),
        ..Default::default()
    };
    Generator::new(options)
        .generate(
            template.path(),
            out.path(),
            &RenderContext::new().with("x", "y"),
        )
        .unwrap();

    assert_eq!(
        fs::read_to_string(out.path().join("data.tpl")).unwrap(),
        "{{x}}"
    );
}

#[test]
fn dotfiles_follow_allow_list() {
    let template = TempDir::new().unwrap();
    write(template.path(), ".gitignore", b"target/");
    write(template.path(), ".env.example", b"KEY=");
    write(template.path(), ".DS_Store", b"junk");
    write(template.path(), ".git/HEAD", b"ref");
    write(template.path(), "src/lib.rs", b"");

    let out = TempDir::new().unwrap();
    Generator::default()
        .generate(template.path(), out.path(), &RenderContext::new())
        .unwrap();

    assert!(out.path().join(".gitignore").exists());
    assert!(out.path().join(".env.example").exists());
    assert!(!out.path().join(".DS_Store").exists());
    assert!(!out.path().join(".git").exists());
    assert!(out.path().join("src/lib.rs").exists());
}

#[test]
fn dry_run_matches_real_run() {
    let template = TempDir::new().unwrap();
    write(template.path(), "{{name}}/a.txt", b"{{name}}");
    write(template.path(), "{{name}}/nested/b.png", b"\x00");
    write(template.path(), "c.md", b"c");

    let ctx = RenderContext::new().with("name", "demo");
    let dry_out = TempDir::new().unwrap();
    let target = dry_out.path().join("never");
    let dry = Generator::new(GenerateOptions::dry_run())
        .generate(template.path(), &target, &ctx)
        .unwrap();
    assert!(!target.exists());

    let real = Generator::default()
        .generate(template.path(), &target, &ctx)
        .unwrap();

    assert!(dry.is_dry_run());
    assert_eq!(dry.destinations(), real.destinations());
}

#[test]
fn missing_variables_render_empty() {
    let template = TempDir::new().unwrap();
    write(template.path(), "a.txt", b"[{{missing}}]");

    let out = TempDir::new().unwrap();
    Generator::default()
        .generate(template.path(), out.path(), &RenderContext::new())
        .unwrap();

    assert_eq!(fs::read_to_string(out.path().join("a.txt")).unwrap(), "[]");
}

#[test]
fn escaping_path_is_rejected() {
    let template = TempDir::new().unwrap();
    write(template.path(), "{{dir}}/evil.txt", b"x");

    let root = TempDir::new().unwrap();
    let out = root.path().join("out");
    let ctx = RenderContext::new().with("dir", "../../outside");
    let err = Generator::default()
        .generate(template.path(), &out, &ctx)
        .unwrap_err();

    assert!(matches!(err, StampError::PathEscape { .. }));
    assert!(!root.path().join("outside").exists());
}

#[test]
fn syntax_error_aborts() {
    let template = TempDir::new().unwrap();
    write(template.path(), "bad.txt", b"{{#if}}");

    let out = TempDir::new().unwrap();
    let err = Generator::default()
        .generate(template.path(), out.path(), &RenderContext::new())
        .unwrap_err();
    assert!(matches!(err, StampError::TemplateSyntax { .. }));
}

#[test]
fn missing_template_root_is_not_found() {
    let temp = TempDir::new().unwrap();
    let err = Generator::default()
        .generate(
            &temp.path().join("missing"),
            &temp.path().join("out"),
            &RenderContext::new(),
        )
        .unwrap_err();
    assert!(err.is_not_found());
}
