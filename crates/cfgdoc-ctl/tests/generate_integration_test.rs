//! Integration tests for the `cfgdoc` binary.
//!
//! Each test builds a metadata tree and an output directory in temp directories,
//! then runs the compiled binary with HOME pointed at a scratch directory so no
//! user-global config leaks in.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

const METADATA: &str = r#"[{
  "module": "io.helidon.common.configurable",
  "types": [
    {
      "type": "io.helidon.common.configurable.LruCache",
      "annotatedType": "io.helidon.common.configurable.LruCache.Builder",
      "prefix": "cache",
      "options": [
        {"key": "capacity", "type": "java.lang.Integer", "defaultValue": "10000",
         "description": "Maximal number of records"},
        {"key": "name", "required": true}
      ]
    },
    {
      "type": "io.helidon.common.configurable.Pool",
      "inherits": ["io.helidon.common.configurable.MissingBase"],
      "options": [{"key": "size", "type": "java.lang.Integer"}]
    }
  ]
}]"#;

fn cfgdoc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cfgdoc"))
}

fn run_cfgdoc(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(cfgdoc_bin())
        .args(args)
        .current_dir(work_dir)
        .env("HOME", work_dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cfgdoc")
}

/// Temp workspace with `metadata/<module>/config-metadata.json` and an empty `docs/`.
fn workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    let module_dir = dir.path().join("metadata/common/META-INF/helidon");
    fs::create_dir_all(&module_dir).unwrap();
    fs::write(module_dir.join("config-metadata.json"), METADATA).unwrap();
    fs::create_dir_all(dir.path().join("docs")).unwrap();
    dir
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_generate_writes_pages_and_index() {
    let dir = workspace();
    let output = run_cfgdoc(dir.path(), &["generate", "*", "docs", "-m", "metadata"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let page = fs::read_to_string(
        dir.path()
            .join("docs/io_helidon_common_configurable_LruCache.adoc"),
    )
    .unwrap();
    assert!(page.contains("= LruCache (common.configurable)"));
    assert!(page.contains("`10000`"));
    assert!(dir
        .path()
        .join("docs/io_helidon_common_configurable_Pool.adoc")
        .is_file());

    let out = stdout(&output);
    assert!(out.contains("Generated 2 documents"));
    assert!(out.contains(
        "- xref:{rootdir}/config/io_helidon_common_configurable_LruCache.adoc[LruCache (common.configurable)]"
    ));
    // Missing parent is logged to stderr, not fatal, and stays out of the summary
    assert!(stderr(&output).contains("io.helidon.common.configurable.MissingBase"));
    assert!(!out.contains("MissingBase"));
}

#[test]
fn test_second_run_reports_unchanged() {
    let dir = workspace();
    let args = ["generate", "*", "docs", "--metadata", "metadata"];
    assert!(run_cfgdoc(dir.path(), &args).status.success());

    let output = run_cfgdoc(dir.path(), &args);
    assert!(output.status.success());
    assert!(stdout(&output).contains("(0 written, 2 unchanged)"));
}

#[test]
fn test_missing_target_directory_fails() {
    let dir = workspace();
    let output = run_cfgdoc(dir.path(), &["generate", "*", "nowhere", "-m", "metadata"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not exist or is not a directory"));
}

#[test]
fn test_missing_template_file_fails() {
    let dir = workspace();
    let output = run_cfgdoc(
        dir.path(),
        &["generate", "*", "docs", "-m", "metadata", "--template", "missing.tera"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.tera"));
}

#[test]
fn test_custom_template_and_relative_path() {
    let dir = workspace();
    fs::write(
        dir.path().join("page.tera"),
        "{{ config_type.title }}|{% for o in config_type.options %}{{ o.key }},{% endfor %}",
    )
    .unwrap();
    let output = run_cfgdoc(
        dir.path(),
        &[
            "generate",
            "io.helidon.common.configurable",
            "docs",
            "reference",
            "-m",
            "metadata",
            "--template",
            "page.tera",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let page = fs::read_to_string(
        dir.path()
            .join("docs/io_helidon_common_configurable_LruCache.adoc"),
    )
    .unwrap();
    assert_eq!(page, "LruCache (common.configurable)|capacity,name,");
}

#[test]
fn test_unknown_module_generates_nothing() {
    let dir = workspace();
    let output = run_cfgdoc(dir.path(), &["generate", "io.other", "docs", "-m", "metadata"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("No types found for module 'io.other'"));
    assert_eq!(fs::read_dir(dir.path().join("docs")).unwrap().count(), 0);
}

#[test]
fn test_config_file_supplies_defaults() {
    let dir = workspace();
    fs::write(
        dir.path().join(".cfgdoc.toml"),
        r#"
metadata-paths = ["metadata"]
index-prefix = "reference/"
"#,
    )
    .unwrap();

    let output = run_cfgdoc(dir.path(), &["generate", "*", "docs"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains(
        "- xref:reference/io_helidon_common_configurable_Pool.adoc[Pool (common.configurable)]"
    ));
}

#[test]
fn test_inspect_prints_resolved_options() {
    let dir = workspace();
    let output = run_cfgdoc(
        dir.path(),
        &["inspect", "io.helidon.common.configurable.LruCache", "-m", "metadata"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("LruCache (common.configurable)"));
    assert!(out.contains("Annotated type: io.helidon.common.configurable.LruCache.Builder"));
    assert!(out.contains("capacity : int = 10000"));
    assert!(out.contains("name : string (required)"));
}

#[test]
fn test_inspect_unknown_type_fails() {
    let dir = workspace();
    let output = run_cfgdoc(dir.path(), &["inspect", "io.helidon.Nope", "-m", "metadata"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Type 'io.helidon.Nope' not found"));
}

#[test]
fn test_empty_metadata_is_logged() {
    let dir = workspace();
    fs::create_dir_all(dir.path().join("empty")).unwrap();
    let output = run_cfgdoc(dir.path(), &["generate", "*", "docs", "-m", "empty"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("No configured types found in metadata"));
    assert!(stdout(&output).contains("No types found for module '*'"));
}
