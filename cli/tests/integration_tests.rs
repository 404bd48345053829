use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Helper to create a temp directory that is cleaned up on drop.
struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(name: &str) -> Self {
        let path = std::env::temp_dir().join(format!("argspec_cli_test_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(&path).expect("failed to create temp dir");
        Self { path }
    }

    fn join(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

const DEFINITION: &str = r#"
application_name: navigator
entries:
  - name: app
    short_description: Subcommands
    subcommand_value: true
  - name: verbose
    short_description: Enable verbose output
    cli_parameters:
      short: "-v"
      action: store_true
  - name: mode
    short_description: Specify the user-interface mode
    default: interactive
    cli_parameters:
      short: "-m"
  - name: target
    short_description: Playbook to run
    subcommands: [run]
    cli_parameters:
      positional: true
subcommands:
  - name: run
    description: Run a playbook
  - name: doc
    description: Review documentation
"#;

fn write_definition(dir: &TempDir, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("failed to write definition");
    path
}

fn argspec(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_argspec"))
        .args(args)
        .output()
        .expect("failed to run argspec")
}

fn arg(path: &Path) -> &str {
    path.to_str().expect("temp path is utf-8")
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_reports_counts() {
    let dir = TempDir::new("validate_ok");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["validate", arg(&def)]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("4 entries"));
    assert!(stdout.contains("2 global argument(s)"));
    assert!(stdout.contains("2 subcommand(s)"));
    assert!(stdout.contains("1 subcommand argument(s)"));
}

#[test]
fn validate_fails_without_selector() {
    let dir = TempDir::new("validate_no_selector");
    let body = DEFINITION.replace("    subcommand_value: true\n", "");
    let def = write_definition(&dir, "navigator.yml", &body);

    let out = argspec(&["validate", arg(&def)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no selector entry"));
}

#[test]
fn validate_fails_with_two_selectors() {
    let dir = TempDir::new("validate_two_selectors");
    let body = DEFINITION.replace(
        "    short_description: Enable verbose output\n",
        "    short_description: Enable verbose output\n    subcommand_value: true\n",
    );
    let def = write_definition(&dir, "navigator.yml", &body);

    let out = argspec(&["validate", arg(&def)]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("multiple selector entries"));
}

#[test]
fn validate_reports_unreadable_definition() {
    let dir = TempDir::new("validate_missing");
    let out = argspec(&["validate", arg(&dir.join("absent.yml"))]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to load"));
}

// ---------------------------------------------------------------------------
// schema / render
// ---------------------------------------------------------------------------

#[test]
fn schema_prints_json_summary() {
    let dir = TempDir::new("schema_json");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["schema", arg(&def)]);
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["selector"], "app");
    assert_eq!(value["global_args"][0]["name"], "verbose");
    assert_eq!(value["global_args"][1]["help"], "Specify the user-interface mode (default: interactive)");
    assert_eq!(value["subcommands"][0]["args"][0]["positional"], true);
    assert!(value["subcommands"][1]["args"].as_array().unwrap().is_empty());
}

#[test]
fn schema_accepts_json_definition() {
    let dir = TempDir::new("schema_json_def");
    let def = write_definition(
        &dir,
        "navigator.json",
        r#"{
            "application_name": "navigator",
            "entries": [
                {"name": "app", "short_description": "Subcommands", "subcommand_value": true}
            ],
            "subcommands": [{"name": "run", "description": "Run"}]
        }"#,
    );

    let out = argspec(&["schema", arg(&def), "--format", "markdown"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("# navigator"));
}

#[test]
fn render_subcommand_help() {
    let dir = TempDir::new("render_sub");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["render", arg(&def), "run"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("run: Run a playbook"));
    assert!(stdout.contains("--verbose"));
    assert!(stdout.contains("[target]"));
}

#[test]
fn render_unknown_subcommand_fails() {
    let dir = TempDir::new("render_unknown");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["render", arg(&def), "lint"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("expected one of: run, doc"));
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_typed_values() {
    let dir = TempDir::new("parse_ok");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["parse", arg(&def), "--", "-v", "run", "site.yml"]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["subcommand"], "run");
    assert_eq!(value["values"]["app"], "run");
    assert_eq!(value["values"]["verbose"], true);
    assert_eq!(value["values"]["target"], "site.yml");
    assert!(value["values"].get("mode").is_none());
}

#[test]
fn parse_rejects_foreign_argument() {
    let dir = TempDir::new("parse_foreign");
    let def = write_definition(&dir, "navigator.yml", DEFINITION);

    let out = argspec(&["parse", arg(&def), "--", "doc", "site.yml"]);
    assert_eq!(out.status.code(), Some(2));
}
