//! CLI integration tests for masked-dump.
//!
//! These tests cover argument parsing, help output, and exit codes for
//! error conditions that do not need a live database.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

/// Get a command for the masked-dump binary.
fn cmd() -> Command {
    Command::cargo_bin("masked-dump").unwrap()
}

fn config_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", contents).unwrap();
    file
}

const VALID_CONFIG: &str = r#"
default_connection: main
connections:
  main:
    type: mysql
    host: localhost
    database: app
    user: root
dump:
  all_tables: true
  schema_only: [failed_jobs]
  tables:
    - name: users
      columns:
        email: { fake: safe_email }
"#;

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_all_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("tables"))
        .stdout(predicate::str::contains("check-config"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("masked-dump"));
}

#[test]
fn test_global_flag_defaults() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--connection"))
        .stdout(predicate::str::contains("--output-json"))
        .stdout(predicate::str::contains("[default: dump.yaml]"))
        .stdout(predicate::str::contains("[default: text]"))
        .stdout(predicate::str::contains("[default: info]"));
}

#[test]
fn test_check_config_command_exists() {
    cmd()
        .args(["check-config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Validate the configuration file"));
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_missing_config_exits_with_code_7() {
    cmd()
        .args(["--config", "nonexistent_dump_config.yaml", "check-config"])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let file = config_file("invalid: yaml: content: [\n");

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "check-config"])
        .assert()
        .code(1);
}

#[test]
fn test_empty_config_exits_with_code_1() {
    let file = config_file("");

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "plan"])
        .assert()
        .code(1);
}

#[test]
fn test_conflicting_column_rules_exit_with_code_1() {
    let file = config_file(
        r#"
connections:
  main: { type: mysql, host: localhost, database: app, user: root }
dump:
  tables:
    - name: users
      columns:
        email: { mask: "*", fake: safe_email }
"#,
    );

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "check-config"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("email"));
}

#[test]
fn test_unknown_connection_exits_with_code_1() {
    let file = config_file(VALID_CONFIG);

    cmd()
        .args([
            "--config",
            file.path().to_str().unwrap(),
            "--connection",
            "reporting",
            "check-config",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown database connection: reporting"));
}

#[test]
fn test_unknown_verbosity_exits_with_code_1() {
    let file = config_file(VALID_CONFIG);

    cmd()
        .args([
            "--config",
            file.path().to_str().unwrap(),
            "--verbosity",
            "chatty",
            "check-config",
        ])
        .assert()
        .code(1);
}

// =============================================================================
// check-config
// =============================================================================

#[test]
fn test_check_config_succeeds() {
    let file = config_file(VALID_CONFIG);

    cmd()
        .args(["--config", file.path().to_str().unwrap(), "check-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration OK"))
        .stdout(predicate::str::contains("Using: main (mysql://localhost/app)"))
        .stdout(predicate::str::contains("Customized tables: 1"));
}
