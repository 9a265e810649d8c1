//! Integration tests for CLI infrastructure

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::process::Command;
use confrender_testkit::{temp_dir_in_workspace, write_vault_project};

fn confrender() -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.env("NO_COLOR", "1").env_remove("CONFRENDER_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version_flag() {
    confrender()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("confrender"));
}

#[test]
fn test_cli_help_flag() {
    confrender()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("gendata"));
}

#[test]
fn test_cli_requires_config_file() {
    let temp = temp_dir_in_workspace();

    confrender()
        .current_dir(temp.path())
        .arg("render")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_NOT_FOUND"));
}

#[test]
fn test_cli_reports_invalid_config() {
    let temp = temp_dir_in_workspace();
    write_vault_project(temp.path(), "[namespace.vault\n");

    confrender()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("CONFIG_INVALID"));
}

#[test]
fn test_cli_unknown_namespace() {
    let temp = temp_dir_in_workspace();
    write_vault_project(temp.path(), "[namespace.vault]\naddress = \"x\"\nui = true\n");

    confrender()
        .current_dir(temp.path())
        .args(["render", "nomad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NAMESPACE_NOT_FOUND"));
}

#[test]
fn test_cli_config_flag_from_other_directory() {
    let temp = temp_dir_in_workspace();
    let project = temp.path().join("project");
    write_vault_project(&project, "[namespace.vault]\naddress = \"x\"\nui = true\n");

    confrender()
        .current_dir(temp.path())
        .args(["--config", "project/confrender.toml", "check"])
        .assert()
        .success()
        .stdout(predicate::str::contains("vault: 1 template(s) OK"));
}

#[test]
fn test_cli_rejects_malformed_set() {
    confrender()
        .args(["render", "--set", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PATH=VALUE"));
}

#[test]
fn test_cli_verbose_logs_debug() {
    let temp = temp_dir_in_workspace();
    write_vault_project(temp.path(), "[namespace.vault]\naddress = \"x\"\nui = true\n");

    confrender()
        .current_dir(temp.path())
        .args(["-v", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG >"));
}
