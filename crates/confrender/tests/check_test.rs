use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;
use confrender_testkit::{temp_dir_in_workspace, write_files, write_vault_project};

fn confrender() -> Command {
    let mut cmd = Command::new(cargo_bin!("confrender"));
    cmd.env("NO_COLOR", "1").env_remove("CONFRENDER_CONFIG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_check_ok() {
    let temp = temp_dir_in_workspace();
    write_vault_project(temp.path(), "[namespace.vault]\naddress = \"x\"\nui = true\n");

    confrender()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("vault: 1 template(s) OK"));

    assert!(!temp.path().join("rendered").exists());
}

#[test]
fn test_check_reports_every_occurrence() {
    let temp = temp_dir_in_workspace();
    write_files(
        temp.path(),
        &[
            ("confrender.toml", "[namespace.vault]\n"),
            ("vault/vault.hcl", "{{a}} and {{a}}\n{{ vault.ui }}"),
        ],
    );

    confrender()
        .current_dir(temp.path())
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("vault/vault.hcl:1:1: UNRESOLVED_PLACEHOLDER"))
        .stderr(predicate::str::contains("vault/vault.hcl:1:11: UNRESOLVED_PLACEHOLDER"))
        .stderr(predicate::str::contains("vault/vault.hcl:2:1: UNRESOLVED_PLACEHOLDER"))
        .stderr(predicate::str::contains("3 problem(s) found"));
}

#[test]
fn test_check_json_output() {
    let temp = temp_dir_in_workspace();
    write_files(
        temp.path(),
        &[
            ("confrender.toml", "[namespace.vault]\nui = true\n"),
            ("vault/a.hcl", "ui = {{ vault.ui }}"),
            ("vault/b.hcl", "address = \"{{ vault.address }}\""),
        ],
    );

    let output = confrender()
        .current_dir(temp.path())
        .args(["check", "--json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = json.as_array().unwrap();
    assert_eq!(checks.len(), 2);

    assert_eq!(checks[0]["template"], "a.hcl");
    assert_eq!(checks[0]["ok"], true);
    assert_eq!(checks[0]["diagnostics"].as_array().unwrap().len(), 0);

    assert_eq!(checks[1]["namespace"], "vault");
    assert_eq!(checks[1]["ok"], false);
    let diagnostic = &checks[1]["diagnostics"][0];
    assert_eq!(diagnostic["code"], "UNRESOLVED_PLACEHOLDER");
    assert_eq!(diagnostic["path"], "vault.address");
    assert_eq!(diagnostic["location"]["line"], 1);
    assert_eq!(diagnostic["location"]["column"], 12);
    assert_eq!(diagnostic["location"]["offset"], 11);
}

#[test]
fn test_check_malformed_json() {
    let temp = temp_dir_in_workspace();
    write_files(
        temp.path(),
        &[
            ("confrender.toml", "[namespace.vault]\n"),
            ("vault/a.hcl", "x = {{ bad path }}"),
        ],
    );

    let output = confrender()
        .current_dir(temp.path())
        .args(["check", "--json"])
        .output()
        .unwrap();

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let diagnostic = &json[0]["diagnostics"][0];
    assert_eq!(diagnostic["code"], "MALFORMED_TEMPLATE");
    assert!(diagnostic.get("path").is_none());
}
