#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

// Nothing listens here, so any request fails fast with a connection error.
const DEAD_BACKEND: &str = "http://127.0.0.1:9";

struct Env {
    temp: TempDir,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();
        Self { temp }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("contacts"));
        cmd.env("CONTACTS_CONFIG_DIR", self.temp.path().join("config"))
            .env("CONTACTS_DATA_DIR", self.temp.path().join("data"))
            .env_remove("CONTACTS_API_URL")
            .env_remove("RUST_LOG")
            .args(["--api-url", DEAD_BACKEND]);
        cmd
    }

    fn write_config(&self, content: &str) {
        fs::write(self.temp.path().join("config").join("contacts.toml"), content).unwrap();
    }

    fn state(&self) -> String {
        fs::read_to_string(self.temp.path().join("data").join("state.json")).unwrap()
    }
}

#[test]
fn test_help_lists_commands() {
    Env::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("fav"));
}

#[test]
fn test_invalid_phone_is_rejected_before_any_request() {
    Env::new()
        .cmd()
        .args([
            "add",
            "--name",
            "Jo Doe",
            "--email",
            "j@x.com",
            "--phone",
            "1112223333",
            "--address",
            "1 Main St",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Phone must be in format XXX-XXX-XXXX",
        ))
        .stderr(predicate::str::contains("Network").not());
}

#[test]
fn test_every_invalid_field_is_reported() {
    Env::new()
        .cmd()
        .args([
            "add", "--name", "J", "--email", "nope", "--phone", "1", "--address", "",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name must be at least 2 characters"))
        .stderr(predicate::str::contains("Please enter a valid email"))
        .stderr(predicate::str::contains("Address is required"));
}

#[test]
fn test_patch_edit_validates_changed_fields() {
    let env = Env::new();
    env.write_config("update_strategy = \"patch\"\n");
    env.cmd()
        .args(["edit", "1", "--email", "not-an-email"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Please enter a valid email"));
}

#[test]
fn test_unreachable_backend_reports_network_error() {
    Env::new()
        .cmd()
        .arg("list")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Network error"))
        .stderr(predicate::str::contains("Run the command again to retry"));
}

#[test]
fn test_failed_export_writes_no_file() {
    let env = Env::new();
    let out = env.temp.path().join("out");
    env.cmd()
        .args(["export", "csv", "--dir"])
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
    assert!(!out.join("contacts.csv").exists());
}

#[test]
fn test_unknown_export_format_is_a_usage_error() {
    Env::new()
        .cmd()
        .args(["export", "pdf"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_config_shows_resolved_values() {
    let env = Env::new();
    env.write_config("page_size = 25\nquery_strategy = \"server\"\n");
    env.cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"page_size\": 25"))
        .stdout(predicate::str::contains("\"query_strategy\": \"server\""))
        .stdout(predicate::str::contains(DEAD_BACKEND));
}

#[test]
fn test_zero_page_size_is_a_config_error() {
    let env = Env::new();
    env.write_config("page_size = 0\n");
    env.cmd()
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("page_size must be at least 1"));
}

#[test]
fn test_reset_and_theme_persist_state() {
    let env = Env::new();
    env.cmd()
        .arg("reset")
        .assert()
        .success()
        .stdout(predicate::str::contains("Search and filters cleared."));
    assert!(env.state().contains("\"page\": 1"));

    env.cmd().args(["theme", "dark"]).assert().success();
    assert!(env.state().contains("\"dark_mode\": true"));

    // A later command keeps what the earlier one saved.
    env.cmd().arg("reset").assert().success();
    assert!(env.state().contains("\"dark_mode\": true"));
}

#[test]
fn test_prev_on_first_page_needs_no_backend() {
    Env::new()
        .cmd()
        .arg("prev")
        .assert()
        .success()
        .stdout(predicate::str::contains("Already on the first page."));
}
