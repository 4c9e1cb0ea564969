//! CLI argument parsing and validation tests — no network I/O.
//!
//! These tests verify that bad invocations are rejected before any cassette
//! or live adapter is consulted.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd(work_dir: &std::path::Path) -> Command {
    std::fs::create_dir_all(work_dir).unwrap();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("hindi-imagen");
    cmd.current_dir(work_dir)
        .env("HINDI_IMAGEN_CONFIG", "/nonexistent/hindi-imagen.toml")
        .env_remove("HINDI_IMAGEN_REPLAY")
        .env_remove("HINDI_IMAGEN_REC")
        .env_remove("HUGGINGFACE_API_KEY")
        .env_remove("VITE_HUGGINGFACE_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_prompt_exits_with_error() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_missing_prompt");
    cmd(&dir).assert().failure().stderr(predicate::str::contains("Provide a prompt string"));
}

#[test]
fn invalid_format_exits_with_error() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_bad_format");
    cmd(&dir)
        .args(["--format", "gif", "सूरज"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported format 'gif'"));
}

#[test]
fn missing_api_key_exits_with_error() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_no_key");
    cmd(&dir)
        .arg("सूरज")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No API key for Hugging Face"))
        .stderr(predicate::str::contains("HUGGINGFACE_API_KEY"));
}

#[test]
fn empty_prompt_alerts_before_credentials_are_checked() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_empty_prompt");
    for prompt in ["", "   "] {
        cmd(&dir)
            .arg(prompt)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Please enter a prompt"))
            .stderr(predicate::str::contains("No API key").not())
            .stderr(predicate::str::contains("Generating...").not());
    }
}

#[test]
fn interactive_rejects_positional_prompt() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_interactive_conflict");
    cmd(&dir).args(["--interactive", "सूरज"]).assert().failure();
}

#[test]
fn unreadable_config_exits_with_error() {
    let dir = std::env::temp_dir().join("hindi_imagen_cli_bad_config");
    std::fs::create_dir_all(&dir).unwrap();
    let config = dir.join("bad.toml");
    std::fs::write(&config, "keys = [[[").unwrap();

    cmd(&dir)
        .args(["--config", config.to_str().unwrap(), "सूरज"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config error"));

    let _ = std::fs::remove_dir_all(&dir);
}
