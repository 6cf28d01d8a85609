//! Error reporting specs
//!
//! Fatal errors exit non-zero with an `error:` message on stderr.

use crate::prelude::*;

#[test]
fn unknown_command_fails() {
    Storage::empty().mj().args(&["frobnicate"]).fails();
}

#[test]
fn corrupt_watermark_is_fatal() {
    let storage = Storage::empty();
    storage.write("commit.offset", "twelve");

    storage
        .mj()
        .args(&["status"])
        .fails()
        .stderr_has("error: commit watermark")
        .stderr_has("is corrupt")
        .stderr_has("'twelve'");
}

#[test]
fn negative_watermark_is_fatal() {
    let storage = Storage::empty();
    storage.write("commit.offset", "-1");

    storage.mj().args(&["read"]).fails().stderr_has("error:");
}

#[test]
fn storage_dir_under_a_file_fails() {
    let storage = Storage::empty();
    let blocker = storage.root().join("blocker");
    std::fs::write(&blocker, "").unwrap();

    storage
        .mj()
        .args(&["status"])
        .env("MJ_DIR", blocker.join("journal"))
        .fails()
        .stderr_has("error:");
}

#[test]
fn missing_config_file_names_path() {
    let storage = Storage::empty();

    storage
        .mj()
        .args(&["--config", "/nonexistent/mj.toml", "status"])
        .fails()
        .stderr_has("/nonexistent/mj.toml");
}

#[test]
fn zero_read_budget_in_config_is_rejected() {
    let storage = Storage::empty();
    let config = storage.root().join("mj.toml");
    std::fs::write(&config, "read_budget_bytes = 0\n").unwrap();

    storage
        .mj()
        .args(&["--config", config.to_str().unwrap(), "status"])
        .fails()
        .stderr_has("read_budget_bytes");
}
