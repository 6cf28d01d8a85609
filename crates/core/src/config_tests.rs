// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn new_uses_defaults() {
    let config = JournalConfig::new("/tmp/journal");

    assert_eq!(config.dir, PathBuf::from("/tmp/journal"));
    assert_eq!(config.flush_interval, Duration::from_secs(1));
    assert_eq!(config.read_budget_bytes, 10 * 1024);
    assert_eq!(config.stop_timeout, Duration::from_secs(1));
}

#[test]
fn empty_toml_needs_a_dir() {
    let err = JournalConfig::from_toml("", None).unwrap_err();
    assert!(matches!(err, ConfigError::MissingDir));
}

#[test]
fn empty_toml_with_override_uses_defaults() {
    let config = JournalConfig::from_toml("", Some(PathBuf::from("/data/j"))).unwrap();
    assert_eq!(config, JournalConfig::new("/data/j"));
}

#[test]
fn toml_durations_are_humantime() {
    let content = r#"
dir = "/var/lib/mj"
flush_interval = "250ms"
read_budget_bytes = 4096
stop_timeout = "3s"
"#;

    let config = JournalConfig::from_toml(content, None).unwrap();

    assert_eq!(config.dir, PathBuf::from("/var/lib/mj"));
    assert_eq!(config.flush_interval, Duration::from_millis(250));
    assert_eq!(config.read_budget_bytes, 4096);
    assert_eq!(config.stop_timeout, Duration::from_secs(3));
}

#[test]
fn dir_override_wins_over_file() {
    let content = r#"dir = "/from/file""#;
    let config = JournalConfig::from_toml(content, Some(PathBuf::from("/from/flag"))).unwrap();
    assert_eq!(config.dir, PathBuf::from("/from/flag"));
}

#[test]
fn unknown_keys_are_rejected() {
    let content = r#"
dir = "/x"
flush_every = "1s"
"#;
    let err = JournalConfig::from_toml(content, None).unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn zero_flush_interval_is_invalid() {
    let content = r#"
dir = "/x"
flush_interval = "0s"
"#;
    let err = JournalConfig::from_toml(content, None).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "flush_interval",
            ..
        }
    ));
}

#[test]
fn zero_read_budget_is_invalid() {
    let config = JournalConfig::new("/x").with_read_budget(0);
    assert!(config.validate().is_err());
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mj.toml");
    std::fs::write(&path, "flush_interval = \"2s\"\n").unwrap();

    let config = JournalConfig::load(&path, Some(dir.path().to_path_buf())).unwrap();

    assert_eq!(config.flush_interval, Duration::from_secs(2));
    assert_eq!(config.dir, dir.path());
}

#[test]
fn load_missing_file_names_path() {
    let err = JournalConfig::load(Path::new("/nonexistent/mj.toml"), None).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/mj.toml"));
}
