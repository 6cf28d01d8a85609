//! Append and read specs

use crate::prelude::*;

#[test]
fn append_reports_offsets_in_order() {
    let storage = Storage::empty();

    storage
        .mj()
        .args(&["append", "first"])
        .passes()
        .stdout_eq("appended at offset 0\n");
    storage
        .mj()
        .args(&["append", "second", "--id", "k"])
        .passes()
        .stdout_eq("appended at offset 1\n");
}

#[test]
fn read_prints_uncommitted_entries() {
    let storage = Storage::empty();
    storage.mj().args(&["append", "hello"]).passes();
    storage.mj().args(&["append", "world"]).passes();

    storage
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("0\thello\n1\tworld\n");
}

#[test]
fn read_does_not_commit() {
    let storage = Storage::empty();
    storage.mj().args(&["append", "hello"]).passes();

    storage.mj().args(&["read"]).passes().stdout_has("0\thello");
    storage.mj().args(&["read"]).passes().stdout_has("0\thello");
}

#[test]
fn read_on_empty_journal_says_no_records() {
    Storage::empty()
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("No records\n");
}

#[test]
fn read_max_bytes_returns_at_least_one_record() {
    let storage = Storage::empty();
    storage.mj().args(&["append", "a-long-payload"]).passes();
    storage.mj().args(&["append", "b"]).passes();

    storage
        .mj()
        .args(&["read", "--max-bytes", "1"])
        .passes()
        .stdout_eq("0\ta-long-payload\n");
}

#[test]
fn append_stdin_writes_one_batch() {
    let storage = Storage::empty();

    storage
        .mj()
        .args(&["append", "--stdin"])
        .stdin("a\nb\nc\n")
        .passes()
        .stdout_eq("appended at offset 2\n");

    storage
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("0\ta\n1\tb\n2\tc\n");
}

#[test]
fn append_empty_stdin_fails() {
    Storage::empty()
        .mj()
        .args(&["append", "--stdin"])
        .stdin("")
        .fails()
        .stderr_has("error:");
}

#[test]
fn dir_flag_overrides_env() {
    let storage = Storage::empty();
    let other = storage.root().join("other");

    storage
        .mj()
        .args(&["--dir", other.to_str().unwrap(), "append", "x"])
        .passes();

    assert!(other.join("journal.jsonl").exists());
    assert!(!storage.dir().join("journal.jsonl").exists());
}
