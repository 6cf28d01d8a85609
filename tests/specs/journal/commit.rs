//! Commit and status specs

use crate::prelude::*;

#[test]
fn status_on_fresh_journal() {
    Storage::empty()
        .mj()
        .args(&["status"])
        .passes()
        .stdout_has("Committed:   none")
        .stdout_has("Next read:   0")
        .stdout_has("Next offset: 0");
}

#[test]
fn commit_persists_watermark() {
    let storage = Storage::empty();
    storage.mj().args(&["append", "a"]).passes();

    storage
        .mj()
        .args(&["commit", "0"])
        .passes()
        .stdout_eq("committed offset 0\n");

    assert_eq!(storage.read("commit.offset").trim(), "0");
}

#[test]
fn read_resumes_after_committed_offset() {
    let storage = Storage::empty();
    for payload in ["a", "b", "c", "d"] {
        storage.mj().args(&["append", payload]).passes();
    }

    storage.mj().args(&["commit", "1"]).passes();

    storage
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("2\tc\n3\td\n");
    storage
        .mj()
        .args(&["status"])
        .passes()
        .stdout_has("Committed:   1")
        .stdout_has("Next read:   2")
        .stdout_has("Next offset: 4");
}

#[test]
fn commit_never_moves_backwards() {
    let storage = Storage::empty();
    storage.mj().args(&["commit", "7"]).passes();

    storage
        .mj()
        .args(&["commit", "3"])
        .passes()
        .stdout_has("already at 7");

    assert_eq!(storage.read("commit.offset").trim(), "7");
}

#[test]
fn commit_rejects_negative_offset() {
    Storage::empty().mj().args(&["commit", "-1"]).fails();
}

#[test]
fn committed_past_end_reads_nothing() {
    let storage = Storage::empty();
    storage.write("commit.offset", "41");
    storage.mj().args(&["append", "a"]).passes();

    storage
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("No records\n");
}
