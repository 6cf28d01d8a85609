//! Restart and recovery specs

use crate::prelude::*;
use fs2::FileExt;
use std::io::Write;

#[test]
fn torn_tail_is_repaired_on_open() {
    let storage = Storage::empty();
    storage.mj().args(&["append", "kept"]).passes();

    let mut log = std::fs::OpenOptions::new()
        .append(true)
        .open(storage.dir().join("journal.jsonl"))
        .unwrap();
    log.write_all(b"{\"offset\":1,\"id\":[],\"pay").unwrap();
    drop(log);

    storage
        .mj()
        .args(&["append", "next"])
        .passes()
        .stdout_eq("appended at offset 1\n");
    storage
        .mj()
        .args(&["read"])
        .passes()
        .stdout_eq("0\tkept\n1\tnext\n");
}

#[test]
fn locked_directory_is_refused() {
    let storage = Storage::empty();
    storage.write("journal.lock", "");
    let lock = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .open(storage.dir().join("journal.lock"))
        .unwrap();
    lock.try_lock_exclusive().unwrap();

    storage
        .mj()
        .args(&["status"])
        .fails()
        .stderr_has("error: journal directory is already in use");

    lock.unlock().unwrap();
    storage.mj().args(&["status"]).passes();
}

#[test]
fn lock_is_released_after_each_command() {
    let storage = Storage::empty();

    storage.mj().args(&["append", "a"]).passes();
    storage.mj().args(&["append", "b"]).passes();
    storage.mj().args(&["status"]).passes();
}
