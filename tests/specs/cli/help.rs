//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let storage = Storage::empty();

    storage
        .mj()
        .args(&["--help"])
        .passes()
        .stdout_has("append")
        .stdout_has("read")
        .stdout_has("commit")
        .stdout_has("status");
}

#[test]
fn version_flag_prints_version() {
    Storage::empty()
        .mj()
        .args(&["--version"])
        .passes()
        .stdout_has("mj ");
}
