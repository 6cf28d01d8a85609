// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mj status` - Show journal positions

use mj_journal::Journal;
use std::io::Write;

pub fn handle(journal: &Journal, out: &mut impl Write) -> anyhow::Result<()> {
    let status = journal.status();
    let committed = status
        .committed
        .map_or_else(|| "none".to_string(), |c| c.to_string());
    let next_offset = status
        .next_offset
        .map_or_else(|| "-".to_string(), |n| n.to_string());

    writeln!(out, "Directory:   {}", journal.config().dir.display())?;
    writeln!(out, "State:       {}", status.state)?;
    writeln!(out, "Committed:   {}", committed)?;
    writeln!(out, "Next read:   {}", status.next_read)?;
    writeln!(out, "Next offset: {}", next_offset)?;
    Ok(())
}
