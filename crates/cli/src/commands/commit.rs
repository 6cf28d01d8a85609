// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mj commit <offset>` - Advance and persist the commit watermark

use clap::Args;
use mj_core::Offset;
use mj_journal::Journal;
use std::io::Write;

#[derive(Args, Debug)]
pub struct CommitArgs {
    /// Highest fully processed offset
    pub offset: Offset,
}

pub fn handle(journal: &Journal, args: CommitArgs, out: &mut impl Write) -> anyhow::Result<()> {
    journal.commit(args.offset);
    journal.flush_now()?;

    // A lower offset leaves the watermark where it was
    match journal.committed() {
        Some(committed) if committed > args.offset => writeln!(
            out,
            "committed offset {} (already at {})",
            args.offset, committed
        )?,
        _ => writeln!(out, "committed offset {}", args.offset)?,
    }
    Ok(())
}
