// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mj read` - Print entries after the committed offset

use clap::Args;
use mj_journal::Journal;
use std::io::Write;

#[derive(Args, Debug)]
pub struct ReadArgs {
    /// Payload byte budget (defaults to the configured read budget)
    #[arg(long)]
    pub max_bytes: Option<usize>,
}

pub fn handle(journal: &Journal, args: ReadArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let records = match args.max_bytes {
        Some(max_bytes) => journal.read(max_bytes)?,
        None => journal.read_default()?,
    };

    if records.is_empty() {
        writeln!(out, "No records")?;
        return Ok(());
    }

    for record in records {
        writeln!(
            out,
            "{}\t{}",
            record.offset,
            String::from_utf8_lossy(&record.payload)
        )?;
    }
    Ok(())
}
