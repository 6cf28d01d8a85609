// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mj append` - Append entries to the journal

use anyhow::{bail, Context};
use clap::Args;
use mj_core::Entry;
use mj_journal::Journal;
use std::io::{BufRead, Write};

#[derive(Args, Debug)]
pub struct AppendArgs {
    /// Entry payload
    #[arg(required_unless_present = "stdin", conflicts_with = "stdin")]
    pub payload: Option<String>,

    /// Entry id
    #[arg(long, default_value = "")]
    pub id: String,

    /// Append every line of stdin as a single batch
    #[arg(long)]
    pub stdin: bool,
}

pub fn handle(
    journal: &Journal,
    args: AppendArgs,
    input: impl BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let payloads = match args.payload {
        Some(payload) => vec![payload],
        None => input
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .context("failed to read stdin")?,
    };
    if payloads.is_empty() {
        bail!("nothing to append: stdin was empty");
    }

    let entries = payloads
        .into_iter()
        .map(|payload| Entry::new(args.id.as_bytes(), payload))
        .collect();
    let offset = journal.append(entries)?;

    writeln!(out, "appended at offset {}", offset)?;
    Ok(())
}
