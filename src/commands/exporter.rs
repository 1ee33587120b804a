// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;

use super::{period_arg, required};
use crate::dashboard::{Dashboard, Intent};
use crate::models::Transaction;

pub async fn handle(dash: &mut Dashboard, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(dash, sub).await,
        _ => Ok(()),
    }
}

async fn export_transactions(dash: &mut Dashboard, sub: &ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let now = Instant::now();
    let period = period_arg(sub, dash.period())?;
    dash.dispatch(Intent::SetFilter(period), now).await?;
    let view = dash.view(now);

    match fmt.as_str() {
        "csv" => write_csv(Path::new(out), &view.transactions)?,
        "json" => write_json(Path::new(out), &view.transactions)?,
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    println!(
        "Exported {} transactions for {} to {}",
        view.transactions.len(),
        view.period,
        out
    );
    Ok(())
}

pub fn write_csv(out: &Path, rows: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(out)
        .with_context(|| format!("Failed to create {}", out.display()))?;
    wtr.write_record(["id", "date", "type", "category", "amount"])?;
    for t in rows {
        wtr.write_record([
            t.id.to_string(),
            t.date.to_string(),
            t.r#type.to_string(),
            t.category.clone(),
            t.amount.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json(out: &Path, rows: &[Transaction]) -> Result<()> {
    std::fs::write(out, serde_json::to_string_pretty(rows)?)
        .with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(())
}
