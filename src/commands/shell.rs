// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented dashboard session. One [`Dashboard`] lives for the whole
//! session, so edit state, colors and notices carry over between commands.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use anyhow::Result;
use clap::ArgMatches;

use super::reports::{print_categories, print_notice, print_summary, print_transactions, print_trend};
use super::{form_from_matches, id_arg, required};
use crate::cli::build_shell;
use crate::colors::Color;
use crate::dashboard::{Dashboard, Intent};
use crate::models::{TransactionForm, TxType};
use crate::utils::parse_month;

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub async fn run(dash: &mut Dashboard) -> Result<()> {
    let stdin = io::stdin();
    loop {
        prompt(dash)?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if run_line(dash, &line, Instant::now()).await? == Flow::Quit {
            break;
        }
    }
    dash.unmount();
    Ok(())
}

fn prompt(dash: &Dashboard) -> Result<()> {
    let mode = match dash.session().target_id() {
        Some(id) => format!("edit {}", id),
        None => "add".to_string(),
    };
    print!("[{} | {}]> ", dash.period(), mode);
    io::stdout().flush()?;
    Ok(())
}

/// Parses and runs one line. Command errors are printed, not returned, so a
/// typo does not end the session.
pub async fn run_line(dash: &mut Dashboard, line: &str, now: Instant) -> Result<Flow> {
    dash.tick(now);
    let words = match shell_words::split(line) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("error: {}", e);
            return Ok(Flow::Continue);
        }
    };
    if words.is_empty() {
        return Ok(Flow::Continue);
    }
    let m = match build_shell().try_get_matches_from(words) {
        Ok(m) => m,
        Err(e) => {
            e.print()?;
            return Ok(Flow::Continue);
        }
    };
    match execute(dash, &m, now).await {
        Ok(flow) => Ok(flow),
        Err(e) => {
            eprintln!("error: {:#}", e);
            Ok(Flow::Continue)
        }
    }
}

async fn execute(dash: &mut Dashboard, m: &ArgMatches, now: Instant) -> Result<Flow> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(Flow::Continue);
    };
    match name {
        "quit" => return Ok(Flow::Quit),
        "filter" => {
            let period = parse_month(required(sub, "month")?)?;
            dash.dispatch(Intent::SetFilter(period), now).await?;
        }
        "show" => {
            let view = dash.view(now);
            print_notice(&view);
            print_summary(&view);
            print_categories(&view);
            print_trend(&view);
        }
        "list" => print_transactions(&dash.view(now)),
        "refresh" => {
            let n = dash.refresh().await?;
            println!("Loaded {} transactions", n);
        }
        "add" => {
            dash.dispatch(Intent::CancelEdit, now).await?;
            let form = form_from_matches(sub, TransactionForm::default())?;
            dash.dispatch(Intent::Submit(form), now).await?;
            print_notice(&dash.view(now));
        }
        "edit" => {
            dash.dispatch(Intent::BeginEdit(id_arg(sub)?), now).await?;
            let form = dash.session().form();
            println!(
                "Editing: {} | {} | {} | {}",
                form.date, form.category, form.r#type, form.amount
            );
        }
        "submit" => {
            let form = form_from_matches(sub, dash.session().form())?;
            dash.dispatch(Intent::Submit(form), now).await?;
            print_notice(&dash.view(now));
        }
        "cancel" => {
            dash.dispatch(Intent::CancelEdit, now).await?;
        }
        "delete" => {
            dash.dispatch(Intent::Delete(id_arg(sub)?), now).await?;
            print_notice(&dash.view(now));
        }
        "color" => {
            let category = required(sub, "category")?.clone();
            let color = required(sub, "color")?
                .parse::<Color>()
                .map_err(anyhow::Error::msg)?;
            dash.dispatch(Intent::SetCategoryColor { category, color }, now)
                .await?;
        }
        "trend-color" => {
            let kind = required(sub, "kind")?
                .parse::<TxType>()
                .map_err(anyhow::Error::msg)?;
            let color = required(sub, "color")?
                .parse::<Color>()
                .map_err(anyhow::Error::msg)?;
            dash.dispatch(Intent::SetTrendColor { kind, color }, now)
                .await?;
        }
        _ => {}
    }
    Ok(Flow::Continue)
}
