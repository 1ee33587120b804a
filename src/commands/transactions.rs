// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;
use clap::ArgMatches;

use super::{form_from_matches, id_arg, period_arg, report_notice};
use crate::commands::reports::print_transactions;
use crate::dashboard::{Dashboard, Intent};
use crate::models::TransactionForm;
use crate::utils::maybe_print_json;

pub async fn handle(dash: &mut Dashboard, m: &ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(dash, sub).await?,
        Some(("edit", sub)) => edit(dash, sub).await?,
        Some(("delete", sub)) => delete(dash, sub).await?,
        Some(("list", sub)) => list(dash, sub).await?,
        _ => {}
    }
    Ok(())
}

async fn add(dash: &mut Dashboard, sub: &ArgMatches) -> Result<()> {
    let form = form_from_matches(sub, TransactionForm::default())?;
    let notice = dash.dispatch(Intent::Submit(form), Instant::now()).await?;
    report_notice(notice)
}

async fn edit(dash: &mut Dashboard, sub: &ArgMatches) -> Result<()> {
    let now = Instant::now();
    dash.dispatch(Intent::BeginEdit(id_arg(sub)?), now).await?;
    let form = form_from_matches(sub, dash.session().form())?;
    let notice = dash.dispatch(Intent::Submit(form), now).await?;
    report_notice(notice)
}

async fn delete(dash: &mut Dashboard, sub: &ArgMatches) -> Result<()> {
    let notice = dash
        .dispatch(Intent::Delete(id_arg(sub)?), Instant::now())
        .await?;
    report_notice(notice)
}

async fn list(dash: &mut Dashboard, sub: &ArgMatches) -> Result<()> {
    let now = Instant::now();
    let period = period_arg(sub, dash.period())?;
    dash.dispatch(Intent::SetFilter(period), now).await?;
    let view = dash.view(now);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.transactions)? {
        print_transactions(&view);
    }
    Ok(())
}
