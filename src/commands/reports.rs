// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Instant;

use anyhow::Result;
use clap::ArgMatches;

use super::period_arg;
use crate::dashboard::{Dashboard, DashboardView, Intent};
use crate::notice::NoticeKind;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};

pub async fn handle(dash: &mut Dashboard, m: &ArgMatches) -> Result<()> {
    let Some((name, sub)) = m.subcommand() else {
        return Ok(());
    };
    let now = Instant::now();
    let period = period_arg(sub, dash.period())?;
    dash.dispatch(Intent::SetFilter(period), now).await?;
    let view = dash.view(now);
    let (json_flag, jsonl_flag) = (sub.get_flag("json"), sub.get_flag("jsonl"));

    match name {
        "summary" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.totals)? {
                print_summary(&view);
            }
        }
        "categories" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.categories)? {
                print_categories(&view);
            }
        }
        "trend" => {
            if !maybe_print_json(json_flag, jsonl_flag, &view.trend)? {
                print_trend(&view);
            }
        }
        _ => {}
    }
    Ok(())
}

pub fn print_summary(view: &DashboardView) {
    let t = &view.totals;
    println!("Summary for {}", view.period);
    println!(
        "{}",
        pretty_table(
            &["Income", "Expenses", "Balance"],
            vec![vec![
                fmt_money(&t.income),
                fmt_money(&t.expense),
                fmt_money(&t.balance),
            ]],
        )
    );
}

pub fn print_categories(view: &DashboardView) {
    let rows: Vec<Vec<String>> = view
        .categories
        .iter()
        .map(|c| vec![c.category.clone(), fmt_money(&c.amount), c.color.to_string()])
        .collect();
    println!("Expenses by category, {}", view.period);
    println!("{}", pretty_table(&["Category", "Spent", "Color"], rows));
}

pub fn print_trend(view: &DashboardView) {
    let rows: Vec<Vec<String>> = view
        .trend
        .iter()
        .map(|p| vec![p.date.to_string(), fmt_money(&p.income), fmt_money(&p.expense)])
        .collect();
    println!(
        "Income ({}) vs expense ({}) trend, {}",
        view.trend_colors.income, view.trend_colors.expense, view.period
    );
    println!("{}", pretty_table(&["Date", "Income", "Expense"], rows));
}

/// Highlights the record touched by the last successful save with `*`.
pub fn print_transactions(view: &DashboardView) {
    let rows: Vec<Vec<String>> = view
        .transactions
        .iter()
        .map(|t| {
            let mark = if view.highlighted.as_ref() == Some(&t.id) {
                "*"
            } else {
                ""
            };
            vec![
                format!("{}{}", t.id, mark),
                t.date.to_string(),
                t.category.clone(),
                t.r#type.to_string(),
                fmt_money(&t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Id", "Date", "Category", "Type", "Amount"], rows)
    );
}

pub fn print_notice(view: &DashboardView) {
    if let Some(n) = &view.notice {
        let mark = match n.kind {
            NoticeKind::Success => "✓",
            NoticeKind::Error => "✕",
        };
        println!("{} {}", mark, n.message);
    }
}
