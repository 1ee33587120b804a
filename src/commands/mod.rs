// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod exporter;
pub mod reports;
pub mod settings;
pub mod shell;
pub mod transactions;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ArgMatches;

use crate::aggregate::Period;
use crate::config::{Backend, Config};
use crate::dashboard::Dashboard;
use crate::db::{db_path, SqliteLedger};
use crate::models::{TransactionForm, TransactionId};
use crate::notice::Notice;
use crate::remote::{HttpLedger, LedgerService};
use crate::utils::parse_month;

pub fn service_for(config: &Config) -> Result<Arc<dyn LedgerService>> {
    let svc: Arc<dyn LedgerService> = match &config.backend {
        Backend::Remote {
            base_url,
            session_cookie,
        } => {
            tracing::debug!(%base_url, "using remote ledger");
            Arc::new(HttpLedger::new(
                base_url,
                session_cookie.clone(),
                config.request_timeout(),
            )?)
        }
        Backend::Local { db_path: path } => {
            let path = match path {
                Some(p) => p.clone(),
                None => db_path()?,
            };
            tracing::debug!(path = %path.display(), "using local ledger");
            Arc::new(SqliteLedger::open(&path)?)
        }
    };
    Ok(svc)
}

/// Builds a dashboard over the configured backend and loads the ledger.
pub async fn open_dashboard(config: &Config) -> Result<Dashboard> {
    let mut dash = Dashboard::from_config(service_for(config)?, config);
    dash.refresh()
        .await
        .context("Failed to load transactions")?;
    Ok(dash)
}

pub(crate) fn required<'a>(sub: &'a ArgMatches, name: &str) -> Result<&'a String> {
    sub.get_one::<String>(name)
        .with_context(|| format!("Missing required argument '{}'", name))
}

pub(crate) fn id_arg(sub: &ArgMatches) -> Result<TransactionId> {
    Ok(TransactionId::from(required(sub, "id")?.as_str()))
}

/// `--month` if given, otherwise `fallback`.
pub(crate) fn period_arg(sub: &ArgMatches, fallback: Period) -> Result<Period> {
    match sub.get_one::<String>("month") {
        Some(m) => parse_month(m),
        None => Ok(fallback),
    }
}

/// Overlays the form fields present on the command line onto `form`.
pub fn form_from_matches(sub: &ArgMatches, mut form: TransactionForm) -> Result<TransactionForm> {
    if let Some(t) = sub.get_one::<String>("type") {
        form.r#type = t.parse().map_err(anyhow::Error::msg)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        form.category = c.clone();
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        form.amount = a.clone();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        form.date = d.clone();
    }
    Ok(form)
}

/// Prints a success notice; turns an error notice into an error.
pub(crate) fn report_notice(notice: Option<Notice>) -> Result<()> {
    match notice {
        Some(n) if n.is_error() => Err(anyhow::anyhow!(n.message)),
        Some(n) => {
            match &n.record_id {
                Some(id) => println!("✓ {} (id {})", n.message, id),
                None => println!("✓ {}", n.message),
            }
            Ok(())
        }
        None => Ok(()),
    }
}
