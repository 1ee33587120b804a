// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::project_dirs;
use crate::errors::ServiceError;
use crate::models::{Draft, Transaction, TransactionId, TxType};
use crate::remote::LedgerService;

pub fn db_path() -> Result<PathBuf> {
    let proj = project_dirs().context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("pitaka.sqlite"))
}

pub fn open_or_init(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let conn =
        Connection::open(path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        type TEXT NOT NULL CHECK(type IN ('income','expense')),
        category TEXT NOT NULL,
        amount TEXT NOT NULL,
        date TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    "#,
    )?;
    Ok(())
}

/// Ledger service backed by a local SQLite file, for use without a server.
pub struct SqliteLedger {
    conn: Mutex<Connection>,
}

impl SqliteLedger {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open_or_init(path)?))
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        init_schema(&conn)?;
        Ok(Self::new(conn))
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, ServiceError> {
        self.conn
            .lock()
            .map_err(|_| ServiceError::remote("Ledger database is unavailable"))
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Transaction>, ServiceError> {
        let mut stmt = conn
            .prepare("SELECT id, type, category, amount, date FROM transactions WHERE id=?1")?;
        let row = stmt.query_row(params![id], row_to_raw).optional()?;
        row.map(RawRow::into_transaction).transpose()
    }
}

struct RawRow {
    id: i64,
    r#type: String,
    category: String,
    amount: String,
    date: String,
}

fn row_to_raw(r: &Row<'_>) -> rusqlite::Result<RawRow> {
    Ok(RawRow {
        id: r.get(0)?,
        r#type: r.get(1)?,
        category: r.get(2)?,
        amount: r.get(3)?,
        date: r.get(4)?,
    })
}

impl RawRow {
    fn into_transaction(self) -> Result<Transaction, ServiceError> {
        let r#type = self
            .r#type
            .parse::<TxType>()
            .map_err(ServiceError::Decode)?;
        let amount = self
            .amount
            .parse::<rust_decimal::Decimal>()
            .map_err(|_| ServiceError::Decode(format!("Invalid amount '{}'", self.amount)))?;
        let date = chrono::NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| ServiceError::Decode(format!("Invalid date '{}'", self.date)))?;
        Ok(Transaction {
            id: TransactionId::from(self.id),
            r#type,
            category: self.category,
            amount,
            date,
        })
    }
}

fn numeric_id(id: &TransactionId) -> Result<i64, ServiceError> {
    id.as_str()
        .parse()
        .map_err(|_| ServiceError::NotFound(id.clone()))
}

#[async_trait]
impl LedgerService for SqliteLedger {
    async fn list(&self) -> Result<Vec<Transaction>, ServiceError> {
        let conn = self.lock()?;
        let mut stmt =
            conn.prepare("SELECT id, type, category, amount, date FROM transactions ORDER BY id")?;
        let rows = stmt.query_map([], row_to_raw)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row?.into_transaction()?);
        }
        Ok(out)
    }

    async fn create(&self, draft: &Draft) -> Result<Transaction, ServiceError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO transactions(type, category, amount, date) VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.r#type.as_str(),
                draft.category,
                draft.amount.to_string(),
                draft.date.to_string()
            ],
        )?;
        let id = conn.last_insert_rowid();
        Self::fetch(&conn, id)?
            .ok_or_else(|| ServiceError::NotFound(TransactionId::from(id)))
    }

    async fn update(
        &self,
        id: &TransactionId,
        draft: &Draft,
    ) -> Result<Transaction, ServiceError> {
        let key = numeric_id(id)?;
        let conn = self.lock()?;
        let changed = conn.execute(
            "UPDATE transactions SET type=?1, category=?2, amount=?3, date=?4 WHERE id=?5",
            params![
                draft.r#type.as_str(),
                draft.category,
                draft.amount.to_string(),
                draft.date.to_string(),
                key
            ],
        )?;
        if changed == 0 {
            return Err(ServiceError::NotFound(id.clone()));
        }
        Self::fetch(&conn, key)?.ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), ServiceError> {
        let key = numeric_id(id)?;
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM transactions WHERE id=?1", params![key])?;
        if changed == 0 {
            return Err(ServiceError::NotFound(id.clone()));
        }
        Ok(())
    }
}
