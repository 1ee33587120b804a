// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use pitaka::errors::ServiceError;
use pitaka::models::{Draft, Transaction, TransactionId, TxType};
use pitaka::remote::LedgerService;
use rust_decimal::Decimal;

pub fn tx(id: i64, kind: TxType, category: &str, amount: i64, date: &str) -> Transaction {
    Transaction {
        id: TransactionId::from(id),
        r#type: kind,
        category: category.to_string(),
        amount: Decimal::from(amount),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

/// The two-record ledger used throughout: salary and food in March 2024.
pub fn march_ledger() -> Vec<Transaction> {
    vec![
        tx(1, TxType::Income, "Salary", 1000, "2024-03-01"),
        tx(2, TxType::Expense, "Food", 200, "2024-03-02"),
    ]
}

/// In-memory ledger service with scriptable failures.
pub struct FakeLedger {
    records: Mutex<Vec<Transaction>>,
    next_id: Mutex<i64>,
    fail_next: Mutex<Option<ServiceError>>,
    calls: Mutex<Vec<String>>,
}

impl FakeLedger {
    pub fn new(records: Vec<Transaction>) -> Self {
        let next = records
            .iter()
            .filter_map(|t| t.id.as_str().parse::<i64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            records: Mutex::new(records),
            next_id: Mutex::new(next),
            fail_next: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// The next call fails with `err`.
    pub fn fail_next(&self, err: ServiceError) {
        *self.fail_next.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn records(&self) -> Vec<Transaction> {
        self.records.lock().unwrap().clone()
    }

    fn enter(&self, call: String) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_next.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

fn from_draft(id: TransactionId, d: &Draft) -> Transaction {
    Transaction {
        id,
        r#type: d.r#type,
        category: d.category.clone(),
        amount: d.amount,
        date: d.date,
    }
}

fn not_found() -> ServiceError {
    ServiceError::Remote {
        status: Some(404),
        message: Some("Transaction not found".to_string()),
    }
}

#[async_trait]
impl LedgerService for FakeLedger {
    async fn list(&self) -> Result<Vec<Transaction>, ServiceError> {
        self.enter("list".into())?;
        Ok(self.records())
    }

    async fn create(&self, draft: &Draft) -> Result<Transaction, ServiceError> {
        self.enter("create".into())?;
        let mut next = self.next_id.lock().unwrap();
        let saved = from_draft(TransactionId::from(*next), draft);
        *next += 1;
        self.records.lock().unwrap().push(saved.clone());
        Ok(saved)
    }

    async fn update(
        &self,
        id: &TransactionId,
        draft: &Draft,
    ) -> Result<Transaction, ServiceError> {
        self.enter(format!("update {}", id))?;
        let mut records = self.records.lock().unwrap();
        let slot = records
            .iter_mut()
            .find(|t| &t.id == id)
            .ok_or_else(not_found)?;
        *slot = from_draft(id.clone(), draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), ServiceError> {
        self.enter(format!("delete {}", id))?;
        let mut records = self.records.lock().unwrap();
        let pos = records
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(not_found)?;
        records.remove(pos);
        Ok(())
    }
}
