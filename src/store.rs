// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionId};

/// In-memory ledger for the current session.
///
/// Order is insertion/fetch order, not chronological. The store never
/// recomputes anything itself; callers re-derive views after each change.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    records: Vec<Transaction>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire contents, e.g. after the initial fetch.
    pub fn load(&mut self, records: Vec<Transaction>) {
        tracing::debug!(count = records.len(), "ledger loaded");
        self.records = records;
    }

    /// Replaces the record with the same id in place, or appends it.
    pub fn upsert(&mut self, record: Transaction) {
        match self.records.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                tracing::debug!(id = %record.id, "ledger record replaced");
                *slot = record;
            }
            None => self.append(record),
        }
    }

    /// Appends without checking for an existing id.
    pub fn append(&mut self, record: Transaction) {
        tracing::debug!(id = %record.id, "ledger record appended");
        self.records.push(record);
    }

    /// Removes the record with `id`. Absent ids are a no-op.
    pub fn remove(&mut self, id: &TransactionId) -> Option<Transaction> {
        let pos = self.records.iter().position(|r| &r.id == id)?;
        tracing::debug!(%id, "ledger record removed");
        Some(self.records.remove(pos))
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.records.iter().find(|r| &r.id == id)
    }

    pub fn contains(&self, id: &TransactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn records(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
