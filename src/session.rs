// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use serde::Serialize;

use crate::models::{Transaction, TransactionForm, TransactionId};

/// Whether the entry form adds a new record or edits an existing one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "mode", content = "record", rename_all = "lowercase")]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Transaction),
}

impl EditSession {
    /// Targets `record`, replacing any record already being edited.
    pub fn begin(&mut self, record: Transaction) {
        tracing::debug!(id = %record.id, "edit session started");
        *self = EditSession::Editing(record);
    }

    pub fn cancel(&mut self) {
        *self = EditSession::Idle;
    }

    /// Called once a save is confirmed.
    pub fn finish(&mut self) {
        *self = EditSession::Idle;
    }

    pub fn editing(&self) -> Option<&Transaction> {
        match self {
            EditSession::Idle => None,
            EditSession::Editing(r) => Some(r),
        }
    }

    pub fn target_id(&self) -> Option<&TransactionId> {
        self.editing().map(|r| &r.id)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }

    /// Form contents for the current state: blank defaults when idle,
    /// the targeted record's fields when editing.
    pub fn form(&self) -> TransactionForm {
        match self {
            EditSession::Idle => TransactionForm::default(),
            EditSession::Editing(r) => TransactionForm::from(r),
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Transaction"
        } else {
            "Add Transaction"
        }
    }
}
