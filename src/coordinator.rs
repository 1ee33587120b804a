// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Confirm-before-commit mutations.
//!
//! The ledger store is only touched after the service has answered, so an
//! unconfirmed record is never visible. On failure the store and the edit
//! session are left exactly as they were, allowing a retry.

use std::sync::Arc;

use crate::errors::ServiceError;
use crate::models::{Submission, TransactionId};
use crate::notice::Notice;
use crate::remote::LedgerService;
use crate::session::EditSession;
use crate::store::LedgerStore;

pub const MSG_ADDED: &str = "Transaction added successfully!";
pub const MSG_UPDATED: &str = "Transaction updated successfully!";
pub const MSG_DELETED: &str = "Transaction deleted successfully!";
pub const MSG_SAVE_FAILED: &str = "Error saving transaction";
pub const MSG_SAVE_TRANSPORT: &str = "Failed to save transaction";
pub const MSG_DELETE_FAILED: &str = "Error deleting transaction";
pub const MSG_DELETE_TRANSPORT: &str = "Failed to delete transaction";

#[derive(Clone)]
pub struct MutationCoordinator {
    service: Arc<dyn LedgerService>,
}

impl MutationCoordinator {
    pub fn new(service: Arc<dyn LedgerService>) -> Self {
        Self { service }
    }

    /// Replaces the store contents with the service's full listing.
    pub async fn load(&self, store: &mut LedgerStore) -> Result<usize, ServiceError> {
        let records = self.service.list().await?;
        let n = records.len();
        store.load(records);
        Ok(n)
    }

    /// Creates or updates depending on whether the submission carries an id.
    ///
    /// Success upserts the canonical record and returns the session to idle.
    pub async fn save(
        &self,
        store: &mut LedgerStore,
        session: &mut EditSession,
        submission: Submission,
    ) -> Notice {
        let (result, ok_msg) = match &submission.id {
            Some(id) => (self.service.update(id, &submission.draft).await, MSG_UPDATED),
            None => (self.service.create(&submission.draft).await, MSG_ADDED),
        };
        match result {
            Ok(saved) => {
                tracing::info!(id = %saved.id, edit = submission.is_edit(), "transaction saved");
                let id = saved.id.clone();
                store.upsert(saved);
                session.finish();
                Notice::success(ok_msg).with_record(id)
            }
            Err(e) => {
                tracing::warn!(error = %e, edit = submission.is_edit(), "saving transaction failed");
                Notice::error(failure_message(&e, MSG_SAVE_FAILED, MSG_SAVE_TRANSPORT))
            }
        }
    }

    /// Removes `id` from the store once the service confirms the delete.
    pub async fn delete(&self, store: &mut LedgerStore, id: &TransactionId) -> Notice {
        match self.service.delete(id).await {
            Ok(()) => {
                tracing::info!(%id, "transaction deleted");
                store.remove(id);
                Notice::success(MSG_DELETED)
            }
            Err(e) => {
                tracing::warn!(%id, error = %e, "deleting transaction failed");
                Notice::error(failure_message(&e, MSG_DELETE_FAILED, MSG_DELETE_TRANSPORT))
            }
        }
    }
}

fn failure_message(e: &ServiceError, fallback: &str, transport: &str) -> String {
    match e {
        ServiceError::Transport(_) => transport.to_string(),
        other => other.user_message(fallback),
    }
}
