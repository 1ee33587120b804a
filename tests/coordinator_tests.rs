// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use std::sync::Arc;

use chrono::NaiveDate;
use common::{march_ledger, FakeLedger};
use pitaka::coordinator::{
    MutationCoordinator, MSG_ADDED, MSG_DELETED, MSG_SAVE_FAILED, MSG_SAVE_TRANSPORT, MSG_UPDATED,
};
use pitaka::errors::ServiceError;
use pitaka::models::{Draft, Submission, TransactionId, TxType};
use pitaka::notice::NoticeKind;
use pitaka::session::EditSession;
use pitaka::store::LedgerStore;
use rust_decimal::Decimal;

fn draft(category: &str, amount: i64, date: &str) -> Draft {
    Draft {
        r#type: TxType::Expense,
        category: category.into(),
        amount: Decimal::from(amount),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
    }
}

async fn setup() -> (Arc<FakeLedger>, MutationCoordinator, LedgerStore) {
    let fake = Arc::new(FakeLedger::new(march_ledger()));
    let coord = MutationCoordinator::new(fake.clone());
    let mut store = LedgerStore::new();
    coord.load(&mut store).await.unwrap();
    (fake, coord, store)
}

#[tokio::test]
async fn create_appends_canonical_record_and_idles_session() {
    let (fake, coord, mut store) = setup().await;
    let mut session = EditSession::Idle;

    let notice = coord
        .save(
            &mut store,
            &mut session,
            Submission {
                id: None,
                draft: draft("Transport", 50, "2024-03-03"),
            },
        )
        .await;

    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(notice.message, MSG_ADDED);
    assert_eq!(notice.record_id, Some(TransactionId::from(3)));
    assert_eq!(store.len(), 3);
    assert!(store.contains(&TransactionId::from(3)));
    assert_eq!(session, EditSession::Idle);
    assert_eq!(fake.calls(), vec!["list", "create"]);
}

#[tokio::test]
async fn update_replaces_record_and_finishes_edit() {
    let (_fake, coord, mut store) = setup().await;
    let mut session = EditSession::Idle;
    session.begin(store.get(&TransactionId::from(2)).cloned().unwrap());

    let notice = coord
        .save(
            &mut store,
            &mut session,
            Submission {
                id: Some(TransactionId::from(2)),
                draft: draft("Groceries", 250, "2024-03-02"),
            },
        )
        .await;

    assert_eq!(notice.message, MSG_UPDATED);
    assert_eq!(store.len(), 2);
    let rec = store.get(&TransactionId::from(2)).unwrap();
    assert_eq!(rec.category, "Groceries");
    assert_eq!(rec.amount, Decimal::from(250));
    assert!(!session.is_editing());
}

#[tokio::test]
async fn service_error_keeps_store_and_session() {
    let (fake, coord, mut store) = setup().await;
    let original = store.get(&TransactionId::from(1)).cloned().unwrap();
    let mut session = EditSession::Editing(original.clone());
    let before = store.records().to_vec();

    fake.fail_next(ServiceError::remote("Amount required"));
    let notice = coord
        .save(
            &mut store,
            &mut session,
            Submission {
                id: Some(TransactionId::from(1)),
                draft: draft("Salary", 0, "2024-03-01"),
            },
        )
        .await;

    assert_eq!(notice.kind, NoticeKind::Error);
    assert_eq!(notice.message, "Amount required");
    assert_eq!(store.records(), before.as_slice());
    assert_eq!(session, EditSession::Editing(original));
}

#[tokio::test]
async fn error_without_message_uses_fallback() {
    let (fake, coord, mut store) = setup().await;
    let mut session = EditSession::Idle;

    fake.fail_next(ServiceError::Remote {
        status: Some(500),
        message: None,
    });
    let notice = coord
        .save(
            &mut store,
            &mut session,
            Submission {
                id: None,
                draft: draft("Food", 10, "2024-03-04"),
            },
        )
        .await;
    assert_eq!(notice.message, MSG_SAVE_FAILED);

    fake.fail_next(ServiceError::Transport("connection refused".into()));
    let notice = coord
        .save(
            &mut store,
            &mut session,
            Submission {
                id: None,
                draft: draft("Food", 10, "2024-03-04"),
            },
        )
        .await;
    assert_eq!(notice.message, MSG_SAVE_TRANSPORT);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn delete_then_repeat_delete() {
    let (_fake, coord, mut store) = setup().await;
    let id = TransactionId::from(2);

    let first = coord.delete(&mut store, &id).await;
    assert_eq!(first.kind, NoticeKind::Success);
    assert_eq!(first.message, MSG_DELETED);
    assert!(!store.contains(&id));

    let second = coord.delete(&mut store, &id).await;
    assert_eq!(second.kind, NoticeKind::Error);
    assert_eq!(second.message, "Transaction not found");
    assert!(!store.contains(&id));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn failed_delete_leaves_store_untouched() {
    let (fake, coord, mut store) = setup().await;
    fake.fail_next(ServiceError::Transport("timed out".into()));
    let notice = coord.delete(&mut store, &TransactionId::from(1)).await;
    assert!(notice.is_error());
    assert_eq!(store.len(), 2);
}
