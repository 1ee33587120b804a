// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use pitaka::errors::ServiceError;
use pitaka::models::{Draft, Transaction, TransactionId, TxType};
use pitaka::remote::{error_message_from_body, HttpLedger, LedgerService};
use rust_decimal::Decimal;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

#[test]
fn error_body_message_is_extracted() {
    assert_eq!(
        error_message_from_body(r#"{"error":"Amount required"}"#),
        Some("Amount required".to_string())
    );
    assert_eq!(error_message_from_body(r#"{"error":""}"#), None);
    assert_eq!(error_message_from_body("<html>502</html>"), None);
    assert_eq!(error_message_from_body(r#"{"status":"bad"}"#), None);
}

#[test]
fn user_message_prefers_service_text() {
    assert_eq!(
        ServiceError::remote("Category required").user_message("fallback"),
        "Category required"
    );
    let silent = ServiceError::Remote {
        status: Some(500),
        message: None,
    };
    assert_eq!(silent.user_message("fallback"), "fallback");
    assert_eq!(
        ServiceError::Transport("refused".into()).user_message("fallback"),
        "fallback"
    );
}

#[test]
fn server_records_decode_leniently() {
    let raw = json!([
        {"id": 1, "type": "income", "category": "Salary", "amount": 1000, "date": "2024-03-01"},
        {"id": "65f0c1", "type": "expense", "category": "Food", "amount": "12.5",
         "date": "2024-03-02T00:00:00.000Z", "userId": 4}
    ]);
    let txs: Vec<Transaction> = serde_json::from_value(raw).unwrap();
    assert_eq!(txs[0].id, TransactionId::from(1));
    assert_eq!(txs[0].amount, Decimal::from(1000));
    assert_eq!(txs[1].id.as_str(), "65f0c1");
    assert_eq!(txs[1].r#type, TxType::Expense);
    assert_eq!(txs[1].amount, Decimal::new(125, 1));
    assert_eq!(
        txs[1].date,
        NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
    );
}

#[test]
fn draft_encodes_wire_fields() {
    let d = Draft {
        r#type: TxType::Expense,
        category: "Food".into(),
        amount: Decimal::new(2000, 1),
        date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
    };
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v["type"], "expense");
    assert_eq!(v["category"], "Food");
    assert_eq!(v["amount"], "200.0");
    assert_eq!(v["date"], "2024-03-02");
}

#[test]
fn base_url_is_normalised() {
    let svc = HttpLedger::new(
        "http://localhost:5000/api/",
        None,
        std::time::Duration::from_secs(1),
    )
    .unwrap();
    assert_eq!(svc.base_url(), "http://localhost:5000/api");
}

/// Serves one canned HTTP response on a local port and hands back the raw
/// request it received.
async fn respond_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let handle = tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = sock.read(&mut chunk).await.unwrap();
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let len = text[..end]
                    .lines()
                    .find_map(|l| {
                        let (k, v) = l.split_once(':')?;
                        k.eq_ignore_ascii_case("content-length")
                            .then(|| v.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len || n == 0 {
                    break;
                }
            } else if n == 0 {
                break;
            }
        }
        sock.write_all(response.as_bytes()).await.unwrap();
        sock.shutdown().await.unwrap();
        String::from_utf8_lossy(&buf).to_string()
    });
    (base, handle)
}

fn ledger(base: &str) -> HttpLedger {
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .unwrap();
    HttpLedger::with_client(client, base, Some("sid=abc".to_string()))
}

fn food_draft() -> Draft {
    Draft {
        r#type: TxType::Expense,
        category: "Food".into(),
        amount: Decimal::new(1250, 2),
        date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
    }
}

#[tokio::test]
async fn create_posts_draft_with_cookie() {
    let (base, server) = respond_once(
        "201 Created",
        r#"{"id":7,"type":"expense","category":"Food","amount":"12.50","date":"2024-03-02T00:00:00.000Z"}"#,
    )
    .await;
    let saved = ledger(&base).create(&food_draft()).await.unwrap();
    assert_eq!(saved.id, TransactionId::from(7));
    assert_eq!(saved.amount, Decimal::new(1250, 2));
    assert_eq!(saved.date, NaiveDate::from_ymd_opt(2024, 3, 2).unwrap());

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /api/transaction HTTP/1.1"));
    assert!(request.to_ascii_lowercase().contains("cookie: sid=abc"));
    assert!(request.contains(r#""category":"Food""#));
}

#[tokio::test]
async fn error_status_carries_service_message() {
    let (base, server) = respond_once("400 Bad Request", r#"{"error":"Amount required"}"#).await;
    let err = ledger(&base).create(&food_draft()).await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Remote {
            status: Some(400),
            message: Some("Amount required".into()),
        }
    );
    assert!(server.await.unwrap().starts_with("POST /api/transaction "));
}

#[tokio::test]
async fn error_status_without_json_has_no_message() {
    let (base, server) = respond_once("500 Internal Server Error", "<html>oops</html>").await;
    let err = ledger(&base)
        .delete(&TransactionId::from("65f0c1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ServiceError::Remote {
            status: Some(500),
            message: None,
        }
    );
    assert!(server.await.unwrap().starts_with("DELETE /api/transaction/65f0c1 "));
}

#[tokio::test]
async fn update_puts_to_record_path() {
    let (base, server) = respond_once(
        "200 OK",
        r#"{"id":"65f0c1","type":"expense","category":"Food","amount":"12.5","date":"2024-03-02"}"#,
    )
    .await;
    let saved = ledger(&base)
        .update(&TransactionId::from("65f0c1"), &food_draft())
        .await
        .unwrap();
    assert_eq!(saved.id.as_str(), "65f0c1");
    assert!(server.await.unwrap().starts_with("PUT /api/transaction/65f0c1 "));
}

#[tokio::test]
async fn malformed_listing_is_a_decode_error() {
    let (base, server) = respond_once("200 OK", "not json").await;
    let err = ledger(&base).list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)), "{:?}", err);
    assert!(server.await.unwrap().starts_with("GET /api/transactions "));
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}/api", listener.local_addr().unwrap());
    drop(listener);
    let err = ledger(&base).list().await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)), "{:?}", err);
}
