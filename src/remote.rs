// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, Response};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::models::{Draft, Transaction, TransactionId};
use crate::utils::http_client;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// The store of record for transactions. Every call returns the
/// service's canonical view of the data.
#[async_trait]
pub trait LedgerService: Send + Sync {
    async fn list(&self) -> Result<Vec<Transaction>, ServiceError>;

    async fn create(&self, draft: &Draft) -> Result<Transaction, ServiceError>;

    async fn update(&self, id: &TransactionId, draft: &Draft)
        -> Result<Transaction, ServiceError>;

    async fn delete(&self, id: &TransactionId) -> Result<(), ServiceError>;
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Pulls the `error` field out of a failed response body, if there is one.
pub fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|m| !m.trim().is_empty())
}

/// JSON-over-HTTP binding of [`LedgerService`].
pub struct HttpLedger {
    client: reqwest::Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl HttpLedger {
    pub fn new(base_url: &str, session_cookie: Option<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(http_client(timeout)?, base_url, session_cookie))
    }

    /// Uses a caller-built client, e.g. one with custom proxy settings.
    pub fn with_client(
        client: reqwest::Client,
        base_url: &str,
        session_cookie: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "ledger request");
        let req = self.client.request(method, url);
        match &self.session_cookie {
            Some(c) => req.header(header::COOKIE, c),
            None => req,
        }
    }

    async fn check(resp: Response) -> Result<Response, ServiceError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ServiceError::Remote {
            status: Some(status.as_u16()),
            message: error_message_from_body(&body),
        })
    }
}

#[async_trait]
impl LedgerService for HttpLedger {
    async fn list(&self) -> Result<Vec<Transaction>, ServiceError> {
        let resp = self.request(Method::GET, "/transactions").send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn create(&self, draft: &Draft) -> Result<Transaction, ServiceError> {
        let resp = self
            .request(Method::POST, "/transaction")
            .json(draft)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn update(
        &self,
        id: &TransactionId,
        draft: &Draft,
    ) -> Result<Transaction, ServiceError> {
        let resp = self
            .request(Method::PUT, &format!("/transaction/{}", id))
            .json(draft)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), ServiceError> {
        let resp = self
            .request(Method::DELETE, &format!("/transaction/{}", id))
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }
}
