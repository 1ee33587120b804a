// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::TransactionId;

/// Reasons a form is rejected before anything is sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Category is required")]
    MissingCategory,
    #[error("Amount is required")]
    MissingAmount,
    #[error("Date is required")]
    MissingDate,
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must not be negative, got '{0}'")]
    NegativeAmount(String),
    #[error("Amount '{0}' exceeds the maximum of 1000000000000000")]
    AmountTooLarge(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service answered with an error status, optionally carrying a
    /// human-readable `error` message.
    #[error("service error: {}", .message.as_deref().unwrap_or("no message"))]
    Remote {
        status: Option<u16>,
        message: Option<String>,
    },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not decode service response: {0}")]
    Decode(String),
    #[error("Transaction {0} not found")]
    NotFound(TransactionId),
}

impl ServiceError {
    pub fn remote(message: impl Into<String>) -> Self {
        ServiceError::Remote {
            status: None,
            message: Some(message.into()),
        }
    }

    /// Text to show the user: the service's own message when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ServiceError::Remote {
                message: Some(m), ..
            } if !m.trim().is_empty() => m.clone(),
            ServiceError::NotFound(_) => self.to_string(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ServiceError::Decode(e.to_string())
        } else {
            ServiceError::Transport(e.to_string())
        }
    }
}

impl From<rusqlite::Error> for ServiceError {
    fn from(e: rusqlite::Error) -> Self {
        ServiceError::Remote {
            status: None,
            message: Some(format!("Storage error: {}", e)),
        }
    }
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Transaction {0} is not in the ledger")]
    UnknownTransaction(TransactionId),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine platform-specific config dir")]
    NoHomeDir,
    #[error("Failed to read config at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
