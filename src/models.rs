// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::ValidationError;
use crate::utils::{de_iso_date, parse_date};

/// Largest amount a form accepts (10^15). Keeps monthly sums far from the
/// `Decimal` range limit.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xa4c6_8000, 0x0003_8d7e, 0, false, 0);

/// Opaque identifier handed out by the ledger service.
///
/// Servers disagree on whether ids are numbers or strings, so both are
/// accepted on the wire and kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for TransactionId {
    fn from(v: i64) -> Self {
        Self(v.to_string())
    }
}

impl From<&str> for TransactionId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for TransactionId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl<'de> Deserialize<'de> for TransactionId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Text(String),
        }
        Ok(match Raw::deserialize(d)? {
            Raw::Int(i) => Self::from(i),
            Raw::Text(s) => Self(s),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxType {
    Income,
    Expense,
}

impl TxType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
        }
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxType::Income),
            "expense" => Ok(TxType::Expense),
            other => Err(format!("Unknown transaction type '{}' (use income|expense)", other)),
        }
    }
}

/// A persisted income or expense record, as confirmed by the ledger service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub r#type: TxType,
    pub category: String,
    pub amount: Decimal,
    #[serde(deserialize_with = "de_iso_date")]
    pub date: NaiveDate,
}

/// Validated payload sent to the service on create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub r#type: TxType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// A draft paired with the id it replaces, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub id: Option<TransactionId>,
    pub draft: Draft,
}

impl Submission {
    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// Raw form input. Amount and date arrive as text and are only coerced by
/// [`TransactionForm::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionForm {
    pub r#type: TxType,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            r#type: TxType::Expense,
            category: String::new(),
            amount: String::new(),
            date: String::new(),
        }
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(t: &Transaction) -> Self {
        Self {
            r#type: t.r#type,
            category: t.category.clone(),
            amount: t.amount.to_string(),
            date: t.date.to_string(),
        }
    }
}

impl TransactionForm {
    pub fn validate(&self) -> Result<Draft, ValidationError> {
        let category = self.category.trim();
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }
        let amount_s = self.amount.trim();
        if amount_s.is_empty() {
            return Err(ValidationError::MissingAmount);
        }
        let date_s = self.date.trim();
        if date_s.is_empty() {
            return Err(ValidationError::MissingDate);
        }

        let amount = amount_s
            .parse::<Decimal>()
            .map_err(|_| ValidationError::InvalidAmount(amount_s.to_string()))?;
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::NegativeAmount(amount_s.to_string()));
        }
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooLarge(amount_s.to_string()));
        }
        let date =
            parse_date(date_s).map_err(|_| ValidationError::InvalidDate(date_s.to_string()))?;

        Ok(Draft {
            r#type: self.r#type,
            category: category.to_string(),
            amount: amount.normalize(),
            date,
        })
    }
}
