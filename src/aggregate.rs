// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Month/year filtering and the summaries derived from it.
//!
//! Everything here is a pure function of the records and the selected
//! period. Amounts are `Decimal`, so totals carry no rounding drift. Sums
//! that would leave the `Decimal` range saturate instead of panicking.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TxType};

/// Selected month (0-indexed, January = 0) and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Period {
    month0: u32,
    year: i32,
}

impl Period {
    /// Returns `None` unless `month0` is in `0..12`.
    pub fn new(month0: u32, year: i32) -> Option<Self> {
        (month0 < 12).then_some(Self { month0, year })
    }

    /// The period containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month0: date.month0(),
            year: date.year(),
        }
    }

    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month0() == self.month0 && date.year() == self.year
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month0 + 1)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub income: Decimal,
    pub expense: Decimal,
}

/// `acc + amount`, clamped to the `Decimal` range.
fn accumulate(acc: Decimal, amount: Decimal) -> Decimal {
    acc.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(%acc, %amount, "amount sum out of range, saturating");
        acc.saturating_add(amount)
    })
}

pub fn filter<'a, I>(records: I, period: Period) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    records
        .into_iter()
        .filter(|t| period.contains(t.date))
        .collect()
}

pub fn totals(records: &[&Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in records {
        match t.r#type {
            TxType::Income => income = accumulate(income, t.amount),
            TxType::Expense => expense = accumulate(expense, t.amount),
        }
    }
    Totals {
        income,
        expense,
        balance: income.saturating_sub(expense),
    }
}

/// Expense totals per category, in first-seen order.
pub fn category_totals(records: &[&Transaction]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in records.iter().filter(|t| t.r#type == TxType::Expense) {
        match index.get(t.category.as_str()) {
            Some(&i) => out[i].amount = accumulate(out[i].amount, t.amount),
            None => {
                index.insert(t.category.as_str(), out.len());
                out.push(CategoryTotal {
                    category: t.category.clone(),
                    amount: t.amount,
                });
            }
        }
    }
    out
}

/// Income and expense per distinct date, ascending.
pub fn trend(records: &[&Transaction]) -> Vec<TrendPoint> {
    let mut by_date: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in records {
        let entry = by_date
            .entry(t.date)
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.r#type {
            TxType::Income => entry.0 = accumulate(entry.0, t.amount),
            TxType::Expense => entry.1 = accumulate(entry.1, t.amount),
        }
    }
    by_date
        .into_iter()
        .map(|(date, (income, expense))| TrendPoint {
            date,
            income,
            expense,
        })
        .collect()
}

/// Everything the dashboard shows for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedView {
    pub period: Period,
    pub transactions: Vec<Transaction>,
    pub totals: Totals,
    pub categories: Vec<CategoryTotal>,
    pub trend: Vec<TrendPoint>,
}

impl DerivedView {
    pub fn compute(records: &[Transaction], period: Period) -> Self {
        let filtered = filter(records, period);
        Self {
            period,
            totals: totals(&filtered),
            categories: category_totals(&filtered),
            trend: trend(&filtered),
            transactions: filtered.into_iter().cloned().collect(),
        }
    }
}
