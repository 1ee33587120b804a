// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Chart colors per category and per transaction type.
//!
//! A color is picked at random the first time a key is seen and then kept
//! for the rest of the session; only an explicit override changes it.

use std::collections::hash_map::RandomState;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::str::FromStr;

use serde::Serialize;

use crate::aggregate::CategoryTotal;
use crate::models::TxType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid color '{}', expected #rrggbb", s));
        }
        u32::from_str_radix(hex, 16)
            .map(Color)
            .map_err(|_| format!("Invalid color '{}', expected #rrggbb", s))
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColoredCategory {
    pub category: String,
    pub amount: rust_decimal::Decimal,
    pub color: Color,
}

#[derive(Debug, Clone)]
pub struct ColorTable {
    state: u64,
    categories: HashMap<String, Color>,
    trend: HashMap<TxType, Color>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorTable {
    pub fn new() -> Self {
        Self::with_seed(RandomState::new().hash_one(0x5eed_u64))
    }

    /// Deterministic sequence of colors for the same seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            // xorshift is stuck at zero
            state: if seed == 0 { 0x9e37_79b9_7f4a_7c15 } else { seed },
            categories: HashMap::new(),
            trend: HashMap::new(),
        }
    }

    fn next_color(&mut self) -> Color {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        Color((x >> 40) as u32 & 0x00ff_ffff)
    }

    /// Color for `category`, assigning one on first sight.
    pub fn category(&mut self, category: &str) -> Color {
        if let Some(c) = self.categories.get(category) {
            return *c;
        }
        let c = self.next_color();
        self.categories.insert(category.to_string(), c);
        c
    }

    pub fn set_category(&mut self, category: &str, color: Color) {
        self.categories.insert(category.to_string(), color);
    }

    pub fn trend(&mut self, kind: TxType) -> Color {
        if let Some(c) = self.trend.get(&kind) {
            return *c;
        }
        let c = self.next_color();
        self.trend.insert(kind, c);
        c
    }

    pub fn set_trend(&mut self, kind: TxType, color: Color) {
        self.trend.insert(kind, color);
    }

    /// Pairs each category total with its (possibly newly assigned) color.
    pub fn paint(&mut self, totals: &[CategoryTotal]) -> Vec<ColoredCategory> {
        totals
            .iter()
            .map(|t| ColoredCategory {
                category: t.category.clone(),
                amount: t.amount,
                color: self.category(&t.category),
            })
            .collect()
    }
}
