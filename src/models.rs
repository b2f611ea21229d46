// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::GoalError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "INR")]
    Inr,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// The opposite side of the USD/INR pair.
    pub fn other(&self) -> Currency {
        match self {
            Currency::Inr => Currency::Usd,
            Currency::Usd => Currency::Inr,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            other => Err(GoalError::UnsupportedCurrency(other.to_string())),
        }
    }
}

/// Amounts in the persisted blob are exact JSON numbers, never rounded
/// through `f64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub target_amount: Decimal,
    pub currency: Currency,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub current_amount: Decimal, // always the sum of `contributions`
    pub contributions: Vec<Contribution>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub id: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub goal_id: String,
}

/// 1 `from_currency` = `rate` `to_currency`. Fixed to USD -> INR here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub rate: Decimal,
    pub last_updated: DateTime<Utc>,
    pub from_currency: Currency,
    pub to_currency: Currency,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RateSource {
    Live,
    Fallback { reason: String },
}

/// An exchange rate together with where it came from, so callers can flag
/// degraded data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedRate {
    pub rate: ExchangeRate,
    pub source: RateSource,
}

impl FetchedRate {
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, RateSource::Fallback { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_target: Decimal,
    pub total_saved: Decimal,
    pub overall_progress: Decimal,
    pub goal_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CurrencyPair {
    pub inr: Decimal,
    pub usd: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DualTotals {
    pub target: CurrencyPair,
    pub saved: CurrencyPair,
}
