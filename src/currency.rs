// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Currency, ExchangeRate, FetchedRate, RateSource};
use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::Value;

const UA: &str = concat!(
    "goalclip/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/alphavelocity/goalclip)"
);

const KEYED_API_URL: &str = "https://v6.exchangerate-api.com/v6";
const OPEN_API_URL: &str = "https://api.exchangerate-api.com/v4/latest/USD";

/// INR per 1 USD used whenever the provider cannot be reached or parsed.
pub const FALLBACK_RATE: Decimal = Decimal::from_parts(835, 0, 0, false, 1);

pub fn http_client() -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn rate_url(api_key: Option<&str>) -> String {
    match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => format!("{KEYED_API_URL}/{key}/latest/USD"),
        None => OPEN_API_URL.to_string(),
    }
}

/// One GET, no retry. Any failure degrades to [`FALLBACK_RATE`], tagged as
/// such in the returned [`RateSource`].
pub fn fetch_rate(client: &reqwest::blocking::Client, url: &str) -> FetchedRate {
    match request_rate(client, url) {
        Ok(rate) => {
            tracing::debug!(%rate, "Live USD/INR rate fetched");
            FetchedRate {
                rate: usd_inr(rate),
                source: RateSource::Live,
            }
        }
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::warn!(error = %reason, "Error fetching live exchange rate, using fallback");
            fallback_rate(reason)
        }
    }
}

pub fn fallback_rate(reason: impl Into<String>) -> FetchedRate {
    FetchedRate {
        rate: usd_inr(FALLBACK_RATE),
        source: RateSource::Fallback {
            reason: reason.into(),
        },
    }
}

fn usd_inr(rate: Decimal) -> ExchangeRate {
    ExchangeRate {
        rate,
        last_updated: Utc::now(),
        from_currency: Currency::Usd,
        to_currency: Currency::Inr,
    }
}

fn request_rate(client: &reqwest::blocking::Client, url: &str) -> Result<Decimal> {
    let resp = client.get(url).send()?.error_for_status()?;
    let body: Value = resp.json().context("Rate response is not JSON")?;
    parse_inr_rate(&body).context("INR rate not found in response")
}

/// Reads `conversion_rates.INR`, then `rates.INR`. Zero, negative and
/// non-numeric values count as missing.
pub fn parse_inr_rate(body: &Value) -> Option<Decimal> {
    ["conversion_rates", "rates"]
        .iter()
        .find_map(|field| body.get(field).and_then(|m| m.get("INR")).and_then(positive_decimal))
}

fn positive_decimal(v: &Value) -> Option<Decimal> {
    let Value::Number(n) = v else {
        return None;
    };
    let d = n
        .to_string()
        .parse::<Decimal>()
        .ok()
        .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok()))?;
    (d > Decimal::ZERO).then_some(d)
}

/// Linear conversion over the USD/INR pair, no rounding.
pub fn convert(amount: Decimal, from: Currency, to: Currency, rate: &ExchangeRate) -> Decimal {
    match (from, to) {
        (Currency::Usd, Currency::Inr) => amount * rate.rate,
        (Currency::Inr, Currency::Usd) => {
            if rate.rate.is_zero() {
                return amount;
            }
            amount / rate.rate
        }
        _ => amount,
    }
}

pub fn currency_symbol(currency: Currency) -> &'static str {
    match currency {
        Currency::Inr => "₹",
        Currency::Usd => "$",
    }
}

/// en-US style grouping for both currencies: `$1,234.50`, `₹123,457`.
pub fn format_currency(amount: Decimal, currency: Currency) -> String {
    let dp: u32 = match currency {
        Currency::Inr => 0,
        Currency::Usd => 2,
    };
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };
    let mut out = format!("{sign}{}{}", currency_symbol(currency), group_thousands(int_part));
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
