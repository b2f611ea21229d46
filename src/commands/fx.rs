// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::currency::{convert, fallback_rate, fetch_rate, format_currency, http_client};
use crate::models::{FetchedRate, RateSource};
use crate::store::RateStore;
use crate::utils::{maybe_print_json, parse_currency, parse_decimal};
use anyhow::Result;

pub fn handle(cfg: &Config, rates: &mut RateStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("fetch", sub)) => {
            let fetched = refresh(cfg, rates)?;
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &fetched)? {
                println!("{}", rate_line(&fetched));
            }
        }
        Some(("convert", sub)) => convert_amount(cfg, rates, sub)?,
        _ => {}
    }
    Ok(())
}

/// Fetches a new rate and makes it current, whatever the outcome.
pub fn refresh(cfg: &Config, rates: &mut RateStore) -> Result<FetchedRate> {
    let fetched = if cfg.offline {
        fallback_rate("offline mode")
    } else {
        let client = http_client()?;
        fetch_rate(&client, &cfg.endpoint())
    };
    rates.replace(fetched.clone());
    Ok(fetched)
}

pub fn current_rate(cfg: &Config, rates: &mut RateStore) -> Result<FetchedRate> {
    match rates.current() {
        Some(r) => Ok(r.clone()),
        None => refresh(cfg, rates),
    }
}

pub fn rate_line(fetched: &FetchedRate) -> String {
    let r = &fetched.rate;
    let mut line = format!(
        "Exchange rate: 1 {} = ₹{:.2} | Last updated: {}",
        r.from_currency,
        r.rate.round_dp(2),
        r.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    );
    if let RateSource::Fallback { reason } = &fetched.source {
        line.push_str(&format!(" (fallback rate: {})", reason));
    }
    line
}

fn convert_amount(cfg: &Config, rates: &mut RateStore, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let from = parse_currency(sub.get_one::<String>("from").unwrap())?;
    let to = parse_currency(sub.get_one::<String>("to").unwrap())?;
    let fetched = current_rate(cfg, rates)?;
    let res = convert(amount, from, to, &fetched.rate);
    println!(
        "{} -> {} ({:.4} {})",
        format_currency(amount, from),
        format_currency(res, to),
        res,
        to
    );
    if fetched.is_fallback() {
        println!("{}", rate_line(&fetched));
    }
    Ok(())
}
