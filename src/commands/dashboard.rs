// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::fx::{current_rate, rate_line};
use crate::config::Config;
use crate::currency::format_currency;
use crate::metrics::{dashboard_stats, dual_currency_totals};
use crate::models::{Currency, DashboardStats, DualTotals, FetchedRate};
use crate::store::{GoalStore, RateStore};
use crate::utils::{fmt_pct, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub totals: DualTotals,
    pub rate: FetchedRate,
}

pub fn build(store: &GoalStore, rate: FetchedRate) -> Dashboard {
    Dashboard {
        stats: dashboard_stats(store.goals()),
        totals: dual_currency_totals(store.goals(), &rate.rate),
        rate,
    }
}

pub fn handle(
    store: &GoalStore,
    rates: &mut RateStore,
    cfg: &Config,
    m: &clap::ArgMatches,
) -> Result<()> {
    let fetched = current_rate(cfg, rates)?;
    let d = build(store, fetched);
    if maybe_print_json(m.get_flag("json"), m.get_flag("jsonl"), &d)? {
        return Ok(());
    }
    let rows = vec![
        vec!["Goals".to_string(), d.stats.goal_count.to_string()],
        vec![
            "Total target".to_string(),
            format!(
                "{} / {}",
                format_currency(d.totals.target.inr, Currency::Inr),
                format_currency(d.totals.target.usd, Currency::Usd)
            ),
        ],
        vec![
            "Total saved".to_string(),
            format!(
                "{} / {}",
                format_currency(d.totals.saved.inr, Currency::Inr),
                format_currency(d.totals.saved.usd, Currency::Usd)
            ),
        ],
        vec![
            "Overall progress (mean of goals)".to_string(),
            fmt_pct(d.stats.overall_progress),
        ],
    ];
    println!("{}", pretty_table(&["Metric", "Value"], rows));
    println!("{}", rate_line(&d.rate));
    Ok(())
}
