// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::fx::{current_rate, rate_line};
use crate::config::Config;
use crate::currency::format_currency;
use crate::errors::GoalError;
use crate::metrics::{converted_in_other, goal_progress, is_completed, remaining};
use crate::models::{Currency, ExchangeRate, Goal};
use crate::store::{GoalStore, RateStore};
use crate::utils::{fmt_pct, maybe_print_json, parse_currency, parse_decimal, pretty_table};
use crate::validation::validate_goal;
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(
    store: &mut GoalStore,
    rates: &mut RateStore,
    cfg: &Config,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, rates, cfg, sub)?,
        Some(("show", sub)) => show(store, rates, cfg, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut GoalStore, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    let currency = parse_currency(sub.get_one::<String>("currency").unwrap())?;

    let errors = validate_goal(name, target);
    if !errors.is_empty() {
        return Err(GoalError::Validation(errors).into());
    }
    let goal = store.create_goal(name, target, currency);
    println!(
        "Created goal '{}' targeting {} (id {})",
        goal.name,
        format_currency(goal.target_amount, goal.currency),
        goal.id
    );
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRow {
    pub id: String,
    pub name: String,
    pub currency: Currency,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub remaining: Decimal,
    pub progress: Decimal,
    pub completed: bool,
    pub contributions: usize,
    pub other_currency: Currency,
    pub other_target: Decimal,
    pub other_current: Decimal,
}

pub fn goal_row(goal: &Goal, rate: &ExchangeRate) -> GoalRow {
    let (other_target, other_current) = converted_in_other(goal, rate);
    GoalRow {
        id: goal.id.clone(),
        name: goal.name.clone(),
        currency: goal.currency,
        target_amount: goal.target_amount,
        current_amount: goal.current_amount,
        remaining: remaining(goal),
        progress: goal_progress(goal),
        completed: is_completed(goal),
        contributions: goal.contributions.len(),
        other_currency: goal.currency.other(),
        other_target,
        other_current,
    }
}

pub fn query_rows(store: &GoalStore, rate: &ExchangeRate) -> Vec<GoalRow> {
    store.goals().iter().map(|g| goal_row(g, rate)).collect()
}

fn list(
    store: &GoalStore,
    rates: &mut RateStore,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let fetched = current_rate(cfg, rates)?;
    let data = query_rows(store, &fetched.rate);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No goals yet. Create one with `goalclip goal add`.");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = data
        .iter()
        .map(|r| {
            vec![
                r.name.clone(),
                format_currency(r.current_amount, r.currency),
                format_currency(r.target_amount, r.currency),
                fmt_pct(r.progress),
                format!(
                    "{} / {}",
                    format_currency(r.other_current, r.other_currency),
                    format_currency(r.other_target, r.other_currency)
                ),
                if r.completed {
                    "completed".to_string()
                } else {
                    format!("{} to go", format_currency(r.remaining, r.currency))
                },
                r.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Goal", "Saved", "Target", "Progress", "Converted", "Status", "Id"],
            rows
        )
    );
    println!("{}", rate_line(&fetched));
    Ok(())
}

fn show(
    store: &GoalStore,
    rates: &mut RateStore,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let goal = store.find(sub.get_one::<String>("goal").unwrap())?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    if maybe_print_json(json_flag, jsonl_flag, goal)? {
        return Ok(());
    }
    let fetched = current_rate(cfg, rates)?;
    let row = goal_row(goal, &fetched.rate);
    println!("{} ({})", goal.name, goal.id);
    println!(
        "  {} of {} saved ({}), created {}",
        format_currency(row.current_amount, row.currency),
        format_currency(row.target_amount, row.currency),
        fmt_pct(row.progress),
        goal.created_at.format("%Y-%m-%d")
    );
    println!(
        "  = {} of {}",
        format_currency(row.other_current, row.other_currency),
        format_currency(row.other_target, row.other_currency)
    );
    let contribs: Vec<Vec<String>> = goal
        .contributions
        .iter()
        .map(|c| {
            vec![
                c.date.format("%Y-%m-%d").to_string(),
                format_currency(c.amount, goal.currency),
            ]
        })
        .collect();
    if contribs.is_empty() {
        println!("  No contributions yet.");
    } else {
        println!("{}", pretty_table(&["Date", "Amount"], contribs));
    }
    Ok(())
}

fn remove(store: &mut GoalStore, sub: &clap::ArgMatches) -> Result<()> {
    let id = store.find(sub.get_one::<String>("goal").unwrap())?.id.clone();
    if let Some(goal) = store.delete_goal(&id) {
        println!(
            "Removed goal '{}' and its {} contribution(s)",
            goal.name,
            goal.contributions.len()
        );
    }
    Ok(())
}
