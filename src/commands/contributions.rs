// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::format_currency;
use crate::errors::GoalError;
use crate::metrics::goal_progress;
use crate::store::GoalStore;
use crate::utils::{day_start_utc, fmt_pct, maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::validation::validate_contribution;
use anyhow::Result;
use chrono::Utc;

pub fn handle(store: &mut GoalStore, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &mut GoalStore, sub: &clap::ArgMatches) -> Result<()> {
    let goal_id = store.find(sub.get_one::<String>("goal").unwrap())?.id.clone();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let today = Utc::now().date_naive();
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today,
    };

    let mut errors = validate_contribution(amount);
    if date > today {
        errors.push("Contribution date cannot be in the future".to_string());
    }
    if !errors.is_empty() {
        return Err(GoalError::Validation(errors).into());
    }

    store.add_contribution(&goal_id, amount, day_start_utc(date))?;
    if let Some(goal) = store.get(&goal_id) {
        println!(
            "Added {} to '{}' on {}: {} of {} ({})",
            format_currency(amount, goal.currency),
            goal.name,
            date,
            format_currency(goal.current_amount, goal.currency),
            format_currency(goal.target_amount, goal.currency),
            fmt_pct(goal_progress(goal))
        );
    }
    Ok(())
}

fn list(store: &GoalStore, sub: &clap::ArgMatches) -> Result<()> {
    let goal = store.find(sub.get_one::<String>("goal").unwrap())?;
    if maybe_print_json(
        sub.get_flag("json"),
        sub.get_flag("jsonl"),
        &goal.contributions,
    )? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = goal
        .contributions
        .iter()
        .map(|c| {
            vec![
                c.date.format("%Y-%m-%d").to_string(),
                format_currency(c.amount, goal.currency),
                c.id.clone(),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Date", "Amount", "Id"], rows));
    Ok(())
}
