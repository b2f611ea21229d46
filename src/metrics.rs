// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::convert;
use crate::models::{Currency, CurrencyPair, DashboardStats, DualTotals, ExchangeRate, Goal};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Percent of target reached, capped at 100. A zero target yields 0.
pub fn goal_progress(goal: &Goal) -> Decimal {
    if goal.target_amount.is_zero() {
        return Decimal::ZERO;
    }
    if goal.target_amount > Decimal::ZERO && goal.current_amount >= goal.target_amount {
        return HUNDRED;
    }
    // overflow only happens for ratios far above 100
    goal.current_amount
        .checked_div(goal.target_amount)
        .and_then(|r| r.checked_mul(HUNDRED))
        .map_or(HUNDRED, |p| p.min(HUNDRED))
}

pub fn is_completed(goal: &Goal) -> bool {
    goal_progress(goal) >= HUNDRED
}

pub fn remaining(goal: &Goal) -> Decimal {
    (goal.target_amount - goal.current_amount).max(Decimal::ZERO)
}

/// Totals are summed in each goal's own currency, so mixed INR/USD lists
/// add unlike units. `overall_progress` is the plain mean of per-goal
/// progress, NOT saved/target over the totals: a small finished goal weighs
/// exactly as much as a large untouched one.
pub fn dashboard_stats(goals: &[Goal]) -> DashboardStats {
    let total_target = goals.iter().map(|g| g.target_amount).sum();
    let total_saved = goals.iter().map(|g| g.current_amount).sum();
    let overall_progress = if goals.is_empty() {
        Decimal::ZERO
    } else {
        let sum: Decimal = goals.iter().map(goal_progress).sum();
        sum / Decimal::from(goals.len())
    };
    DashboardStats {
        total_target,
        total_saved,
        overall_progress,
        goal_count: goals.len(),
    }
}

/// (target, current) expressed in the goal's opposite currency.
pub fn converted_in_other(goal: &Goal, rate: &ExchangeRate) -> (Decimal, Decimal) {
    let other = goal.currency.other();
    (
        convert(goal.target_amount, goal.currency, other, rate),
        convert(goal.current_amount, goal.currency, other, rate),
    )
}

/// Every goal's target and saved amount converted into both currencies and
/// summed.
pub fn dual_currency_totals(goals: &[Goal], rate: &ExchangeRate) -> DualTotals {
    let mut totals = DualTotals::default();
    for g in goals {
        add_both(&mut totals.target, g.target_amount, g.currency, rate);
        add_both(&mut totals.saved, g.current_amount, g.currency, rate);
    }
    totals
}

fn add_both(pair: &mut CurrencyPair, amount: Decimal, ccy: Currency, rate: &ExchangeRate) {
    pair.inr += convert(amount, ccy, Currency::Inr, rate);
    pair.usd += convert(amount, ccy, Currency::Usd, rate);
}
