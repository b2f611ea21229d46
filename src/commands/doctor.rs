// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::Goal;
use crate::store::GoalStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub fn handle(store: &GoalStore) -> Result<()> {
    let rows = check(store.goals());
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

pub fn check(goals: &[Goal]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut seen = HashSet::new();

    for g in goals {
        // 1) Duplicate ids
        if !seen.insert(g.id.as_str()) {
            rows.push(vec!["duplicate_goal_id".into(), g.id.clone()]);
        }

        // 2) Saved amount drifting from its contribution history
        let sum: Decimal = g.contributions.iter().map(|c| c.amount).sum();
        if sum != g.current_amount {
            rows.push(vec![
                "current_amount_mismatch".into(),
                format!("{}: stored {} vs contributions {}", g.name, g.current_amount, sum),
            ]);
        }

        // 3) Contributions filed under another goal
        for c in g.contributions.iter().filter(|c| c.goal_id != g.id) {
            rows.push(vec![
                "foreign_contribution".into(),
                format!("{}: contribution {} points at {}", g.name, c.id, c.goal_id),
            ]);
        }

        if g.target_amount <= Decimal::ZERO {
            rows.push(vec!["non_positive_target".into(), g.name.clone()]);
        }
    }
    rows
}
