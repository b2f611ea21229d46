// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

pub const MAX_GOAL_TARGET: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);
pub const MAX_CONTRIBUTION: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Empty means valid. All violated rules are reported together.
pub fn validate_goal(name: &str, target_amount: Decimal) -> Vec<String> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Goal name is required".to_string());
    }
    if target_amount <= Decimal::ZERO {
        errors.push("Target amount must be greater than zero".to_string());
    }
    if target_amount > MAX_GOAL_TARGET {
        errors.push("Target amount is too large".to_string());
    }
    errors
}

pub fn validate_contribution(amount: Decimal) -> Vec<String> {
    let mut errors = Vec::new();
    if amount <= Decimal::ZERO {
        errors.push("Contribution amount must be greater than zero".to_string());
    }
    if amount > MAX_CONTRIBUTION {
        errors.push("Contribution amount is too large".to_string());
    }
    errors
}
