// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use goalclip::validation::{validate_contribution, validate_goal};
use rust_decimal_macros::dec;

#[test]
fn goal_rules() {
    assert!(validate_goal("Trip", dec!(1000)).is_empty());
    assert!(validate_goal("Max", dec!(10000000)).is_empty());
    assert_eq!(validate_goal("   ", dec!(5)), vec!["Goal name is required"]);
    assert_eq!(
        validate_goal("Trip", dec!(0)),
        vec!["Target amount must be greater than zero"]
    );
    assert_eq!(
        validate_goal("Trip", dec!(10000000.01)),
        vec!["Target amount is too large"]
    );
}

#[test]
fn goal_errors_accumulate() {
    let errs = validate_goal("", dec!(-3));
    assert_eq!(
        errs,
        vec![
            "Goal name is required",
            "Target amount must be greater than zero"
        ]
    );
    assert_eq!(validate_goal(" ", dec!(20000000)).len(), 2);
}

#[test]
fn contribution_rules() {
    assert!(validate_contribution(dec!(0.01)).is_empty());
    assert!(validate_contribution(dec!(1000000)).is_empty());
    assert_eq!(
        validate_contribution(dec!(0)),
        vec!["Contribution amount must be greater than zero"]
    );
    assert_eq!(
        validate_contribution(dec!(-1)),
        vec!["Contribution amount must be greater than zero"]
    );
    assert_eq!(
        validate_contribution(dec!(1000000.5)),
        vec!["Contribution amount is too large"]
    );
}
