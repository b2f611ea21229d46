// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Goal list persistence: the whole list is one JSON blob under a fixed key.
//!
//! Failures here never reach the caller. A failed write leaves the previous
//! blob in place and a failed read yields an empty list; both are logged.

use crate::db::KvStore;
use crate::errors::Result;
use crate::models::Goal;

pub const GOALS_KEY: &str = "savings_planner_goals";

pub fn save_goals(store: &mut dyn KvStore, goals: &[Goal]) {
    if let Err(e) = try_save(store, goals) {
        tracing::warn!(error = %e, "Failed to persist goals; changes are in memory only");
    }
}

fn try_save(store: &mut dyn KvStore, goals: &[Goal]) -> Result<()> {
    let blob = serde_json::to_string(goals)?;
    store.set(GOALS_KEY, &blob)?;
    tracing::debug!(goals = goals.len(), bytes = blob.len(), "Goals saved");
    Ok(())
}

/// Dates come back as `DateTime<Utc>` values for goals and every nested
/// contribution.
pub fn load_goals(store: &dyn KvStore) -> Vec<Goal> {
    match try_load(store) {
        Ok(goals) => goals,
        Err(e) => {
            tracing::error!(error = %e, "Error loading goals; starting empty");
            Vec::new()
        }
    }
}

fn try_load(store: &dyn KvStore) -> Result<Vec<Goal>> {
    let Some(blob) = store.get(GOALS_KEY)? else {
        return Ok(Vec::new());
    };
    if blob.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&blob)?)
}
