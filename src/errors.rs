// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GoalError>;

#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Goal '{0}' not found")]
    NotFound(String),

    #[error("Goal name '{0}' matches more than one goal; use the id instead")]
    Ambiguous(String),

    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Currency '{0}' is not supported (expected INR or USD)")]
    UnsupportedCurrency(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
