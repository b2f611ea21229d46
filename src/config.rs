// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::currency::rate_url;
use std::path::PathBuf;

#[derive(Debug, Clone, Default)]
pub struct Config {
    /// `None` means the platform data dir.
    pub db_path: Option<PathBuf>,
    pub api_key: Option<String>,
    /// Full URL of the rate endpoint, replacing the provider default.
    pub rate_url: Option<String>,
    pub offline: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let non_empty = |k: &str| std::env::var(k).ok().filter(|v| !v.trim().is_empty());
        let offline = std::env::var("GOALCLIP_OFFLINE")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Self {
            db_path: non_empty("GOALCLIP_DB_PATH").map(PathBuf::from),
            api_key: non_empty("EXCHANGE_RATE_API_KEY"),
            rate_url: non_empty("GOALCLIP_RATE_URL"),
            offline,
        }
    }

    /// Applies the global flags of a parsed command line on top of `self`.
    pub fn with_matches(mut self, m: &clap::ArgMatches) -> Self {
        if let Some(p) = m.get_one::<String>("db") {
            self.db_path = Some(PathBuf::from(p.trim()));
        }
        if let Some(k) = m.get_one::<String>("api-key") {
            self.api_key = Some(k.trim().to_string());
        }
        if m.get_flag("offline") {
            self.offline = true;
        }
        self
    }

    pub fn endpoint(&self) -> String {
        self.rate_url
            .clone()
            .unwrap_or_else(|| rate_url(self.api_key.as_deref()))
    }
}
