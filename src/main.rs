// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use goalclip::config::Config;
use goalclip::db::{self, KvStore, MemoryStore};
use goalclip::store::{GoalStore, RateStore};
use goalclip::{cli, commands};

fn init_tracing() {
    let log_format = std::env::var("GOALCLIP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

/// Falls back to an in-memory backend when the data file is unusable, so the
/// session still works but nothing is saved.
fn open_backend(cfg: &Config) -> Box<dyn KvStore> {
    let opened = match &cfg.db_path {
        Some(p) => db::open_or_init(p),
        None => db::db_path().and_then(|p| db::open_or_init(&p)),
    };
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::warn!(error = %reason, "Storage unavailable; changes will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    let cfg = Config::from_env().with_matches(&matches);

    let mut goals = GoalStore::open(open_backend(&cfg));
    let mut rates = RateStore::new();

    match matches.subcommand() {
        Some(("init", _)) => match &cfg.db_path {
            Some(p) => println!("Data store ready at {}", p.display()),
            None => println!("Data store ready at {}", db::db_path()?.display()),
        },
        Some(("goal", sub)) => commands::goals::handle(&mut goals, &mut rates, &cfg, sub)?,
        Some(("contrib", sub)) => commands::contributions::handle(&mut goals, sub)?,
        Some(("fx", sub)) => commands::fx::handle(&cfg, &mut rates, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&goals, &mut rates, &cfg, sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&goals)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
