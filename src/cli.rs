// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn goal_arg() -> Arg {
    Arg::new("goal")
        .long("goal")
        .required(true)
        .help("Goal id or name")
}

pub fn build_cli() -> Command {
    Command::new("goalclip")
        .version(crate_version!())
        .about("Track INR/USD savings goals and contributions")
        .arg(
            Arg::new("db")
                .long("db")
                .global(true)
                .help("Path to the data file (default: platform data dir)"),
        )
        .arg(
            Arg::new("api-key")
                .long("api-key")
                .global(true)
                .help("exchangerate-api.com key (or EXCHANGE_RATE_API_KEY)"),
        )
        .arg(
            Arg::new("offline")
                .long("offline")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Skip the rate provider and use the fallback rate"),
        )
        .subcommand(Command::new("init").about("Create the data store"))
        .subcommand(
            Command::new("goal")
                .about("Manage savings goals")
                .subcommand(
                    Command::new("add")
                        .about("Create a goal")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(
                            Arg::new("currency")
                                .long("currency")
                                .default_value("INR")
                                .help("INR or USD"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List goals")))
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a goal and its contributions")
                        .arg(goal_arg()),
                ))
                .subcommand(Command::new("rm").about("Delete a goal").arg(goal_arg())),
        )
        .subcommand(
            Command::new("contrib")
                .about("Log contributions toward a goal")
                .subcommand(
                    Command::new("add")
                        .about("Add a contribution")
                        .arg(goal_arg())
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD (default: today)"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List a goal's contributions")
                        .arg(goal_arg()),
                )),
        )
        .subcommand(
            Command::new("fx")
                .about("USD/INR exchange rate")
                .subcommand(json_flags(
                    Command::new("fetch").about("Fetch the current rate"),
                ))
                .subcommand(
                    Command::new("convert")
                        .about("Convert an amount between USD and INR")
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("from").long("from").required(true))
                        .arg(Arg::new("to").long("to").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Totals and overall progress"),
        ))
        .subcommand(Command::new("doctor").about("Check stored goals for inconsistencies"))
}
