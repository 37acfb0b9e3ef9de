// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn as_of_arg() -> Arg {
    Arg::new("as-of")
        .long("as-of")
        .value_name("YYYY-MM-DD")
        .help("Evaluate dates relative to this day instead of today")
}

fn band_arg() -> Arg {
    Arg::new("band")
        .long("band")
        .value_name("FRACTION")
        .help("Half-width of the price band, e.g. 0.10 for ±10%")
}

fn steps_arg() -> Arg {
    Arg::new("steps")
        .long("steps")
        .value_name("N")
        .value_parser(value_parser!(u32))
        .help("Number of intervals; the table has N+1 rows")
}

fn order_arg() -> Arg {
    Arg::new("order")
        .long("order")
        .value_parser(["newest", "oldest"])
        .help("Sort lots by vest date")
}

fn export_target(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("format")
                .long("format")
                .required(true)
                .value_parser(["csv", "json"]),
        )
        .arg(Arg::new("out").long("out").required(true).value_name("PATH"))
}

pub fn build_cli() -> Command {
    Command::new("vestplan")
        .version(crate_version!())
        .about("Equity vest valuation, hold/sell split, and lot history")
        .arg(
            Arg::new("file")
                .long("file")
                .global(true)
                .value_name("PATH")
                .help("Vest fixture to load (default: $VESTPLAN_DATA or the data dir)"),
        )
        .subcommand(Command::new("init").about("Write a sample vest fixture to the data dir"))
        .subcommand(
            json_args(
                Command::new("summary").about("Vest details with the recommended hold/sell split"),
            )
            .arg(as_of_arg()),
        )
        .subcommand(json_args(
            Command::new("tax").about("Withholding breakdown and net value"),
        ))
        .subcommand(
            json_args(Command::new("range").about("Net value across a band of stock prices"))
                .arg(band_arg())
                .arg(steps_arg()),
        )
        .subcommand(
            json_args(Command::new("history").about("Past lots with realized/unrealized gain"))
                .arg(order_arg()),
        )
        .subcommand(
            json_args(Command::new("timeline").about("Upcoming trade windows, deadlines and meetings"))
                .arg(as_of_arg())
                .arg(
                    Arg::new("window")
                        .long("window")
                        .value_name("DAYS")
                        .value_parser(value_parser!(i64).range(0..))
                        .help("Days ahead grouped as upcoming (default 90)"),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write tables to a file")
                .subcommand_required(true)
                .subcommand(
                    export_target("range", "Export the value range projection")
                        .arg(band_arg())
                        .arg(steps_arg()),
                )
                .subcommand(export_target("history", "Export classified lots").arg(order_arg())),
        )
        .subcommand(
            Command::new("doctor")
                .about("Check vest data for drift and inconsistencies")
                .arg(as_of_arg())
                .arg(
                    Arg::new("stale-days")
                        .long("stale-days")
                        .value_parser(value_parser!(i64))
                        .default_value("7")
                        .help("Flag a stock price older than this many days"),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Projection and display defaults")
                .subcommand_required(true)
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(band_arg())
                        .arg(steps_arg())
                        .arg(order_arg()),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn file_flag_is_global() {
        let m = build_cli()
            .try_get_matches_from(["vestplan", "range", "--file", "x.json", "--steps", "4"])
            .unwrap();
        assert_eq!(m.get_one::<String>("file").unwrap(), "x.json");
        let (_, sub) = m.subcommand().unwrap();
        assert_eq!(*sub.get_one::<u32>("steps").unwrap(), 4);
    }

    #[test]
    fn timeline_window_rejects_negative_days() {
        let m = build_cli()
            .try_get_matches_from(["vestplan", "timeline", "--window", "30", "--as-of", "2026-10-17"])
            .unwrap();
        let (_, sub) = m.subcommand().unwrap();
        assert_eq!(*sub.get_one::<i64>("window").unwrap(), 30);
        assert!(
            build_cli()
                .try_get_matches_from(["vestplan", "timeline", "--window", "-1"])
                .is_err()
        );
    }

    #[test]
    fn json_and_jsonl_conflict() {
        assert!(
            build_cli()
                .try_get_matches_from(["vestplan", "history", "--json", "--jsonl"])
                .is_err()
        );
    }
}
