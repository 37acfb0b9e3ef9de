// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use vestplan::models::VestEvent;
use vestplan::store::{self, Settings};
use vestplan::{cli, commands};

fn load(path: &Path) -> Result<(VestEvent, Settings)> {
    let vest = store::load_vest_event(path)?;
    let settings = store::load_settings(&store::settings_path()?)?;
    Ok((vest, settings))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let path = store::fixture_path(matches.get_one::<String>("file").map(String::as_str))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            if store::init_fixture(&path)? {
                println!("Sample vest data written to {}", path.display());
            } else {
                println!("Vest data already exists at {}", path.display());
            }
        }
        Some(("summary", sub)) => commands::summary::handle(&load(&path)?.0, sub)?,
        Some(("tax", sub)) => commands::tax::handle(&load(&path)?.0, sub)?,
        Some(("timeline", sub)) => commands::timeline::handle(&load(&path)?.0, sub)?,
        Some(("range", sub)) => {
            let (vest, settings) = load(&path)?;
            commands::range::handle(&vest, &settings, sub)?
        }
        Some(("history", sub)) => {
            let (vest, settings) = load(&path)?;
            commands::history::handle(&vest, &settings, sub)?
        }
        Some(("export", sub)) => {
            let (vest, settings) = load(&path)?;
            commands::exporter::handle(&vest, &settings, sub)?
        }
        Some(("doctor", sub)) => commands::doctor::handle(&path, sub)?,
        Some(("config", sub)) => commands::config::handle(&store::settings_path()?, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
