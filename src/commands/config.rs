// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::{Settings, load_settings, save_settings};
use crate::utils::{fmt_pct, parse_decimal, pretty_table};
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(&load_settings(path)?),
        Some(("set", sub)) => {
            let updated = apply(load_settings(path)?, sub)?;
            save_settings(path, &updated)?;
            println!("Settings saved to {}", path.display());
            show(&updated);
        }
        _ => {}
    }
    Ok(())
}

pub fn apply(mut settings: Settings, sub: &clap::ArgMatches) -> Result<Settings> {
    if let Some(raw) = sub.get_one::<String>("band") {
        settings.band_width = parse_decimal(raw.trim())?;
    }
    if let Some(steps) = sub.get_one::<u32>("steps") {
        settings.steps = *steps;
    }
    if let Some(order) = sub.get_one::<String>("order") {
        settings.history_order = order.parse()?;
    }
    settings.validate()?;
    Ok(settings)
}

fn show(s: &Settings) {
    let rows = vec![
        vec!["band".into(), format!("±{}", fmt_pct(&s.band_width))],
        vec!["steps".into(), s.steps.to_string()],
        vec!["order".into(), s.history_order.to_string()],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
}
