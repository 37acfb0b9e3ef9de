// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::VestEvent;
use crate::store::Settings;
use crate::utils::{fmt_money, json_flags, maybe_print_json, parse_decimal, pretty_table};
use crate::valuation::{PricePoint, project_value_range};
use anyhow::Result;
use rust_decimal::Decimal;

/// Band and step count from the command line, falling back to settings.
pub fn projection_params(settings: &Settings, m: &clap::ArgMatches) -> Result<(Decimal, u32)> {
    let band = match m.get_one::<String>("band") {
        Some(raw) => parse_decimal(raw.trim())?,
        None => settings.band_width,
    };
    let steps = m.get_one::<u32>("steps").copied().unwrap_or(settings.steps);
    Ok((band, steps))
}

pub fn projection(vest: &VestEvent, band: Decimal, steps: u32) -> Result<Vec<PricePoint>> {
    Ok(project_value_range(vest, vest.tax_estimate(), band, steps)?)
}

pub fn handle(vest: &VestEvent, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let (band, steps) = projection_params(settings, m)?;
    let points = projection(vest, band, steps)?;
    if maybe_print_json(json_flag, jsonl_flag, &points)? {
        return Ok(());
    }
    let current = vest.stock_price();
    let rows = points
        .iter()
        .map(|p| {
            vec![
                fmt_money(&p.stock_price),
                fmt_money(&p.gross_value),
                fmt_money(&p.net_value),
                if p.stock_price == current {
                    "◀ current".to_string()
                } else {
                    String::new()
                },
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Stock Price", "Gross", "Net After Tax", ""], rows)
    );
    println!(
        "Illustrative range based on {} shares; actual value is set at vest.",
        vest.shares_vesting()
    );
    Ok(())
}
