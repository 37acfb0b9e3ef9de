// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{history, range};
use crate::models::VestEvent;
use crate::store::Settings;
use anyhow::{Result, anyhow};

pub fn handle(vest: &VestEvent, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("range", sub)) => export_range(vest, settings, sub),
        Some(("history", sub)) => export_history(vest, settings, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> (String, String) {
    let fmt = sub
        .get_one::<String>("format")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default();
    let out = sub
        .get_one::<String>("out")
        .map(|s| s.trim().to_string())
        .unwrap_or_default();
    (fmt, out)
}

fn export_range(vest: &VestEvent, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub);
    let (band, steps) = range::projection_params(settings, sub)?;
    let points = range::projection(vest, band, steps)?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record(["stock_price", "gross_value", "net_value"])?;
            for p in &points {
                wtr.write_record([
                    p.stock_price.round_dp(2).to_string(),
                    p.gross_value.round_dp(2).to_string(),
                    p.net_value.round_dp(2).to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(&out, serde_json::to_string_pretty(&points)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} price points to {}", points.len(), out);
    Ok(())
}

fn export_history(vest: &VestEvent, settings: &Settings, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub);
    let order = history::history_order(settings, sub)?;
    let report = history::report(vest, order);

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(&out)?;
            wtr.write_record([
                "id",
                "vest_date",
                "lot_number",
                "type",
                "shares",
                "vest_price",
                "status",
                "split",
                "realized_gain_loss",
                "unrealized_gain_loss",
            ])?;
            for lot in &report.lots {
                wtr.write_record([
                    lot.id.clone(),
                    lot.vest_date.format("%Y-%m-%d").to_string(),
                    lot.lot_number.clone().unwrap_or_default(),
                    lot.vest_type.map(|t| t.to_string()).unwrap_or_default(),
                    lot.shares.to_string(),
                    lot.vest_price.to_string(),
                    lot.status.to_string(),
                    lot.split.clone(),
                    lot.realized_gain_loss
                        .map(|v| v.round_dp(2).to_string())
                        .unwrap_or_default(),
                    lot.unrealized_gain_loss
                        .map(|v| v.round_dp(2).to_string())
                        .unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(&out, serde_json::to_string_pretty(&report)?)?;
        }
        other => return Err(anyhow!("Unknown format: {} (use csv|json)", other)),
    }
    println!("Exported {} lots to {}", report.lots.len(), out);
    Ok(())
}
