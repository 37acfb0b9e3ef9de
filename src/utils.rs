// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// `--as-of` if given, else today (UTC).
pub fn as_of(m: &clap::ArgMatches) -> Result<NaiveDate> {
    match m.try_get_one::<String>("as-of").ok().flatten() {
        Some(raw) => parse_date(raw.trim()),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("${:.2}", d.round_dp(2))
}

/// Leading sign on both gains and losses, e.g. `+$14000.00`.
pub fn fmt_signed_money(d: &Decimal) -> String {
    let r = d.round_dp(2);
    if r.is_sign_negative() && !r.is_zero() {
        format!("-${:.2}", r.abs())
    } else {
        format!("+${:.2}", r)
    }
}

pub fn fmt_opt_money(d: Option<Decimal>) -> String {
    d.map(|v| fmt_signed_money(&v)).unwrap_or_else(|| "-".into())
}

/// Fraction as a percentage, e.g. `0.0965` -> `9.65%`.
pub fn fmt_pct(fraction: &Decimal) -> String {
    let pct = (fraction * Decimal::ONE_HUNDRED).round_dp(2).normalize();
    format!("{}%", pct)
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

pub fn json_flags(m: &clap::ArgMatches) -> (bool, bool) {
    let has = |id: &str| m.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false);
    (has("json"), has("jsonl"))
}
