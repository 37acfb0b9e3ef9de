// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::VestEvent;
use crate::store::read_vest_event;
use crate::utils::{as_of, fmt_money, pretty_table};
use crate::valuation::estimated_value_drift;
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::Path;
use tracing::warn;

pub fn diagnose(vest: &VestEvent, today: NaiveDate, stale_days: i64) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Supplied estimated value vs shares x price
    let drift = estimated_value_drift(vest);
    if drift.abs() >= Decimal::new(1, 2) {
        warn!(%drift, "estimated value drift");
        rows.push(vec![
            "estimated_value_drift".into(),
            format!(
                "estimatedValue {} differs from {} x {} by {}",
                fmt_money(&vest.estimated_value()),
                vest.shares_vesting(),
                fmt_money(&vest.stock_price()),
                fmt_money(&drift)
            ),
        ]);
    }

    // 2) Price freshness
    let age = (today - vest.stock_price_last_updated().date_naive()).num_days();
    if age > stale_days {
        warn!(age_days = age, "stale stock price");
        rows.push(vec![
            "stale_price".into(),
            format!("stock price last updated {} days ago", age),
        ]);
    }

    // 3) Missing inputs
    if vest.advisor_recommendation().is_none() {
        rows.push(vec![
            "missing_recommendation".into(),
            "hold/sell split cannot be computed".into(),
        ]);
    }
    match vest.tax_estimate() {
        None => rows.push(vec![
            "missing_tax_estimate".into(),
            "net values will be shown pre-tax".into(),
        ]),
        Some(tax) if tax.gross_value() != vest.estimated_value() => rows.push(vec![
            "tax_gross_mismatch".into(),
            format!(
                "tax gross {} vs estimated value {}",
                fmt_money(&tax.gross_value()),
                fmt_money(&vest.estimated_value())
            ),
        ]),
        Some(_) => {}
    }

    // 4) Already vested
    if vest.vest_date().date_naive() < today {
        rows.push(vec![
            "vest_date_passed".into(),
            vest.vest_date().format("%Y-%m-%d").to_string(),
        ]);
    }

    rows
}

pub fn handle(path: &Path, m: &clap::ArgMatches) -> Result<()> {
    let today = as_of(m)?;
    let stale_days = m.get_one::<i64>("stale-days").copied().unwrap_or(7);

    let rows = match read_vest_event(path) {
        Ok(vest) => diagnose(&vest, today, stale_days),
        Err(e) => vec![vec!["invalid_data".into(), format!("{}: {}", path.display(), e)]],
    };

    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SAMPLE_FIXTURE, parse_vest_event};

    #[test]
    fn sample_fixture_is_clean_when_fresh() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert!(diagnose(&vest, today, 7).is_empty());
    }

    #[test]
    fn flags_drift_stale_price_and_passed_vest() {
        let raw = SAMPLE_FIXTURE.replace("\"estimatedValue\": 384777.40", "\"estimatedValue\": 380000");
        let vest = parse_vest_event(&raw).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 12, 1).unwrap();
        let issues: Vec<String> = diagnose(&vest, today, 7)
            .into_iter()
            .map(|r| r[0].clone())
            .collect();
        assert!(issues.contains(&"estimated_value_drift".to_string()));
        assert!(issues.contains(&"stale_price".to_string()));
        assert!(issues.contains(&"tax_gross_mismatch".to_string()));
        assert!(issues.contains(&"vest_date_passed".to_string()));
    }
}
