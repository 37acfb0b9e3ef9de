// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{TaxEstimate, VestEvent};
use crate::utils::{fmt_money, fmt_pct, json_flags, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithholdingLine {
    pub layer: &'static str,
    pub amount: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub gross_value: Decimal,
    pub layers: Vec<WithholdingLine>,
    pub total_tax: Decimal,
    pub net_value: Decimal,
    pub effective_rate: Decimal,
}

pub fn breakdown(tax: &TaxEstimate) -> Result<TaxBreakdown> {
    Ok(TaxBreakdown {
        gross_value: tax.gross_value(),
        layers: vec![
            WithholdingLine {
                layer: "Federal",
                amount: tax.federal_tax(),
                rate: tax.federal_rate(),
            },
            WithholdingLine {
                layer: "State",
                amount: tax.state_tax(),
                rate: tax.state_rate(),
            },
            WithholdingLine {
                layer: "FICA",
                amount: tax.fica_tax(),
                rate: tax.fica_rate(),
            },
        ],
        total_tax: tax.total_tax(),
        net_value: tax.net_value(),
        effective_rate: tax.effective_rate()?,
    })
}

pub fn handle(vest: &VestEvent, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let tax = vest
        .tax_estimate()
        .context("Vest data has no tax estimate")?;
    let b = breakdown(tax)?;
    if maybe_print_json(json_flag, jsonl_flag, &b)? {
        return Ok(());
    }
    let mut rows = vec![vec![
        "Gross value".to_string(),
        fmt_money(&b.gross_value),
        String::new(),
    ]];
    for line in &b.layers {
        rows.push(vec![
            format!("{} withholding", line.layer),
            fmt_money(&line.amount),
            fmt_pct(&line.rate),
        ]);
    }
    rows.push(vec![
        "Total withheld".into(),
        fmt_money(&b.total_tax),
        fmt_pct(&b.effective_rate),
    ]);
    rows.push(vec!["Net value".into(), fmt_money(&b.net_value), String::new()]);
    println!("{}", pretty_table(&["Layer", "Amount", "Rate"], rows));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SAMPLE_FIXTURE, parse_vest_event};
    use std::str::FromStr;

    #[test]
    fn breakdown_of_sample_fixture() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        let b = breakdown(vest.tax_estimate().unwrap()).unwrap();
        assert_eq!(b.layers.len(), 3);
        assert_eq!(b.total_tax, Decimal::from_str("127361.32").unwrap());
        assert_eq!(b.net_value, Decimal::from_str("257416.08").unwrap());
        assert_eq!(b.gross_value - b.total_tax, b.net_value);
    }
}
