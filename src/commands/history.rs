// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger::{HistoryOrder, LedgerSummary, LotView, VestHistoryLedger};
use crate::models::VestEvent;
use crate::store::Settings;
use crate::utils::{
    fmt_money, fmt_opt_money, fmt_signed_money, json_flags, maybe_print_json, pretty_table,
};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryReport {
    pub lots: Vec<LotView>,
    pub summary: LedgerSummary,
}

pub fn history_order(settings: &Settings, m: &clap::ArgMatches) -> Result<HistoryOrder> {
    match m.get_one::<String>("order") {
        Some(raw) => Ok(raw.parse()?),
        None => Ok(settings.history_order),
    }
}

pub fn report(vest: &VestEvent, order: HistoryOrder) -> HistoryReport {
    let ledger = VestHistoryLedger::new(vest.vest_history().to_vec());
    HistoryReport {
        lots: ledger.views(order),
        summary: ledger.summary(),
    }
}

pub fn handle(vest: &VestEvent, settings: &Settings, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let report = report(vest, history_order(settings, m)?);
    if jsonl_flag {
        maybe_print_json(false, true, &report.lots)?;
        return Ok(());
    }
    if maybe_print_json(json_flag, false, &report)? {
        return Ok(());
    }
    if report.lots.is_empty() {
        println!("No vest history recorded.");
        return Ok(());
    }
    let rows = report
        .lots
        .iter()
        .map(|lot| {
            vec![
                lot.vest_date.format("%Y-%m-%d").to_string(),
                lot.lot_number.clone().unwrap_or_default(),
                lot.vest_type.map(|t| t.to_string()).unwrap_or_default(),
                lot.shares.to_string(),
                fmt_money(&lot.vest_price),
                lot.status.to_string(),
                lot.split.clone(),
                fmt_opt_money(lot.realized_gain_loss),
                fmt_opt_money(lot.unrealized_gain_loss),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "Vest Date",
                "Lot",
                "Type",
                "Shares",
                "Vest Price",
                "Status",
                "Split",
                "Realized",
                "Unrealized",
            ],
            rows,
        )
    );
    let s = &report.summary;
    println!(
        "{} lots ({} held, {} sold, {} split)  realized {}  unrealized {}",
        s.lots,
        s.held,
        s.sold,
        s.split,
        fmt_signed_money(&s.total_realized),
        fmt_signed_money(&s.total_unrealized)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LotStatus;
    use crate::store::{SAMPLE_FIXTURE, parse_vest_event};
    use std::str::FromStr;

    #[test]
    fn report_of_sample_fixture() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        let r = report(&vest, HistoryOrder::Oldest);
        let statuses: Vec<LotStatus> = r.lots.iter().map(|l| l.status).collect();
        assert_eq!(statuses, vec![LotStatus::Held, LotStatus::Sold, LotStatus::Split]);
        assert_eq!(r.lots[2].split, "30H/70S");
        // 700 * (120 - 100) + 850 * (97.25 - 94.50)
        assert_eq!(
            r.summary.total_realized,
            rust_decimal::Decimal::from_str("16337.5").unwrap()
        );
    }
}
