// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::VestEvent;
use crate::utils::{as_of, fmt_money, fmt_pct, json_flags, maybe_print_json, pretty_table};
use crate::valuation::{self, SplitAllocation};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorView {
    pub name: String,
    pub credentials: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub conversation: String,
    pub recommendation: String,
    pub discussion_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VestSummary {
    pub id: String,
    pub company_name: String,
    pub ticker: String,
    pub vest_date: DateTime<Utc>,
    pub days_until_vest: i64,
    pub has_vested: bool,
    pub shares_vesting: i64,
    pub stock_price: Decimal,
    pub stock_price_last_updated: DateTime<Utc>,
    pub estimated_value: Decimal,
    pub net_value: Option<Decimal>,
    pub allocation: Option<SplitAllocation>,
    pub advisor: Option<AdvisorView>,
}

pub fn build_summary(vest: &VestEvent, today: NaiveDate) -> Result<VestSummary> {
    let drift = valuation::estimated_value_drift(vest);
    if !drift.is_zero() {
        warn!(%drift, "estimated value differs from shares x stock price");
    }
    let advisor = vest.advisor_recommendation().map(|rec| AdvisorView {
        name: rec.display_name().to_string(),
        credentials: rec.full_credentials(),
        title: rec.advisor_title().map(str::to_string),
        company: rec.advisor_company().map(str::to_string),
        phone: rec.advisor_phone().map(str::to_string),
        conversation: format!("{} ({})", rec.formatted_date(), rec.formatted_duration()),
        recommendation: rec.recommendation_text().to_string(),
        discussion_points: rec.discussion_points().to_vec(),
    });
    let now = today
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or_else(Utc::now);
    Ok(VestSummary {
        id: vest.id().to_string(),
        company_name: vest.company_name().to_string(),
        ticker: vest.ticker().to_string(),
        vest_date: vest.vest_date(),
        days_until_vest: vest.days_until_vest(today),
        has_vested: vest.has_vested(now),
        shares_vesting: vest.shares_vesting(),
        stock_price: vest.stock_price(),
        stock_price_last_updated: vest.stock_price_last_updated(),
        estimated_value: vest.estimated_value(),
        net_value: vest.tax_estimate().map(valuation::net_value),
        allocation: valuation::split_allocation(vest)?,
        advisor,
    })
}

fn summary_rows(s: &VestSummary) -> Vec<Vec<String>> {
    let mut rows = vec![
        vec!["Company".into(), format!("{} ({})", s.company_name, s.ticker)],
        vec![
            "Vest date".into(),
            format!(
                "{} ({})",
                s.vest_date.format("%Y-%m-%d"),
                if s.has_vested {
                    "vested".to_string()
                } else {
                    format!("in {} days", s.days_until_vest)
                }
            ),
        ],
        vec!["Shares vesting".into(), s.shares_vesting.to_string()],
        vec![
            "Stock price".into(),
            format!(
                "{} as of {}",
                fmt_money(&s.stock_price),
                s.stock_price_last_updated.format("%Y-%m-%d %H:%M UTC")
            ),
        ],
        vec!["Estimated value".into(), fmt_money(&s.estimated_value)],
    ];
    if let Some(net) = &s.net_value {
        rows.push(vec!["Net after withholding".into(), fmt_money(net)]);
    }
    match &s.allocation {
        Some(a) => {
            rows.push(vec![
                format!("Hold {}", fmt_pct(&a.hold_percentage)),
                format!("{} shares  {}", a.hold_shares, fmt_money(&a.hold_value)),
            ]);
            rows.push(vec![
                format!("Sell {}", fmt_pct(&a.sell_percentage)),
                format!("{} shares  {}", a.sell_shares, fmt_money(&a.sell_value)),
            ]);
        }
        None => rows.push(vec!["Split".into(), "no advisor recommendation".into()]),
    }
    if let Some(adv) = &s.advisor {
        rows.push(vec!["Advisor".into(), adv.credentials.clone()]);
        rows.push(vec!["Conversation".into(), adv.conversation.clone()]);
        rows.push(vec!["Recommendation".into(), adv.recommendation.clone()]);
    }
    rows
}

pub fn handle(vest: &VestEvent, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let summary = build_summary(vest, as_of(m)?)?;
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        println!("{}", pretty_table(&["Field", "Value"], summary_rows(&summary)));
        if let Some(adv) = &summary.advisor {
            for point in &adv.discussion_points {
                println!("  • {}", point);
            }
        }
    }
    Ok(())
}
