// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::ledger::{VestHistoryItem, VestLot};
use crate::timeline::TimelineEvent;

static TICKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z][A-Z0-9.\-]{0,9}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VestType {
    #[serde(rename = "RSU")]
    Rsu,
    #[serde(rename = "ESPP")]
    Espp,
    #[serde(rename = "PSU")]
    Psu,
}

impl std::fmt::Display for VestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            VestType::Rsu => "RSU",
            VestType::Espp => "ESPP",
            VestType::Psu => "PSU",
        };
        f.write_str(s)
    }
}

/// Largest share count accepted on a vest or a lot.
pub const MAX_SHARES: i64 = 1_000_000_000_000;

/// Largest per-share price accepted.
pub fn max_price() -> Decimal {
    Decimal::new(1_000_000_000, 0)
}

/// Largest dollar amount accepted for values and withholding.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000_000_000_000_000, 0)
}

pub(crate) fn require_shares(field: &str, n: i64) -> Result<(), ValidationError> {
    if n <= 0 || n > MAX_SHARES {
        return Err(ValidationError::invalid(
            field,
            format!("must be between 1 and {}, got {}", MAX_SHARES, n),
        ));
    }
    Ok(())
}

fn require_at_most(field: &str, v: Decimal, max: Decimal) -> Result<(), ValidationError> {
    require_non_negative(field, v)?;
    if v > max {
        return Err(ValidationError::invalid(
            field,
            format!("must not exceed {}, got {}", max, v),
        ));
    }
    Ok(())
}

pub(crate) fn require_price(field: &str, v: Decimal) -> Result<(), ValidationError> {
    require_at_most(field, v, max_price())
}

pub(crate) fn require_amount(field: &str, v: Decimal) -> Result<(), ValidationError> {
    require_at_most(field, v, max_amount())
}

pub(crate) fn require_non_negative(field: &str, v: Decimal) -> Result<(), ValidationError> {
    if v < Decimal::ZERO {
        return Err(ValidationError::invalid(
            field,
            format!("must not be negative, got {}", v),
        ));
    }
    Ok(())
}

pub(crate) fn require_fraction(field: &str, v: Decimal) -> Result<(), ValidationError> {
    if v < Decimal::ZERO || v > Decimal::ONE {
        return Err(ValidationError::invalid(
            field,
            format!("must be between 0 and 1, got {}", v),
        ));
    }
    Ok(())
}

/// Withholding as decoded, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxEstimateRecord {
    pub gross_value: Decimal,
    pub federal_tax: Decimal,
    pub federal_rate: Decimal,
    pub state_tax: Decimal,
    pub state_rate: Decimal,
    pub fica_tax: Decimal,
    pub fica_rate: Decimal,
}

/// Withholding breakdown for a gross vest value.
///
/// Rates are carried for display and for price projections; they are not
/// re-derived from the absolute amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaxEstimateRecord", into = "TaxEstimateRecord")]
pub struct TaxEstimate {
    gross_value: Decimal,
    federal_tax: Decimal,
    federal_rate: Decimal,
    state_tax: Decimal,
    state_rate: Decimal,
    fica_tax: Decimal,
    fica_rate: Decimal,
}

impl TryFrom<TaxEstimateRecord> for TaxEstimate {
    type Error = ValidationError;

    fn try_from(r: TaxEstimateRecord) -> Result<Self, Self::Error> {
        require_amount("grossValue", r.gross_value)?;
        require_amount("federalTax", r.federal_tax)?;
        require_amount("stateTax", r.state_tax)?;
        require_amount("ficaTax", r.fica_tax)?;
        require_fraction("federalRate", r.federal_rate)?;
        require_fraction("stateRate", r.state_rate)?;
        require_fraction("ficaRate", r.fica_rate)?;
        let total = r.federal_tax + r.state_tax + r.fica_tax;
        if total > r.gross_value {
            return Err(ValidationError::invalid(
                "taxEstimate",
                format!(
                    "total withholding {} exceeds gross value {}",
                    total, r.gross_value
                ),
            ));
        }
        Ok(TaxEstimate {
            gross_value: r.gross_value,
            federal_tax: r.federal_tax,
            federal_rate: r.federal_rate,
            state_tax: r.state_tax,
            state_rate: r.state_rate,
            fica_tax: r.fica_tax,
            fica_rate: r.fica_rate,
        })
    }
}

impl From<TaxEstimate> for TaxEstimateRecord {
    fn from(t: TaxEstimate) -> Self {
        TaxEstimateRecord {
            gross_value: t.gross_value,
            federal_tax: t.federal_tax,
            federal_rate: t.federal_rate,
            state_tax: t.state_tax,
            state_rate: t.state_rate,
            fica_tax: t.fica_tax,
            fica_rate: t.fica_rate,
        }
    }
}

impl TaxEstimate {
    pub fn gross_value(&self) -> Decimal {
        self.gross_value
    }

    pub fn federal_tax(&self) -> Decimal {
        self.federal_tax
    }

    pub fn federal_rate(&self) -> Decimal {
        self.federal_rate
    }

    pub fn state_tax(&self) -> Decimal {
        self.state_tax
    }

    pub fn state_rate(&self) -> Decimal {
        self.state_rate
    }

    pub fn fica_tax(&self) -> Decimal {
        self.fica_tax
    }

    pub fn fica_rate(&self) -> Decimal {
        self.fica_rate
    }

    pub fn total_tax(&self) -> Decimal {
        self.federal_tax + self.state_tax + self.fica_tax
    }

    pub fn net_value(&self) -> Decimal {
        self.gross_value - self.total_tax()
    }

    /// Sum of the three withholding rates.
    pub fn combined_rate(&self) -> Decimal {
        self.federal_rate + self.state_rate + self.fica_rate
    }

    pub fn effective_rate(&self) -> Result<Decimal, ValidationError> {
        if self.gross_value.is_zero() {
            return Err(ValidationError::division_by_zero("effective tax rate"));
        }
        Ok(self.total_tax() / self.gross_value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorRecommendationRecord {
    pub advisor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_credentials: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_photo_asset: Option<String>,
    pub conversation_date: DateTime<Utc>,
    /// Minutes.
    pub conversation_duration: u32,
    #[serde(default)]
    pub discussion_points: Vec<String>,
    pub recommendation_text: String,
    pub hold_percentage: Decimal,
    pub sell_percentage: Decimal,
}

/// Advisor-suggested hold/sell allocation. The two fractions always sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "AdvisorRecommendationRecord",
    into = "AdvisorRecommendationRecord"
)]
pub struct AdvisorRecommendation {
    advisor_name: String,
    advisor_full_name: Option<String>,
    advisor_title: Option<String>,
    advisor_credentials: Option<String>,
    advisor_company: Option<String>,
    advisor_phone: Option<String>,
    advisor_photo_asset: Option<String>,
    conversation_date: DateTime<Utc>,
    conversation_duration: u32,
    discussion_points: Vec<String>,
    recommendation_text: String,
    hold_percentage: Decimal,
    sell_percentage: Decimal,
}

impl TryFrom<AdvisorRecommendationRecord> for AdvisorRecommendation {
    type Error = ValidationError;

    fn try_from(r: AdvisorRecommendationRecord) -> Result<Self, Self::Error> {
        if r.advisor_name.trim().is_empty() {
            return Err(ValidationError::invalid("advisorName", "must not be empty"));
        }
        require_fraction("holdPercentage", r.hold_percentage)?;
        require_fraction("sellPercentage", r.sell_percentage)?;
        let sum = r.hold_percentage + r.sell_percentage;
        if sum != Decimal::ONE {
            return Err(ValidationError::invalid(
                "holdPercentage",
                format!(
                    "hold {} and sell {} must sum to 1, got {}",
                    r.hold_percentage, r.sell_percentage, sum
                ),
            ));
        }
        Ok(AdvisorRecommendation {
            advisor_name: r.advisor_name,
            advisor_full_name: r.advisor_full_name,
            advisor_title: r.advisor_title,
            advisor_credentials: r.advisor_credentials,
            advisor_company: r.advisor_company,
            advisor_phone: r.advisor_phone,
            advisor_photo_asset: r.advisor_photo_asset,
            conversation_date: r.conversation_date,
            conversation_duration: r.conversation_duration,
            discussion_points: r.discussion_points,
            recommendation_text: r.recommendation_text,
            hold_percentage: r.hold_percentage,
            sell_percentage: r.sell_percentage,
        })
    }
}

impl From<AdvisorRecommendation> for AdvisorRecommendationRecord {
    fn from(a: AdvisorRecommendation) -> Self {
        AdvisorRecommendationRecord {
            advisor_name: a.advisor_name,
            advisor_full_name: a.advisor_full_name,
            advisor_title: a.advisor_title,
            advisor_credentials: a.advisor_credentials,
            advisor_company: a.advisor_company,
            advisor_phone: a.advisor_phone,
            advisor_photo_asset: a.advisor_photo_asset,
            conversation_date: a.conversation_date,
            conversation_duration: a.conversation_duration,
            discussion_points: a.discussion_points,
            recommendation_text: a.recommendation_text,
            hold_percentage: a.hold_percentage,
            sell_percentage: a.sell_percentage,
        }
    }
}

impl AdvisorRecommendation {
    pub fn hold_percentage(&self) -> Decimal {
        self.hold_percentage
    }

    pub fn sell_percentage(&self) -> Decimal {
        self.sell_percentage
    }

    pub fn advisor_title(&self) -> Option<&str> {
        self.advisor_title.as_deref()
    }

    pub fn advisor_company(&self) -> Option<&str> {
        self.advisor_company.as_deref()
    }

    pub fn advisor_phone(&self) -> Option<&str> {
        self.advisor_phone.as_deref()
    }

    pub fn conversation_date(&self) -> DateTime<Utc> {
        self.conversation_date
    }

    pub fn discussion_points(&self) -> &[String] {
        &self.discussion_points
    }

    pub fn recommendation_text(&self) -> &str {
        &self.recommendation_text
    }

    pub fn display_name(&self) -> &str {
        self.advisor_full_name
            .as_deref()
            .unwrap_or(&self.advisor_name)
    }

    /// e.g. `Sofia Patel, CFP`
    pub fn full_credentials(&self) -> String {
        match &self.advisor_credentials {
            Some(c) => format!("{}, {}", self.display_name(), c),
            None => self.display_name().to_string(),
        }
    }

    pub fn formatted_date(&self) -> String {
        self.conversation_date.format("%b %-d, %Y").to_string()
    }

    pub fn formatted_duration(&self) -> String {
        format!("{} min", self.conversation_duration)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestEventRecord {
    pub id: String,
    pub vest_date: DateTime<Utc>,
    pub company_name: String,
    pub ticker: String,
    pub shares_vesting: i64,
    pub stock_price: Decimal,
    pub stock_price_last_updated: DateTime<Utc>,
    pub estimated_value: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advisor_recommendation: Option<AdvisorRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_estimate: Option<TaxEstimate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vest_history: Option<Vec<VestHistoryItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline_events: Option<Vec<TimelineEvent>>,
}

/// One upcoming vesting tranche of an equity grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VestEventRecord", into = "VestEventRecord")]
pub struct VestEvent {
    id: String,
    vest_date: DateTime<Utc>,
    company_name: String,
    ticker: String,
    shares_vesting: i64,
    stock_price: Decimal,
    stock_price_last_updated: DateTime<Utc>,
    estimated_value: Decimal,
    advisor_recommendation: Option<AdvisorRecommendation>,
    tax_estimate: Option<TaxEstimate>,
    vest_history: Option<Vec<VestLot>>,
    timeline_events: Option<Vec<TimelineEvent>>,
}

impl TryFrom<VestEventRecord> for VestEvent {
    type Error = ValidationError;

    fn try_from(r: VestEventRecord) -> Result<Self, Self::Error> {
        if r.id.trim().is_empty() {
            return Err(ValidationError::invalid("id", "must not be empty"));
        }
        if !TICKER.is_match(&r.ticker) {
            return Err(ValidationError::invalid(
                "ticker",
                format!("'{}' is not a valid symbol", r.ticker),
            ));
        }
        require_shares("sharesVesting", r.shares_vesting)?;
        require_price("stockPrice", r.stock_price)?;
        require_amount("estimatedValue", r.estimated_value)?;

        let vest_history = match r.vest_history {
            Some(items) => {
                let mut lots = Vec::with_capacity(items.len());
                for (i, item) in items.into_iter().enumerate() {
                    let lot = VestLot::try_from(item)
                        .map_err(|e| e.within(&format!("vestHistory[{}]", i)))?;
                    lots.push(lot);
                }
                Some(lots)
            }
            None => None,
        };

        Ok(VestEvent {
            id: r.id,
            vest_date: r.vest_date,
            company_name: r.company_name,
            ticker: r.ticker,
            shares_vesting: r.shares_vesting,
            stock_price: r.stock_price,
            stock_price_last_updated: r.stock_price_last_updated,
            estimated_value: r.estimated_value,
            advisor_recommendation: r.advisor_recommendation,
            tax_estimate: r.tax_estimate,
            vest_history,
            timeline_events: r.timeline_events,
        })
    }
}

impl From<VestEvent> for VestEventRecord {
    fn from(v: VestEvent) -> Self {
        VestEventRecord {
            id: v.id,
            vest_date: v.vest_date,
            company_name: v.company_name,
            ticker: v.ticker,
            shares_vesting: v.shares_vesting,
            stock_price: v.stock_price,
            stock_price_last_updated: v.stock_price_last_updated,
            estimated_value: v.estimated_value,
            advisor_recommendation: v.advisor_recommendation,
            tax_estimate: v.tax_estimate,
            vest_history: v
                .vest_history
                .map(|lots| lots.into_iter().map(VestHistoryItem::from).collect()),
            timeline_events: v.timeline_events,
        }
    }
}

impl VestEvent {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vest_date(&self) -> DateTime<Utc> {
        self.vest_date
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn shares_vesting(&self) -> i64 {
        self.shares_vesting
    }

    pub fn stock_price(&self) -> Decimal {
        self.stock_price
    }

    pub fn stock_price_last_updated(&self) -> DateTime<Utc> {
        self.stock_price_last_updated
    }

    pub fn estimated_value(&self) -> Decimal {
        self.estimated_value
    }

    pub fn advisor_recommendation(&self) -> Option<&AdvisorRecommendation> {
        self.advisor_recommendation.as_ref()
    }

    pub fn tax_estimate(&self) -> Option<&TaxEstimate> {
        self.tax_estimate.as_ref()
    }

    /// Portfolio-wide lot history; empty when the fixture carries none.
    pub fn vest_history(&self) -> &[VestLot] {
        self.vest_history.as_deref().unwrap_or(&[])
    }

    pub fn timeline_events(&self) -> &[TimelineEvent] {
        self.timeline_events.as_deref().unwrap_or(&[])
    }

    /// Whole days from `today` to the vest date, never negative.
    pub fn days_until_vest(&self, today: NaiveDate) -> i64 {
        (self.vest_date.date_naive() - today).num_days().max(0)
    }

    pub fn has_vested(&self, now: DateTime<Utc>) -> bool {
        self.vest_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tax_record() -> TaxEstimateRecord {
        TaxEstimateRecord {
            gross_value: d("175000"),
            federal_tax: d("48475"),
            federal_rate: d("0.277"),
            state_tax: d("19250"),
            state_rate: d("0.11"),
            fica_tax: d("2625"),
            fica_rate: d("0.015"),
        }
    }

    fn recommendation_record(hold: &str, sell: &str) -> AdvisorRecommendationRecord {
        AdvisorRecommendationRecord {
            advisor_name: "Sofia".into(),
            advisor_full_name: Some("Sofia Patel".into()),
            advisor_title: None,
            advisor_credentials: Some("CFP".into()),
            advisor_company: None,
            advisor_phone: None,
            advisor_photo_asset: None,
            conversation_date: Utc.with_ymd_and_hms(2025, 10, 3, 15, 0, 0).unwrap(),
            conversation_duration: 45,
            discussion_points: vec!["Concentration risk".into()],
            recommendation_text: "Hold most, sell enough to diversify".into(),
            hold_percentage: d(hold),
            sell_percentage: d(sell),
        }
    }

    fn vest_record() -> VestEventRecord {
        VestEventRecord {
            id: "vest-1".into(),
            vest_date: Utc.with_ymd_and_hms(2025, 11, 15, 0, 0, 0).unwrap(),
            company_name: "Invictus Sports Network".into(),
            ticker: "IVSN".into(),
            shares_vesting: 2500,
            stock_price: d("70"),
            stock_price_last_updated: Utc.with_ymd_and_hms(2025, 11, 1, 20, 0, 0).unwrap(),
            estimated_value: d("175000"),
            advisor_recommendation: None,
            tax_estimate: None,
            vest_history: None,
            timeline_events: None,
        }
    }

    #[test]
    fn tax_estimate_derives_totals() {
        let tax = TaxEstimate::try_from(tax_record()).unwrap();
        assert_eq!(tax.total_tax(), d("70350"));
        assert_eq!(tax.net_value(), d("104650"));
        assert_eq!(tax.combined_rate(), d("0.402"));
        assert_eq!(tax.effective_rate().unwrap(), d("0.402"));
    }

    #[test]
    fn tax_estimate_rejects_negative_amounts_and_excess_withholding() {
        let mut r = tax_record();
        r.state_tax = d("-1");
        let err = TaxEstimate::try_from(r).unwrap_err();
        assert!(err.to_string().contains("stateTax"));

        let mut r = tax_record();
        r.federal_tax = d("200000");
        assert!(TaxEstimate::try_from(r).is_err());

        let mut r = tax_record();
        r.fica_rate = d("1.5");
        assert!(TaxEstimate::try_from(r).is_err());
    }

    #[test]
    fn effective_rate_guards_zero_gross() {
        let tax = TaxEstimate::try_from(TaxEstimateRecord {
            gross_value: Decimal::ZERO,
            federal_tax: Decimal::ZERO,
            federal_rate: d("0.22"),
            state_tax: Decimal::ZERO,
            state_rate: Decimal::ZERO,
            fica_tax: Decimal::ZERO,
            fica_rate: Decimal::ZERO,
        })
        .unwrap();
        assert_eq!(tax.net_value(), Decimal::ZERO);
        assert!(tax.effective_rate().unwrap_err().is_division_by_zero());
    }

    #[test]
    fn recommendation_percentages_must_sum_to_one() {
        assert!(AdvisorRecommendation::try_from(recommendation_record("0.70", "0.30")).is_ok());
        let err = AdvisorRecommendation::try_from(recommendation_record("0.70", "0.40"))
            .unwrap_err();
        assert!(err.to_string().contains("must sum to 1"));
        assert!(AdvisorRecommendation::try_from(recommendation_record("1.2", "-0.2")).is_err());
    }

    #[test]
    fn recommendation_display_helpers() {
        let rec = AdvisorRecommendation::try_from(recommendation_record("0.7", "0.3")).unwrap();
        assert_eq!(rec.display_name(), "Sofia Patel");
        assert_eq!(rec.full_credentials(), "Sofia Patel, CFP");
        assert_eq!(rec.formatted_duration(), "45 min");
        assert_eq!(rec.formatted_date(), "Oct 3, 2025");

        let mut r = recommendation_record("0.7", "0.3");
        r.advisor_full_name = None;
        r.advisor_credentials = None;
        let rec = AdvisorRecommendation::try_from(r).unwrap();
        assert_eq!(rec.full_credentials(), "Sofia");
    }

    #[test]
    fn vest_event_rejects_bad_shares_and_prices() {
        let vest = VestEvent::try_from(vest_record()).unwrap();
        assert_eq!(vest.ticker(), "IVSN");
        assert!(vest.vest_history().is_empty());
        assert!(vest.timeline_events().is_empty());

        let mut r = vest_record();
        r.shares_vesting = 0;
        let err = VestEvent::try_from(r).unwrap_err();
        assert!(err.to_string().contains("sharesVesting"));

        let mut r = vest_record();
        r.shares_vesting = -10;
        assert!(VestEvent::try_from(r).is_err());

        let mut r = vest_record();
        r.stock_price = d("-0.01");
        assert!(VestEvent::try_from(r).is_err());

        let mut r = vest_record();
        r.ticker = "not a ticker".into();
        assert!(VestEvent::try_from(r).is_err());
    }

    #[test]
    fn ticker_is_not_rewritten() {
        for raw in ["ivsn", " IVSN", "IVSN ", "Ivsn"] {
            let mut r = vest_record();
            r.ticker = raw.into();
            let err = VestEvent::try_from(r).unwrap_err();
            assert!(err.to_string().contains("ticker"), "{raw:?} was accepted");
        }
        let mut r = vest_record();
        r.ticker = "BRK.B".into();
        assert_eq!(VestEvent::try_from(r).unwrap().ticker(), "BRK.B");
    }

    #[test]
    fn vest_event_enforces_upper_bounds() {
        let mut r = vest_record();
        r.shares_vesting = MAX_SHARES;
        r.stock_price = max_price();
        r.estimated_value = max_amount();
        assert!(VestEvent::try_from(r).is_ok());

        let mut r = vest_record();
        r.shares_vesting = 100_000_000_000_000_000;
        let err = VestEvent::try_from(r).unwrap_err();
        assert!(err.to_string().contains("sharesVesting"));

        let mut r = vest_record();
        r.stock_price = d("1000000000000000");
        let err = VestEvent::try_from(r).unwrap_err();
        assert!(err.to_string().contains("stockPrice"));

        let mut r = vest_record();
        r.estimated_value = max_amount() + Decimal::ONE;
        assert!(VestEvent::try_from(r).is_err());

        let mut r = tax_record();
        r.gross_value = max_amount() + Decimal::ONE;
        let err = TaxEstimate::try_from(r).unwrap_err();
        assert!(err.to_string().contains("grossValue"));
    }

    #[test]
    fn days_until_vest_is_clamped() {
        let vest = VestEvent::try_from(vest_record()).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap();
        assert_eq!(vest.days_until_vest(today), 14);
        let later = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        assert_eq!(vest.days_until_vest(later), 0);
        assert!(vest.has_vested(Utc.with_ymd_and_hms(2025, 11, 16, 0, 0, 0).unwrap()));
        assert!(!vest.has_vested(Utc.with_ymd_and_hms(2025, 11, 14, 0, 0, 0).unwrap()));
    }

    #[test]
    fn vest_event_decodes_camel_case_json() {
        let raw = r#"{
            "id": "a1",
            "vestDate": "2025-11-15T00:00:00Z",
            "companyName": "Minnievision",
            "ticker": "MNV",
            "sharesVesting": 3430,
            "stockPrice": 112.18,
            "stockPriceLastUpdated": "2025-11-01T20:00:00Z",
            "estimatedValue": 384777.40,
            "taxEstimate": {
                "grossValue": 175000, "federalTax": 48475, "federalRate": 0.277,
                "stateTax": 19250, "stateRate": 0.11, "ficaTax": 2625, "ficaRate": 0.015
            }
        }"#;
        let vest: VestEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(vest.shares_vesting(), 3430);
        assert_eq!(vest.stock_price(), d("112.18"));
        assert_eq!(vest.tax_estimate().unwrap().net_value(), d("104650"));
        assert!(vest.advisor_recommendation().is_none());

        let bad = raw.replace("3430", "0");
        let err = serde_json::from_str::<VestEvent>(&bad).unwrap_err();
        assert!(err.to_string().contains("sharesVesting"));

        let lower = raw.replace("\"MNV\"", "\"mnv\"");
        assert!(serde_json::from_str::<VestEvent>(&lower).is_err());
    }
}
