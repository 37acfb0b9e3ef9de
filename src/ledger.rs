// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Historical vest lots: Held/Sold/Split classification and gain/loss roll-ups.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{VestType, require_price, require_shares};

/// A historical lot as decoded. Split fields and the legacy sold fields are
/// all optional; [`VestLot`] resolves them into a single position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VestHistoryItem {
    pub id: String,
    pub vest_date: DateTime<Utc>,
    pub shares: i64,
    pub vest_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lot_number: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vest_type: Option<VestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_held: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares_sold: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_portion_price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sold_portion_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotStatus {
    Held,
    Sold,
    Split,
}

impl std::fmt::Display for LotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LotStatus::Held => "Held",
            LotStatus::Sold => "Sold",
            LotStatus::Split => "Split",
        };
        f.write_str(s)
    }
}

/// What happened to a lot, resolved once when the lot is built.
#[derive(Debug, Clone, PartialEq)]
pub enum LotPosition {
    Held {
        current_price: Option<Decimal>,
    },
    Sold {
        shares: i64,
        price: Option<Decimal>,
        date: Option<DateTime<Utc>>,
    },
    Split {
        shares_held: i64,
        shares_sold: i64,
        current_price: Option<Decimal>,
        sold_price: Option<Decimal>,
        sold_date: Option<DateTime<Utc>>,
    },
}

impl LotPosition {
    pub fn status(&self) -> LotStatus {
        match self {
            LotPosition::Held { .. } => LotStatus::Held,
            LotPosition::Sold { .. } => LotStatus::Sold,
            LotPosition::Split { .. } => LotStatus::Split,
        }
    }
}

fn classify(item: &VestHistoryItem) -> Result<LotPosition, ValidationError> {
    require_shares("shares", item.shares)?;
    require_price("vestPrice", item.vest_price)?;
    for (field, price) in [
        ("currentPrice", item.current_price),
        ("soldPrice", item.sold_price),
        ("soldPortionPrice", item.sold_portion_price),
    ] {
        if let Some(p) = price {
            require_price(field, p)?;
        }
    }

    let split_recorded = item.shares_held.is_some() || item.shares_sold.is_some();
    if split_recorded {
        let held = item.shares_held.unwrap_or(0);
        let sold = item.shares_sold.unwrap_or(0);
        if held < 0 || sold < 0 {
            return Err(ValidationError::invalid(
                "sharesHeld",
                format!("held {} and sold {} must not be negative", held, sold),
            ));
        }
        if held.checked_add(sold) != Some(item.shares) {
            return Err(ValidationError::invalid(
                "sharesHeld",
                format!(
                    "held {} + sold {} does not equal lot size {}",
                    held, sold, item.shares
                ),
            ));
        }
        if sold == 0 && item.sold_price.is_some() {
            return Err(ValidationError::invalid(
                "soldPrice",
                "present but the split fields report no shares sold",
            ));
        }
    }

    match item.shares_sold {
        Some(sold) if sold > 0 => match item.shares_held {
            Some(held) if held > 0 => Ok(LotPosition::Split {
                shares_held: held,
                shares_sold: sold,
                current_price: item.current_price,
                sold_price: item.sold_portion_price,
                sold_date: item.sold_portion_date,
            }),
            _ => Ok(LotPosition::Sold {
                shares: sold,
                price: item.sold_portion_price.or(item.sold_price),
                date: item.sold_portion_date.or(item.sold_date),
            }),
        },
        _ => match item.sold_price {
            Some(price) => Ok(LotPosition::Sold {
                shares: item.shares,
                price: Some(price),
                date: item.sold_date,
            }),
            None => Ok(LotPosition::Held {
                current_price: item.current_price,
            }),
        },
    }
}

/// A validated, classified historical lot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VestHistoryItem", into = "VestHistoryItem")]
pub struct VestLot {
    record: VestHistoryItem,
    position: LotPosition,
}

impl TryFrom<VestHistoryItem> for VestLot {
    type Error = ValidationError;

    fn try_from(record: VestHistoryItem) -> Result<Self, Self::Error> {
        let position = classify(&record)?;
        Ok(VestLot { record, position })
    }
}

impl From<VestLot> for VestHistoryItem {
    fn from(lot: VestLot) -> Self {
        lot.record
    }
}

impl VestLot {
    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn vest_date(&self) -> DateTime<Utc> {
        self.record.vest_date
    }

    pub fn shares(&self) -> i64 {
        self.record.shares
    }

    pub fn vest_price(&self) -> Decimal {
        self.record.vest_price
    }

    pub fn lot_number(&self) -> Option<&str> {
        self.record.lot_number.as_deref()
    }

    pub fn vest_type(&self) -> Option<VestType> {
        self.record.vest_type
    }

    pub fn position(&self) -> &LotPosition {
        &self.position
    }

    pub fn status(&self) -> LotStatus {
        self.position.status()
    }

    /// Gain or loss on the sold portion, if any shares were sold at a known price.
    pub fn realized_gain_loss(&self) -> Option<Decimal> {
        match &self.position {
            LotPosition::Sold {
                shares,
                price: Some(price),
                ..
            }
            | LotPosition::Split {
                shares_sold: shares,
                sold_price: Some(price),
                ..
            } => Some((*price - self.vest_price()) * Decimal::from(*shares)),
            _ => None,
        }
    }

    /// Gain or loss on the held portion, if a current price is known.
    pub fn unrealized_gain_loss(&self) -> Option<Decimal> {
        match &self.position {
            LotPosition::Held {
                current_price: Some(price),
            } => Some((*price - self.vest_price()) * Decimal::from(self.shares())),
            LotPosition::Split {
                shares_held,
                current_price: Some(price),
                ..
            } => Some((*price - self.vest_price()) * Decimal::from(*shares_held)),
            _ => None,
        }
    }

    /// Whole-position gain/loss at `soldPrice ?? currentPrice ?? vestPrice`.
    pub fn gain_loss(&self) -> Decimal {
        (self.effective_price() - self.vest_price()) * Decimal::from(self.shares())
    }

    pub fn gain_loss_percentage(&self) -> Result<Decimal, ValidationError> {
        let vest_price = self.vest_price();
        if vest_price.is_zero() {
            return Err(ValidationError::division_by_zero("gain/loss percentage"));
        }
        Ok((self.effective_price() - vest_price) / vest_price * Decimal::ONE_HUNDRED)
    }

    pub fn is_positive(&self) -> bool {
        self.gain_loss() > Decimal::ZERO
    }

    fn effective_price(&self) -> Decimal {
        self.record
            .sold_price
            .or(self.record.current_price)
            .unwrap_or(self.record.vest_price)
    }

    /// `70H/30S` for split lots, `100S` or `100H` otherwise.
    pub fn split_display(&self) -> String {
        match &self.position {
            LotPosition::Split {
                shares_held,
                shares_sold,
                ..
            } => {
                let held = i128::from(*shares_held);
                let total = held + i128::from(*shares_sold);
                // Rounds half away from zero; the sold side absorbs the remainder.
                let held_pct = (held * 200 + total) / (total * 2);
                format!("{}H/{}S", held_pct, 100 - held_pct)
            }
            LotPosition::Sold { .. } => "100S".to_string(),
            LotPosition::Held { .. } => "100H".to_string(),
        }
    }
}

/// Display direction over the vest-date sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryOrder {
    #[default]
    Newest,
    Oldest,
}

impl FromStr for HistoryOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "newest" => Ok(HistoryOrder::Newest),
            "oldest" => Ok(HistoryOrder::Oldest),
            other => Err(ValidationError::invalid(
                "order",
                format!("'{}' (use newest|oldest)", other),
            )),
        }
    }
}

impl std::fmt::Display for HistoryOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HistoryOrder::Newest => f.write_str("newest"),
            HistoryOrder::Oldest => f.write_str("oldest"),
        }
    }
}

/// Flattened lot for tables and JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotView {
    pub id: String,
    pub vest_date: DateTime<Utc>,
    pub lot_number: Option<String>,
    #[serde(rename = "type")]
    pub vest_type: Option<VestType>,
    pub shares: i64,
    pub vest_price: Decimal,
    pub status: LotStatus,
    pub split: String,
    pub realized_gain_loss: Option<Decimal>,
    pub unrealized_gain_loss: Option<Decimal>,
    pub gain_loss: Decimal,
}

impl From<&VestLot> for LotView {
    fn from(lot: &VestLot) -> Self {
        LotView {
            id: lot.id().to_string(),
            vest_date: lot.vest_date(),
            lot_number: lot.lot_number().map(str::to_string),
            vest_type: lot.vest_type(),
            shares: lot.shares(),
            vest_price: lot.vest_price(),
            status: lot.status(),
            split: lot.split_display(),
            realized_gain_loss: lot.realized_gain_loss(),
            unrealized_gain_loss: lot.unrealized_gain_loss(),
            gain_loss: lot.gain_loss(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    pub lots: usize,
    pub held: usize,
    pub sold: usize,
    pub split: usize,
    pub total_realized: Decimal,
    pub total_unrealized: Decimal,
}

/// Read-only view over a set of classified lots.
#[derive(Debug, Clone, Default)]
pub struct VestHistoryLedger {
    lots: Vec<VestLot>,
}

impl VestHistoryLedger {
    pub fn new(lots: Vec<VestLot>) -> Self {
        VestHistoryLedger { lots }
    }

    pub fn from_items(items: Vec<VestHistoryItem>) -> Result<Self, ValidationError> {
        let mut lots = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let lot =
                VestLot::try_from(item).map_err(|e| e.within(&format!("vestHistory[{}]", i)))?;
            debug!(lot = lot.id(), status = %lot.status(), "classified lot");
            lots.push(lot);
        }
        Ok(VestHistoryLedger { lots })
    }

    pub fn lots(&self) -> &[VestLot] {
        &self.lots
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }

    /// Lots sorted by vest date; ties keep their input order.
    pub fn ordered(&self, order: HistoryOrder) -> Vec<&VestLot> {
        let mut out: Vec<&VestLot> = self.lots.iter().collect();
        match order {
            HistoryOrder::Oldest => out.sort_by_key(|l| l.vest_date()),
            HistoryOrder::Newest => out.sort_by(|a, b| b.vest_date().cmp(&a.vest_date())),
        }
        out
    }

    pub fn views(&self, order: HistoryOrder) -> Vec<LotView> {
        self.ordered(order).into_iter().map(LotView::from).collect()
    }

    pub fn total_realized(&self) -> Decimal {
        self.lots
            .iter()
            .filter_map(VestLot::realized_gain_loss)
            .sum()
    }

    pub fn total_unrealized(&self) -> Decimal {
        self.lots
            .iter()
            .filter_map(VestLot::unrealized_gain_loss)
            .sum()
    }

    pub fn summary(&self) -> LedgerSummary {
        let count = |s: LotStatus| self.lots.iter().filter(|l| l.status() == s).count();
        LedgerSummary {
            lots: self.lots.len(),
            held: count(LotStatus::Held),
            sold: count(LotStatus::Sold),
            split: count(LotStatus::Split),
            total_realized: self.total_realized(),
            total_unrealized: self.total_unrealized(),
        }
    }
}
