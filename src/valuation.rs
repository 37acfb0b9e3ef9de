// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Hold/sell split, dollar values and price-sensitivity projection for a vest.
//!
//! Everything here is a pure function of validated inputs. Nothing is cached;
//! callers re-derive on demand.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tracing::debug;

use crate::errors::ValidationError;
use crate::models::{TaxEstimate, VestEvent};

pub const DEFAULT_STEPS: u32 = 10;

/// ±10% around the current price.
pub fn default_band_width() -> Decimal {
    Decimal::new(10, 2)
}

/// Shares kept: `floor(sharesVesting * holdPercentage)`, or 0 without a recommendation.
pub fn hold_shares(vest: &VestEvent) -> i64 {
    let Some(rec) = vest.advisor_recommendation() else {
        return 0;
    };
    let total = vest.shares_vesting();
    (Decimal::from(total) * rec.hold_percentage())
        .floor()
        .to_i64()
        .unwrap_or(0)
        .clamp(0, total)
}

/// Shares sold: the remainder after [`hold_shares`], so the two always add
/// up to `sharesVesting`. 0 without a recommendation.
pub fn sell_shares(vest: &VestEvent) -> i64 {
    if vest.advisor_recommendation().is_none() {
        return 0;
    }
    vest.shares_vesting() - hold_shares(vest)
}

pub fn price_per_share(value: Decimal, shares: i64) -> Result<Decimal, ValidationError> {
    if shares == 0 {
        return Err(ValidationError::division_by_zero("share price"));
    }
    Ok(value / Decimal::from(shares))
}

/// `estimatedValue / sharesVesting`.
pub fn share_price(vest: &VestEvent) -> Result<Decimal, ValidationError> {
    price_per_share(vest.estimated_value(), vest.shares_vesting())
}

pub fn hold_value(vest: &VestEvent) -> Result<Decimal, ValidationError> {
    Ok(Decimal::from(hold_shares(vest)) * share_price(vest)?)
}

pub fn sell_value(vest: &VestEvent) -> Result<Decimal, ValidationError> {
    Ok(Decimal::from(sell_shares(vest)) * share_price(vest)?)
}

pub fn net_value(tax: &TaxEstimate) -> Decimal {
    tax.gross_value() - tax.federal_tax() - tax.state_tax() - tax.fica_tax()
}

/// Supplied `estimatedValue` minus `sharesVesting * stockPrice`. The two are
/// independent inputs and are never reconciled here.
pub fn estimated_value_drift(vest: &VestEvent) -> Decimal {
    vest.estimated_value() - Decimal::from(vest.shares_vesting()) * vest.stock_price()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitAllocation {
    pub hold_percentage: Decimal,
    pub sell_percentage: Decimal,
    pub hold_shares: i64,
    pub sell_shares: i64,
    pub share_price: Decimal,
    pub hold_value: Decimal,
    pub sell_value: Decimal,
}

/// The recommended split in shares and dollars, if the vest carries a recommendation.
pub fn split_allocation(vest: &VestEvent) -> Result<Option<SplitAllocation>, ValidationError> {
    let Some(rec) = vest.advisor_recommendation() else {
        return Ok(None);
    };
    let price = share_price(vest)?;
    let hold = hold_shares(vest);
    let sell = sell_shares(vest);
    Ok(Some(SplitAllocation {
        hold_percentage: rec.hold_percentage(),
        sell_percentage: rec.sell_percentage(),
        hold_shares: hold,
        sell_shares: sell,
        share_price: price,
        hold_value: Decimal::from(hold) * price,
        sell_value: Decimal::from(sell) * price,
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub stock_price: Decimal,
    pub gross_value: Decimal,
    pub net_value: Decimal,
}

/// `steps + 1` evenly spaced prices across `stockPrice * (1 ± band_width)`,
/// each with the vest's gross and after-tax value.
///
/// Tax is re-applied as rates, not as the estimate's absolute amounts, since
/// only the rates scale with price.
pub fn project_value_range(
    vest: &VestEvent,
    tax: Option<&TaxEstimate>,
    band_width: Decimal,
    steps: u32,
) -> Result<Vec<PricePoint>, ValidationError> {
    if steps == 0 {
        return Err(ValidationError::invalid("steps", "must be at least 1"));
    }
    if band_width < Decimal::ZERO || band_width > Decimal::ONE {
        return Err(ValidationError::invalid(
            "bandWidth",
            format!("must be between 0 and 1, got {}", band_width),
        ));
    }

    let current = vest.stock_price();
    let low = current * (Decimal::ONE - band_width);
    let high = current * (Decimal::ONE + band_width);
    let span = high - low;
    let shares = Decimal::from(vest.shares_vesting());
    let keep = tax.map(|t| Decimal::ONE - t.combined_rate());
    let n = Decimal::from(steps);

    let points: Vec<PricePoint> = (0..=steps)
        .map(|i| {
            let stock_price = low + span * Decimal::from(i) / n;
            let gross_value = stock_price * shares;
            let net_value = match keep {
                Some(k) => gross_value * k,
                None => gross_value,
            };
            PricePoint {
                stock_price,
                gross_value,
                net_value,
            }
        })
        .collect();
    debug!(
        ticker = vest.ticker(),
        points = points.len(),
        %low,
        %high,
        "projected value range"
    );
    Ok(points)
}
