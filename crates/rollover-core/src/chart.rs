//! Chart-ready series derived from rollover history.
//!
//! Costs are expressed in thousands. Rendering is left to the caller.

use chrono::Datelike;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RolloverError;
use crate::portfolio::HistoryPoint;
use crate::types::Money;
use crate::RolloverResult;

const THOUSAND: Decimal = dec!(1000);
const LOWER_PAD: Decimal = dec!(0.9);
const UPPER_PAD: Decimal = dec!(1.1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartBar {
    /// Year of the rollover date
    pub label: String,
    pub cost_thousands: Money,
    /// `floor(cost / max_cost * width)`
    pub bar_length: usize,
}

/// Bar lengths proportional to the largest cost in `history`.
///
/// Fails with [`RolloverError::EmptySeries`] when there is no history. An
/// all-zero history yields zero-length bars.
pub fn interest_bars(history: &[HistoryPoint], width: usize) -> RolloverResult<Vec<ChartBar>> {
    let max_cost = max_thousands(history)?;
    let width_dec = Decimal::from(width as u64);

    Ok(history
        .iter()
        .map(|point| {
            let cost = point.total_interest / THOUSAND;
            let bar_length = if max_cost > Decimal::ZERO && cost > Decimal::ZERO {
                (cost / max_cost * width_dec)
                    .floor()
                    .to_usize()
                    .unwrap_or(0)
                    .min(width)
            } else {
                0
            };
            ChartBar {
                label: point.date.year().to_string(),
                cost_thousands: cost,
                bar_length,
            }
        })
        .collect())
}

/// Y-axis range for a line plot: `(min * 0.9, max * 1.1)` in thousands.
pub fn plot_bounds(history: &[HistoryPoint]) -> RolloverResult<(Money, Money)> {
    let max_cost = max_thousands(history)?;
    let min_cost = history
        .iter()
        .map(|p| p.total_interest / THOUSAND)
        .min()
        .unwrap_or(max_cost);
    Ok((min_cost * LOWER_PAD, max_cost * UPPER_PAD))
}

fn max_thousands(history: &[HistoryPoint]) -> RolloverResult<Money> {
    history
        .iter()
        .map(|p| p.total_interest / THOUSAND)
        .max()
        .ok_or_else(|| {
            RolloverError::EmptySeries("no rollover history to chart".into())
        })
}
