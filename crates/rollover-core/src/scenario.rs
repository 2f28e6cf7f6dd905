//! Scenario runner: build a portfolio, replay a rate path, collect results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::bond::Bond;
use crate::error::RolloverError;
use crate::portfolio::{HistoryPoint, Portfolio, RolloverEvent};
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::RolloverResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverStep {
    pub date: NaiveDate,
    pub new_rate: Rate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub bonds: Vec<Bond>,
    pub rollovers: Vec<RolloverStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioOutput {
    pub initial_bonds: Vec<Bond>,
    pub initial_total_debt: Money,
    pub initial_annual_interest: Money,
    pub events: Vec<RolloverEvent>,
    pub history: Vec<HistoryPoint>,
    pub final_bonds: Vec<Bond>,
    pub final_annual_interest: Money,
    /// `final_annual_interest - initial_annual_interest`
    pub cumulative_change: Money,
}

/// Evenly split debt across maturities of 1..=rungs years.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderInput {
    pub total_debt: Money,
    pub rungs: u32,
    pub issue_date: NaiveDate,
    pub interest_rate: Rate,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Validate, then replay every rollover step in order against a fresh portfolio.
pub fn run_scenario(input: &ScenarioInput) -> RolloverResult<ComputationOutput<ScenarioOutput>> {
    let start = Instant::now();
    validate_input(input)?;
    let mut warnings = collect_warnings(input);

    let mut portfolio = Portfolio::new();
    for bond in &input.bonds {
        portfolio.add_bond(
            bond.principal,
            bond.issue_date,
            bond.maturity_years,
            bond.interest_rate,
        );
    }

    let initial_total_debt = portfolio.total_debt();
    let initial_annual_interest = portfolio.annual_interest();

    let mut events = Vec::with_capacity(input.rollovers.len());
    for step in &input.rollovers {
        let event = portfolio.rollover(step.date, step.new_rate);
        if event.rolled_count == 0 && !portfolio.is_empty() {
            warnings.push(format!("No bonds matured by {}", step.date));
        }
        events.push(event);
    }

    for w in &warnings {
        warn!("{w}");
    }

    let final_annual_interest = portfolio.annual_interest();
    let output = ScenarioOutput {
        initial_bonds: input.bonds.clone(),
        initial_total_debt,
        initial_annual_interest,
        events,
        history: portfolio.rollover_history().to_vec(),
        final_bonds: portfolio.bonds().to_vec(),
        final_annual_interest,
        cumulative_change: final_annual_interest - initial_annual_interest,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bond rollover simulation (fixed 365-day maturity years, in-place reissue)",
        &serde_json::json!({
            "bonds": input.bonds.len(),
            "rollover_steps": input.rollovers.len(),
            "maturity_rule": "issue_date + maturity_years * 365 days",
            "eligibility": "maturity_date <= rollover date",
        }),
        warnings,
        elapsed,
        output,
    ))
}

/// `rungs` bonds of `total_debt / rungs`, maturing in 1, 2, ... `rungs` years.
pub fn ladder(input: &LadderInput) -> RolloverResult<Vec<Bond>> {
    if input.rungs == 0 {
        return Err(RolloverError::InvalidInput {
            field: "rungs".into(),
            reason: "Ladder needs at least one rung".into(),
        });
    }
    if input.total_debt < Decimal::ZERO {
        return Err(RolloverError::InvalidInput {
            field: "total_debt".into(),
            reason: "Total debt cannot be negative".into(),
        });
    }

    let principal = input.total_debt / Decimal::from(input.rungs);
    Ok((1..=input.rungs)
        .map(|years| Bond::new(principal, input.issue_date, years, input.interest_rate))
        .collect())
}

/// Rising-rate path from 2021. `extended` continues through 2024.
pub fn demo_rate_path(extended: bool) -> Vec<RolloverStep> {
    let mut path = vec![(2021, dec!(0.025)), (2022, dec!(0.03))];
    if extended {
        path.extend([(2023, dec!(0.035)), (2024, dec!(0.04))]);
    }
    path.into_iter()
        .filter_map(|(year, new_rate)| {
            NaiveDate::from_ymd_opt(year, 1, 1).map(|date| RolloverStep { date, new_rate })
        })
        .collect()
}

/// $100,000 one-year bond at 2% issued 2020-01-01, rolled along [`demo_rate_path`].
pub fn demo(extended: bool) -> RolloverResult<ScenarioInput> {
    let issue_date = NaiveDate::from_ymd_opt(2020, 1, 1)
        .ok_or_else(|| RolloverError::DateError("invalid demo issue date".into()))?;
    let bonds = ladder(&LadderInput {
        total_debt: dec!(100000),
        rungs: 1,
        issue_date,
        interest_rate: dec!(0.02),
    })?;
    Ok(ScenarioInput {
        bonds,
        rollovers: demo_rate_path(extended),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_input(input: &ScenarioInput) -> RolloverResult<()> {
    for (i, bond) in input.bonds.iter().enumerate() {
        bond.validate().map_err(|e| match e {
            RolloverError::InvalidInput { field, reason } => RolloverError::InvalidInput {
                field: format!("bonds[{i}].{field}"),
                reason,
            },
            other => other,
        })?;
    }
    for (i, step) in input.rollovers.iter().enumerate() {
        if step.new_rate < Decimal::ZERO {
            return Err(RolloverError::InvalidInput {
                field: format!("rollovers[{i}].new_rate"),
                reason: "Rollover rate cannot be negative".into(),
            });
        }
    }

    // A bond reissued on the last step date must still have a maturity date
    if let Some(latest) = input.rollovers.iter().map(|s| s.date).max() {
        for (i, bond) in input.bonds.iter().enumerate() {
            let reissued = Bond::new(bond.principal, latest, bond.maturity_years, bond.interest_rate);
            if reissued.checked_maturity_date().is_none() {
                return Err(RolloverError::InvalidInput {
                    field: format!("bonds[{i}].maturity_years"),
                    reason: format!(
                        "Reissue on {latest} would mature past the supported calendar"
                    ),
                });
            }
        }
    }

    check_decimal_range(input)
}

/// Totals must fit in a Decimal even if every bond ends up at the highest
/// rate seen anywhere in the scenario.
fn check_decimal_range(input: &ScenarioInput) -> RolloverResult<()> {
    let worst_rate = input
        .bonds
        .iter()
        .map(|b| b.interest_rate)
        .chain(input.rollovers.iter().map(|s| s.new_rate))
        .max()
        .unwrap_or(Decimal::ZERO);

    let totals = input.bonds.iter().try_fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(debt, interest), bond| {
            let debt = debt.checked_add(bond.principal)?;
            let interest = interest.checked_add(bond.principal.checked_mul(worst_rate)?)?;
            Some((debt, interest))
        },
    );

    match totals {
        Some(_) => Ok(()),
        None => Err(RolloverError::InvalidInput {
            field: "bonds".into(),
            reason: format!(
                "Portfolio totals at a {worst_rate} rate exceed the decimal range"
            ),
        }),
    }
}

fn collect_warnings(input: &ScenarioInput) -> Vec<String> {
    let mut warnings = Vec::new();

    if input.bonds.is_empty() {
        warnings.push("Portfolio has no bonds; every rollover will record zero interest".into());
    }
    for pair in input.rollovers.windows(2) {
        if pair[1].date < pair[0].date {
            warnings.push(format!(
                "Rollover dates go backwards: {} follows {}",
                pair[1].date, pair[0].date
            ));
        }
    }
    for bond in &input.bonds {
        if bond.interest_rate >= Decimal::ONE {
            warnings.push(format!("Bond rate {} is 100% or more", bond.interest_rate));
        }
    }
    for step in &input.rollovers {
        if step.new_rate >= Decimal::ONE {
            warnings.push(format!(
                "Rollover rate {} on {} is 100% or more",
                step.new_rate, step.date
            ));
        }
    }

    warnings
}
