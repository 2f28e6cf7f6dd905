//! Rollover simulation engine.
//!
//! A [`Portfolio`] owns bonds in insertion order. Each rollover call reissues
//! every bond whose maturity date is on or before the as-of date at the new
//! rate, then appends one `(date, total annual interest)` point to history.
//! Nothing here prints; callers render the returned [`RolloverEvent`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::bond::Bond;
use crate::ledger::{Ledger, Reissue};
use crate::types::{Money, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Aggregate annual interest after a rollover call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub total_interest: Money,
}

/// What happened to one bond during a rollover call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EvaluationOutcome {
    Rolled {
        old_rate: Rate,
        new_rate: Rate,
        old_maturity: NaiveDate,
        new_maturity: NaiveDate,
        /// Annual interest on this bond at the new rate
        new_annual_interest: Money,
    },
    NotYetMature { maturity_date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondEvaluation {
    /// Position in the portfolio (insertion order, zero-based)
    pub index: usize,
    /// The bond as it stood before this call
    pub bond: Bond,
    pub outcome: EvaluationOutcome,
}

impl BondEvaluation {
    pub fn rolled(&self) -> bool {
        matches!(self.outcome, EvaluationOutcome::Rolled { .. })
    }
}

/// Structured record of a single rollover call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RolloverEvent {
    pub date: NaiveDate,
    pub new_rate: Rate,
    pub old_interest: Money,
    pub new_interest: Money,
    /// `new_interest - old_interest`
    pub interest_change: Money,
    pub rolled_count: usize,
    pub principal_rolled: Money,
    pub evaluations: Vec<BondEvaluation>,
}

// ---------------------------------------------------------------------------
// Portfolio
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Portfolio {
    bonds: Vec<Bond>,
    rollover_history: Vec<HistoryPoint>,
    ledger: Ledger,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bond. Inputs are not validated; see [`Bond::validate`].
    pub fn add_bond(
        &mut self,
        principal: Money,
        issue_date: NaiveDate,
        maturity_years: u32,
        interest_rate: Rate,
    ) {
        self.bonds
            .push(Bond::new(principal, issue_date, maturity_years, interest_rate));
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn bond(&self, index: usize) -> Option<&Bond> {
        self.bonds.get(index)
    }

    pub fn len(&self) -> usize {
        self.bonds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Sum of principal outstanding.
    ///
    /// Panics if the total leaves Decimal range; scenario validation rejects
    /// such portfolios up front.
    pub fn total_debt(&self) -> Money {
        self.bonds.iter().map(|b| b.principal).sum()
    }

    /// Sum of `principal * interest_rate` across all bonds.
    pub fn annual_interest(&self) -> Money {
        self.bonds.iter().map(Bond::annual_interest).sum()
    }

    /// One entry per rollover call, oldest first.
    pub fn rollover_history(&self) -> &[HistoryPoint] {
        &self.rollover_history
    }

    /// Every reissue performed so far, oldest first.
    pub fn reissues(&self) -> &[Reissue] {
        self.ledger.entries()
    }

    /// `(date, rate)` pairs a bond has carried: its original issue followed by
    /// every reissue. Empty if `index` is out of range.
    pub fn rate_history(&self, index: usize) -> Vec<(NaiveDate, Rate)> {
        let Some(bond) = self.bonds.get(index) else {
            return Vec::new();
        };
        let mut reissues = self.ledger.for_bond(index).peekable();
        let original = match reissues.peek() {
            Some(first) => (first.previous_issue_date, first.old_rate),
            None => (bond.issue_date, bond.interest_rate),
        };
        std::iter::once(original)
            .chain(reissues.map(|r| (r.date, r.new_rate)))
            .collect()
    }

    /// Roll every bond maturing on or before `current_date` into a new bond at
    /// `new_rate`, and return the signed change in annual interest.
    pub fn simulate_rollover(&mut self, current_date: NaiveDate, new_rate: Rate) -> Money {
        self.rollover(current_date, new_rate).interest_change
    }

    /// Same transition as [`Portfolio::simulate_rollover`], returning the full
    /// per-bond record.
    pub fn rollover(&mut self, current_date: NaiveDate, new_rate: Rate) -> RolloverEvent {
        let old_interest = self.annual_interest();
        let mut rolled_count = 0usize;
        let mut principal_rolled = Decimal::ZERO;
        let mut evaluations = Vec::with_capacity(self.bonds.len());

        for (index, bond) in self.bonds.iter_mut().enumerate() {
            let before = bond.clone();
            let old_maturity = bond.maturity_date();

            let outcome = if bond.is_mature(current_date) {
                let old_rate = bond.interest_rate;
                bond.reissue(current_date, new_rate);
                rolled_count += 1;
                principal_rolled += bond.principal;

                self.ledger.record(Reissue {
                    bond: index,
                    date: current_date,
                    previous_issue_date: before.issue_date,
                    old_rate,
                    new_rate,
                    principal: bond.principal,
                });

                EvaluationOutcome::Rolled {
                    old_rate,
                    new_rate,
                    old_maturity,
                    new_maturity: bond.maturity_date(),
                    new_annual_interest: bond.annual_interest(),
                }
            } else {
                EvaluationOutcome::NotYetMature {
                    maturity_date: old_maturity,
                }
            };

            debug!(bond = index, %current_date, outcome = ?outcome, "evaluated bond");
            evaluations.push(BondEvaluation {
                index,
                bond: before,
                outcome,
            });
        }

        let new_interest = self.annual_interest();
        let interest_change = new_interest - old_interest;

        self.rollover_history.push(HistoryPoint {
            date: current_date,
            total_interest: new_interest,
        });

        info!(
            %current_date,
            %new_rate,
            rolled_count,
            %principal_rolled,
            %new_interest,
            %interest_change,
            "rollover complete"
        );

        RolloverEvent {
            date: current_date,
            new_rate,
            old_interest,
            new_interest,
            interest_change,
            rolled_count,
            principal_rolled,
            evaluations,
        }
    }
}
