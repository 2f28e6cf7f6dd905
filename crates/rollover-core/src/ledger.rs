//! Append-only record of every reissue performed by a portfolio.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// One bond reissued at a new rate on a rollover date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reissue {
    /// Position of the bond in the portfolio (insertion order)
    pub bond: usize,
    pub date: NaiveDate,
    pub previous_issue_date: NaiveDate,
    pub old_rate: Rate,
    pub new_rate: Rate,
    pub principal: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<Reissue>,
}

impl Ledger {
    pub fn record(&mut self, entry: Reissue) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[Reissue] {
        &self.entries
    }

    /// Reissues of a single bond, oldest first.
    pub fn for_bond(&self, bond: usize) -> impl Iterator<Item = &Reissue> {
        self.entries.iter().filter(move |r| r.bond == bond)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
