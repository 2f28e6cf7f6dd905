//! Single government bond held in a rollover portfolio.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RolloverError;
use crate::types::{format_money, format_rate_pct, Money, Rate};
use crate::RolloverResult;

/// Days counted per maturity year. Leap years are ignored.
pub const DAYS_PER_YEAR: u64 = 365;

/// A fixed-rate, bullet-repayment government bond.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    /// Amount borrowed
    pub principal: Money,
    /// Date the bond was (last) issued
    pub issue_date: NaiveDate,
    /// Whole years from issue to maturity
    pub maturity_years: u32,
    /// Annual interest rate as a decimal (e.g. 0.02 = 2%)
    pub interest_rate: Rate,
}

impl Bond {
    pub fn new(
        principal: Money,
        issue_date: NaiveDate,
        maturity_years: u32,
        interest_rate: Rate,
    ) -> Self {
        Self {
            principal,
            issue_date,
            maturity_years,
            interest_rate,
        }
    }

    /// `issue_date + maturity_years * 365 days`.
    ///
    /// This is a fixed 365-day year, so a bond issued on 2020-01-01 for one
    /// year matures on 2020-12-31. Saturates at `NaiveDate::MAX` when the
    /// date is out of chrono's range; [`Bond::validate`] rejects such bonds.
    pub fn maturity_date(&self) -> NaiveDate {
        self.checked_maturity_date().unwrap_or(NaiveDate::MAX)
    }

    /// `None` when the maturity date is past the representable calendar.
    pub fn checked_maturity_date(&self) -> Option<NaiveDate> {
        let days = DAYS_PER_YEAR.checked_mul(u64::from(self.maturity_years))?;
        self.issue_date.checked_add_days(Days::new(days))
    }

    /// Nominal interest for a full year at the current rate.
    ///
    /// Panics if the product leaves Decimal range; [`Bond::validate`] rejects
    /// such bonds.
    pub fn annual_interest(&self) -> Money {
        self.principal * self.interest_rate
    }

    pub fn is_mature(&self, as_of: NaiveDate) -> bool {
        self.maturity_date() <= as_of
    }

    /// Reissue in place: new issue date and rate, same principal and tenor.
    pub(crate) fn reissue(&mut self, issue_date: NaiveDate, interest_rate: Rate) {
        self.issue_date = issue_date;
        self.interest_rate = interest_rate;
    }

    /// Opt-in hardening. Construction never validates.
    pub fn validate(&self) -> RolloverResult<()> {
        if self.principal < Decimal::ZERO {
            return Err(RolloverError::InvalidInput {
                field: "principal".into(),
                reason: "Principal cannot be negative".into(),
            });
        }
        if self.maturity_years == 0 {
            return Err(RolloverError::InvalidInput {
                field: "maturity_years".into(),
                reason: "Maturity must be at least one year".into(),
            });
        }
        if self.checked_maturity_date().is_none() {
            return Err(RolloverError::InvalidInput {
                field: "maturity_years".into(),
                reason: format!(
                    "{} years from {} is past the supported calendar",
                    self.maturity_years, self.issue_date
                ),
            });
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(RolloverError::InvalidInput {
                field: "interest_rate".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.principal.checked_mul(self.interest_rate).is_none() {
            return Err(RolloverError::InvalidInput {
                field: "principal".into(),
                reason: "Annual interest exceeds the decimal range".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Bond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${} @ {}% maturing {}",
            format_money(self.principal, 0),
            format_rate_pct(self.interest_rate),
            self.maturity_date().format("%Y-%m-%d")
        )
    }
}
