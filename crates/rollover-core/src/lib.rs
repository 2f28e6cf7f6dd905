pub mod bond;
pub mod chart;
pub mod error;
pub mod ledger;
pub mod portfolio;
pub mod scenario;
pub mod types;

pub use bond::Bond;
pub use error::RolloverError;
pub use ledger::Reissue;
pub use portfolio::{BondEvaluation, EvaluationOutcome, HistoryPoint, Portfolio, RolloverEvent};
pub use types::*;

/// Standard result type for all rollover operations
pub type RolloverResult<T> = Result<T, RolloverError>;
