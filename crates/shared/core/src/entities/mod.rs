mod anomaly;
mod consolidated;
mod date_range;
mod match_result;
mod outcome;
mod remaining;
mod side;
mod summary;
mod transaction;
mod transaction_kind;

pub use anomaly::{Anomaly, AnomalyReason};
pub use consolidated::ConsolidatedRange;
pub use date_range::{DateRange, DateRangeError};
pub use match_result::MatchResult;
pub use outcome::MatchOutcome;
pub use remaining::RemainingEntry;
pub use side::Side;
pub use summary::{PeriodSummary, ReportRow, TransactionCounts};
pub use transaction::Transaction;
pub use transaction_kind::TransactionKind;
