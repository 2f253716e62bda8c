use serde::{Deserialize, Serialize};

use super::{DateRange, MatchResult, RemainingEntry, TransactionCounts};
use crate::values::Amount;

/// Precomputed profit result for a whole date range
///
/// Supplied by an external provider; preferred over day-by-day recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRange {
    pub range: DateRange,
    pub total_profit: Amount,
    pub other_profit: Amount,
    /// Range-level counts, authoritative over per-day sums when present
    #[serde(default)]
    pub counts: Option<TransactionCounts>,
    #[serde(default)]
    pub matches: Vec<MatchResult>,
    #[serde(default)]
    pub remaining: Vec<RemainingEntry>,
}

impl ConsolidatedRange {
    pub fn new(range: DateRange, total_profit: Amount, other_profit: Amount) -> Self {
        Self {
            range,
            total_profit,
            other_profit,
            counts: None,
            matches: Vec::new(),
            remaining: Vec::new(),
        }
    }

    /// Builder: attach authoritative counts
    pub fn with_counts(mut self, counts: TransactionCounts) -> Self {
        self.counts = Some(counts);
        self
    }

    /// Builder: attach the provider's match breakdown
    pub fn with_matches(mut self, matches: Vec<MatchResult>) -> Self {
        self.matches = matches;
        self
    }

    pub fn buy_sell_profit(&self) -> Amount {
        self.total_profit - self.other_profit
    }

    /// Profits must be finite to be trusted
    pub fn is_usable(&self) -> bool {
        self.total_profit.is_finite() && self.other_profit.is_finite()
    }
}
