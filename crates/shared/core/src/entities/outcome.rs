use serde::{Deserialize, Serialize};

use super::{Anomaly, MatchResult, RemainingEntry, Side};
use crate::values::Amount;

/// Everything one matcher run produces for a period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Match steps in the order they happened
    pub matches: Vec<MatchResult>,
    /// Open inventory, BUY entries first then SELL, each in time order
    pub remaining: Vec<RemainingEntry>,
    pub anomalies: Vec<Anomaly>,
}

impl MatchOutcome {
    /// Sum of per-match profit
    pub fn profit(&self) -> Amount {
        self.matches.iter().map(|m| m.profit).sum()
    }

    pub fn matched_amount(&self) -> Amount {
        self.matches.iter().map(|m| m.matched_amount).sum()
    }

    pub fn remaining_amount(&self, side: Side) -> Amount {
        self.remaining
            .iter()
            .filter(|r| r.side == side)
            .map(|r| r.remaining_amount)
            .sum()
    }

    pub fn remaining_for(&self, side: Side) -> impl Iterator<Item = &RemainingEntry> {
        self.remaining.iter().filter(move |r| r.side == side)
    }
}
