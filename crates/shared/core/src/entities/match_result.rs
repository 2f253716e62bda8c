use serde::{Deserialize, Serialize};

use crate::values::{Amount, Rate, Timestamp, TransactionId};

/// One BUY/SELL pairing step produced by the matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub buy_id: TransactionId,
    pub sell_id: TransactionId,
    pub buy_time: Timestamp,
    pub sell_time: Timestamp,
    pub buy_customer: String,
    pub sell_customer: String,
    pub buy_rate: Rate,
    pub sell_rate: Rate,
    /// Minor-currency volume moved in this step
    pub matched_amount: Amount,
    /// `matched_amount / buy_rate`
    pub matched_major_amount: Amount,
    /// `matched_amount / sell_rate - matched_amount / buy_rate`
    pub profit: Amount,
}

impl MatchResult {
    /// Difference between the two rates of the pair
    pub fn rate_spread(&self) -> Rate {
        self.sell_rate - self.buy_rate
    }
}
