use serde::{Deserialize, Serialize};

use super::Side;
use crate::values::{Amount, Rate, Timestamp, TransactionId};

/// Unconsumed part of a BUY or SELL transaction after matching (open inventory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingEntry {
    pub transaction_id: TransactionId,
    pub side: Side,
    pub timestamp: Timestamp,
    pub customer: String,
    /// Amount the transaction entered matching with
    pub original_amount: Amount,
    pub remaining_amount: Amount,
    pub rate: Rate,
}

impl RemainingEntry {
    /// True when part of the transaction was matched
    pub fn is_partial(&self) -> bool {
        self.remaining_amount < self.original_amount
    }
}
