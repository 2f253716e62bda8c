use serde::{Deserialize, Serialize};

use super::Side;

/// Kind of a transaction record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionKind {
    /// Customer hands over minor currency, receives major currency
    Buy,
    /// Customer hands over major currency, receives minor currency
    Sell,
    /// Flat profit/loss entry, never matched
    Other,
}

impl TransactionKind {
    /// Matching side, `None` for OTHER entries
    pub fn side(&self) -> Option<Side> {
        match self {
            TransactionKind::Buy => Some(Side::Buy),
            TransactionKind::Sell => Some(Side::Sell),
            TransactionKind::Other => None,
        }
    }
}

impl From<Side> for TransactionKind {
    fn from(side: Side) -> Self {
        match side {
            Side::Buy => TransactionKind::Buy,
            Side::Sell => TransactionKind::Sell,
        }
    }
}
