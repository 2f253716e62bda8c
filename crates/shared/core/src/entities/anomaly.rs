use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::values::{Rate, TransactionId};

/// Why a transaction (or a match step) was left out of profit
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnomalyReason {
    #[error("Invalid rate {rate}: {detail}")]
    InvalidRate { rate: Rate, detail: String },

    #[error("Degenerate match: {detail}")]
    DegenerateMatch { detail: String },
}

/// Validation anomaly surfaced next to the numeric result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub transaction_id: TransactionId,
    pub reason: AnomalyReason,
}

impl Anomaly {
    pub fn invalid_rate(transaction_id: TransactionId, rate: Rate, detail: impl Into<String>) -> Self {
        Self {
            transaction_id,
            reason: AnomalyReason::InvalidRate {
                rate,
                detail: detail.into(),
            },
        }
    }

    pub fn degenerate(transaction_id: TransactionId, detail: impl Into<String>) -> Self {
        Self {
            transaction_id,
            reason: AnomalyReason::DegenerateMatch {
                detail: detail.into(),
            },
        }
    }

    pub fn is_invalid_rate(&self) -> bool {
        matches!(self.reason, AnomalyReason::InvalidRate { .. })
    }
}
