//! Reconciliation errors

use chrono::NaiveDate;
use fxrecon_core::{DateRangeError, TransactionId};
use fxrecon_ports::SourceError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid date range: {0}")]
    InvalidRange(#[from] DateRangeError),

    #[error("Range spans {days} days, limit is {limit}")]
    RangeTooLong { days: u64, limit: u64 },

    #[error("Malformed transaction {id}: {reason}")]
    MalformedTransaction { id: TransactionId, reason: String },

    #[error("Transaction {id} is booked on {booked}, expected {expected}")]
    WrongDay {
        id: TransactionId,
        booked: NaiveDate,
        expected: NaiveDate,
    },

    #[error("Transaction source error: {0}")]
    Source(#[from] SourceError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A day whose computation failed inside a range; it contributed zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayFailure {
    pub date: NaiveDate,
    pub reason: String,
}

impl DayFailure {
    pub fn new(date: NaiveDate, error: &Error) -> Self {
        Self {
            date,
            reason: error.to_string(),
        }
    }
}
