use fxrecon_core::Rate;
use thiserror::Error;

/// Why a rate cannot be used for division
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum RateError {
    #[error("Rate is not a finite number: {0}")]
    NotFinite(Rate),

    #[error("Rate must be positive, got {0}")]
    NotPositive(Rate),
}

impl RateError {
    /// The rejected value
    pub fn rate(&self) -> Rate {
        match self {
            RateError::NotFinite(rate) | RateError::NotPositive(rate) => *rate,
        }
    }
}

pub type RateResult<T> = std::result::Result<T, RateError>;

/// Errors reported by external data providers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// Provider has nothing for this request; a fallback trigger, not a fault
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Source failed: {0}")]
    Failed(String),
}

pub type SourceResult<T> = std::result::Result<T, SourceError>;
