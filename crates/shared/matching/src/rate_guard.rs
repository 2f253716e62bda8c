use fxrecon_core::{Amount, Rate};
use fxrecon_ports::{RateError, RateResult};

/// A rate that is finite and strictly positive, safe to divide by
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PositiveRate(Rate);

impl PositiveRate {
    pub fn get(self) -> Rate {
        self.0
    }

    /// Convert a minor-currency amount into major units
    pub fn convert(self, minor_amount: Amount) -> Amount {
        minor_amount / self.0
    }

    /// Major units received for 100,000 minor units
    pub fn per_hundred_thousand(self) -> Amount {
        self.convert(100_000.0)
    }
}

impl TryFrom<Rate> for PositiveRate {
    type Error = RateError;

    fn try_from(rate: Rate) -> RateResult<Self> {
        validate(rate)
    }
}

/// Check that a rate can be used for division
///
/// Never substitutes a default; fallback policy belongs to the caller.
pub fn validate(rate: Rate) -> RateResult<PositiveRate> {
    if !rate.is_finite() {
        return Err(RateError::NotFinite(rate));
    }
    if rate <= 0.0 {
        return Err(RateError::NotPositive(rate));
    }
    Ok(PositiveRate(rate))
}
