//! FX Reconciliation Matching
//!
//! Rate validation and the BUY/SELL pairing algorithm used to realise profit.

mod fifo;
mod rate_guard;

pub use fifo::{DEFAULT_EPSILON, FifoMatcher, Lot, MatcherConfig};
pub use rate_guard::{PositiveRate, validate};

// Re-export the trait from ports for convenience
pub use fxrecon_ports::{MatchingAlgorithm, RateError, RateResult};
