//! FX Reconciliation Ports
//!
//! Port definitions (traits) for the reconciliation engine.
//! These define the boundaries between the pure engine and its callers:
//! the transaction store, the caller-side rate cache and the matcher itself.

mod error;
mod matching;
mod rates;
mod source;

pub use error::{RateError, RateResult, SourceError, SourceResult};
pub use matching::MatchingAlgorithm;
pub use rates::RateCache;
pub use source::TransactionSource;
