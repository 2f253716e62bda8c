//! FX Reconciliation Core Domain
//!
//! Pure domain types for the currency-exchange profit reconciliation engine.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Matching output
    Anomaly,
    AnomalyReason,
    // Range inputs
    ConsolidatedRange,
    DateRange,
    DateRangeError,
    MatchOutcome,
    MatchResult,
    // Reporting
    PeriodSummary,
    RemainingEntry,
    ReportRow,
    // Input records
    Side,
    Transaction,
    TransactionCounts,
    TransactionKind,
};
pub use values::{Amount, BusinessDate, Rate, Timestamp, TransactionId, business_date};
