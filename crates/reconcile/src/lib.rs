//! FX Reconcile
//!
//! Turns raw exchange records into profit summaries for reporting:
//! - **Daily Aggregation**: FIFO-matches one day's BUY/SELL records and adds OTHER flat profit
//! - **Range Aggregation**: Prefers a consolidated provider result, falls back to day by day
//! - **Summary Reduction**: Folds per-period summaries into one total
//! - **Rate Resolution**: Validates rates with a last-known-good fallback
//!
//! ## Architecture
//!
//! ```text
//! Consolidated ──────────────┐
//! provider result            │
//!                            ▼
//!                 ┌──────────────────────────────────────┐
//!                 │          Range Aggregator            │
//!                 │  TryConsolidated ──► Done            │
//!                 │        │                ▲            │
//!                 │        ▼                │            │
//!                 │     DayByDay ───────────┘            │
//!                 │        │ per day, ascending          │
//!                 │  ┌─────▼──────────────────────────┐  │
//! Transaction ───►│  │   Daily Aggregator             │  │
//! Source          │  │   - FIFO matcher (BUY/SELL)    │  │
//!                 │  │   - OTHER flat profit          │  │
//!                 │  │   - counts and volumes         │  │
//!                 │  └─────┬──────────────────────────┘  │
//!                 │        │ PeriodSummary per day       │
//!                 │  ┌─────▼──────────────────────────┐  │
//!                 │  │   Summary Reducer              │  │
//!                 │  └─────┬──────────────────────────┘  │
//!                 └────────┼─────────────────────────────┘
//!                          ▼
//!                   RangeReport ──► ReportRow (2 dp)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fxrecon_reconcile::{InMemoryTransactionStore, RangeAggregator, ReconcileConfig};
//!
//! let config = ReconcileConfig::from_file("fxrecon.json")?;
//! let store = InMemoryTransactionStore::from_transactions(records, config.business_utc_offset_minutes);
//!
//! let report = RangeAggregator::new(&config).aggregate(range, &store, None)?;
//! for row in report.report_rows() {
//!     println!("{} {}", row.label, row.total_profit);
//! }
//! ```

pub mod breakdown;
pub mod config;
pub mod daily;
pub mod error;
pub mod range;
pub mod rates;
pub mod store;
pub mod summary;

// Re-export main types
pub use breakdown::{RateSpreadStats, profit_by_customer, spread_stats};
pub use config::{ConfigError, InventoryPolicy, ReconcileConfig};
pub use daily::{DailyAggregator, DailyReport, Tally};
pub use error::{DayFailure, Error, Result};
pub use range::{Dated, Period, PeriodRow, RangeAggregator, RangeReport, RangeStrategy};
pub use rates::{InMemoryRateCache, RateResolver};
pub use store::InMemoryTransactionStore;
pub use summary::{reduce, reduce_with_counts};
