use std::ops::Add;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::values::Amount;

/// Record counts for a reporting scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCounts {
    pub transaction_count: u64,
    pub buy_count: u64,
    pub sell_count: u64,
}

impl Add for TransactionCounts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            transaction_count: self.transaction_count + rhs.transaction_count,
            buy_count: self.buy_count + rhs.buy_count,
            sell_count: self.sell_count + rhs.sell_count,
        }
    }
}

/// Profit, volume and count totals for one day or one range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub total_profit: Amount,
    pub other_profit: Amount,
    /// Always `total_profit - other_profit`
    pub buy_sell_profit: Amount,
    pub transaction_count: u64,
    pub buy_count: u64,
    pub sell_count: u64,
    /// Sum of minor-currency amounts
    pub source_volume: Amount,
    /// Sum of major-currency amounts
    pub target_volume: Amount,
}

impl PeriodSummary {
    /// Build from the two profit channels; the total is their sum
    pub fn from_profits(
        buy_sell_profit: Amount,
        other_profit: Amount,
        counts: TransactionCounts,
        source_volume: Amount,
        target_volume: Amount,
    ) -> Self {
        Self {
            total_profit: buy_sell_profit + other_profit,
            other_profit,
            buy_sell_profit,
            transaction_count: counts.transaction_count,
            buy_count: counts.buy_count,
            sell_count: counts.sell_count,
            source_volume,
            target_volume,
        }
    }

    pub fn counts(&self) -> TransactionCounts {
        TransactionCounts {
            transaction_count: self.transaction_count,
            buy_count: self.buy_count,
            sell_count: self.sell_count,
        }
    }

    /// Builder: replace the counts
    pub fn with_counts(mut self, counts: TransactionCounts) -> Self {
        self.transaction_count = counts.transaction_count;
        self.buy_count = counts.buy_count;
        self.sell_count = counts.sell_count;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0
    }

    /// Fixed-point view for the reporting layer, money rounded to 2 dp
    pub fn to_report(&self, label: impl Into<String>) -> ReportRow {
        ReportRow {
            label: label.into(),
            total_profit: money(self.total_profit),
            buy_sell_profit: money(self.buy_sell_profit),
            other_profit: money(self.other_profit),
            transaction_count: self.transaction_count,
            buy_count: self.buy_count,
            sell_count: self.sell_count,
            source_volume: money(self.source_volume),
            target_volume: money(self.target_volume),
        }
    }
}

/// One rendered row of a profit report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    /// Day or range label
    pub label: String,
    pub total_profit: Decimal,
    pub buy_sell_profit: Decimal,
    pub other_profit: Decimal,
    pub transaction_count: u64,
    pub buy_count: u64,
    pub sell_count: u64,
    pub source_volume: Decimal,
    pub target_volume: Decimal,
}

// Non-finite values render as zero
fn money(value: Amount) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
