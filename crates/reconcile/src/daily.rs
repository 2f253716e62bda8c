//! Daily Aggregation
//!
//! Runs the matcher over one day's BUY/SELL records and adds OTHER records'
//! flat profit as a separate channel. Counts and volumes cover every record
//! of the day, including ones the matcher excluded.

use chrono::NaiveDate;
use fxrecon_core::{
    Amount, Anomaly, MatchResult, PeriodSummary, RemainingEntry, Transaction, TransactionCounts,
    TransactionKind, business_date,
};
use fxrecon_matching::{FifoMatcher, MatchingAlgorithm};
use log::debug;
use serde::Serialize;

use crate::config::ReconcileConfig;
use crate::error::{Error, Result};

/// Everything computed for one day (or one ad-hoc transaction set)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    /// `None` when aggregated without a day boundary
    pub date: Option<NaiveDate>,
    pub summary: PeriodSummary,
    pub matches: Vec<MatchResult>,
    pub remaining: Vec<RemainingEntry>,
    pub anomalies: Vec<Anomaly>,
}

/// Counts and volumes over a full record set
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub counts: TransactionCounts,
    pub source_volume: Amount,
    pub target_volume: Amount,
    pub other_profit: Amount,
}

impl Tally {
    pub fn of(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut tally, tx| {
            tally.counts.transaction_count += 1;
            match tx.kind {
                TransactionKind::Buy => tally.counts.buy_count += 1,
                TransactionKind::Sell => tally.counts.sell_count += 1,
                TransactionKind::Other => tally.other_profit += tx.flat_profit,
            }
            tally.source_volume += tx.source_amount;
            tally.target_volume += tx.target_amount;
            tally
        })
    }

    /// Summary with the given matched profit
    pub fn summary(&self, buy_sell_profit: Amount) -> PeriodSummary {
        PeriodSummary::from_profits(
            buy_sell_profit,
            self.other_profit,
            self.counts,
            self.source_volume,
            self.target_volume,
        )
    }
}

pub struct DailyAggregator {
    matcher: Box<dyn MatchingAlgorithm>,
    utc_offset_minutes: i32,
}

impl DailyAggregator {
    /// FIFO matcher tuned by the configuration
    pub fn new(config: &ReconcileConfig) -> Self {
        Self::with_matcher(
            Box::new(FifoMatcher::with_config(config.matcher_config())),
            config.business_utc_offset_minutes,
        )
    }

    /// Use a different matching algorithm
    pub fn with_matcher(matcher: Box<dyn MatchingAlgorithm>, utc_offset_minutes: i32) -> Self {
        Self {
            matcher,
            utc_offset_minutes,
        }
    }

    pub fn matcher_name(&self) -> &str {
        self.matcher.name()
    }

    /// Aggregate a transaction set without checking which day it belongs to
    pub fn aggregate(&self, transactions: &[Transaction]) -> Result<DailyReport> {
        for tx in transactions {
            check_record(tx)?;
        }
        Ok(self.compute(None, transactions, &[]))
    }

    /// Aggregate one business day, opening with carried inventory
    ///
    /// Every record must be well formed and booked on `day`.
    pub fn aggregate_day(
        &self,
        day: NaiveDate,
        transactions: &[Transaction],
        opening: &[RemainingEntry],
    ) -> Result<DailyReport> {
        for tx in transactions {
            check_record(tx)?;
            let booked = business_date(tx.timestamp, self.utc_offset_minutes).ok_or_else(|| {
                Error::MalformedTransaction {
                    id: tx.id,
                    reason: format!("timestamp {} has no business day", tx.timestamp),
                }
            })?;
            if booked != day {
                return Err(Error::WrongDay {
                    id: tx.id,
                    booked,
                    expected: day,
                });
            }
        }
        Ok(self.compute(Some(day), transactions, opening))
    }

    fn compute(
        &self,
        date: Option<NaiveDate>,
        transactions: &[Transaction],
        opening: &[RemainingEntry],
    ) -> DailyReport {
        let outcome = self.matcher.match_with_opening(opening, transactions);
        let tally = Tally::of(transactions);
        let summary = tally.summary(outcome.profit());

        debug!(
            "Aggregated {:?}: {} records, buy/sell profit={}, other profit={}, matches={}",
            date,
            summary.transaction_count,
            summary.buy_sell_profit,
            summary.other_profit,
            outcome.matches.len()
        );

        DailyReport {
            date,
            summary,
            matches: outcome.matches,
            remaining: outcome.remaining,
            anomalies: outcome.anomalies,
        }
    }
}

fn check_record(tx: &Transaction) -> Result<()> {
    let malformed = |reason: String| Error::MalformedTransaction { id: tx.id, reason };

    if !tx.source_amount.is_finite() || tx.source_amount < 0.0 {
        return Err(malformed(format!("source_amount {}", tx.source_amount)));
    }
    if !tx.target_amount.is_finite() || tx.target_amount < 0.0 {
        return Err(malformed(format!("target_amount {}", tx.target_amount)));
    }
    if !tx.flat_profit.is_finite() {
        return Err(malformed(format!("flat_profit {}", tx.flat_profit)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use fxrecon_core::{Side, Timestamp};
    use fxrecon_matching::MatcherConfig;

    fn at(hour: u32) -> Timestamp {
        Utc.with_ymd_and_hms(2024, 6, 3, hour, 0, 0).unwrap()
    }

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, day).unwrap()
    }

    fn aggregator() -> DailyAggregator {
        DailyAggregator::new(&ReconcileConfig::default())
    }

    #[test]
    fn test_profit_channels_and_counts() {
        let txs = vec![
            Transaction::buy("A", 50_000.0, 0.80, at(9)),
            Transaction::sell("B", 30_000.0, 0.75, at(10)),
            Transaction::other("commission", 150.0, at(11)),
            Transaction::other("bank fee", -50.0, at(12)),
        ];

        let report = aggregator().aggregate(&txs).unwrap();
        let s = &report.summary;

        assert!((s.buy_sell_profit - 2_500.0).abs() < 1e-6);
        assert_eq!(s.other_profit, 100.0);
        assert!((s.total_profit - 2_600.0).abs() < 1e-6);
        assert_eq!(s.transaction_count, 4);
        assert_eq!(s.buy_count, 1);
        assert_eq!(s.sell_count, 1);
        assert_eq!(s.source_volume, 80_000.0);
        assert!((s.target_volume - (62_500.0 + 40_000.0)).abs() < 1e-6);
        assert_eq!(report.matches.len(), 1);
        assert_eq!(report.remaining.len(), 1);
        assert_eq!(report.remaining[0].remaining_amount, 20_000.0);
        assert_eq!(report.date, None);
    }

    #[test]
    fn test_invalid_rate_counts_but_earns_nothing() {
        let bad = Transaction::sell("C", 10_000.0, 0.0, at(10)).with_target_amount(12_000.0);
        let txs = vec![Transaction::buy("A", 10_000.0, 0.8, at(9)), bad.clone()];

        let report = aggregator().aggregate(&txs).unwrap();

        assert_eq!(report.summary.buy_sell_profit, 0.0);
        assert_eq!(report.summary.transaction_count, 2);
        assert_eq!(report.summary.sell_count, 1);
        assert_eq!(report.summary.source_volume, 20_000.0);
        assert!((report.summary.target_volume - 24_500.0).abs() < 1e-6);
        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].transaction_id, bad.id);
        // Excluded records are not open inventory
        assert_eq!(report.remaining.len(), 1);
        assert_eq!(report.remaining[0].side, Side::Buy);
    }

    #[test]
    fn test_sell_only_day() {
        let txs = vec![
            Transaction::sell("A", 1_000.0, 0.8, at(9)),
            Transaction::sell("B", 2_000.0, 0.8, at(10)),
        ];

        let report = aggregator().aggregate_day(june(3), &txs, &[]).unwrap();

        assert_eq!(report.summary.buy_sell_profit, 0.0);
        assert!(report.matches.is_empty());
        assert_eq!(report.remaining.len(), 2);
        assert!(report.remaining.iter().all(|r| r.side == Side::Sell));
        assert_eq!(report.date, Some(june(3)));
    }

    #[test]
    fn test_wrong_day_is_rejected() {
        let tx = Transaction::buy("A", 1_000.0, 0.8, at(9));
        let err = aggregator().aggregate_day(june(4), &[tx.clone()], &[]).unwrap_err();

        assert_eq!(
            err,
            Error::WrongDay {
                id: tx.id,
                booked: june(3),
                expected: june(4)
            }
        );
    }

    #[test]
    fn test_business_offset_moves_late_records() {
        let config = ReconcileConfig {
            business_utc_offset_minutes: 390,
            ..Default::default()
        };
        // 20:00 UTC is 02:30 next day in Yangon
        let tx = Transaction::buy("A", 1_000.0, 0.8, at(20));

        let report = DailyAggregator::new(&config).aggregate_day(june(4), &[tx], &[]);
        assert!(report.is_ok());
    }

    #[test]
    fn test_malformed_amount_fails_the_day() {
        let bad = Transaction::buy("A", -5.0, 0.8, at(9));
        let err = aggregator().aggregate(&[bad.clone()]).unwrap_err();
        assert!(matches!(err, Error::MalformedTransaction { id, .. } if id == bad.id));

        let nan_profit = Transaction::other("x", f64::NAN, at(9));
        assert!(aggregator().aggregate(&[nan_profit]).is_err());
    }

    #[test]
    fn test_unrepresentable_business_day_is_malformed() {
        let config = ReconcileConfig {
            business_utc_offset_minutes: 390,
            ..Default::default()
        };
        let tx = Transaction::buy("A", 1_000.0, 0.8, DateTime::<Utc>::MAX_UTC);

        let err = DailyAggregator::new(&config)
            .aggregate_day(june(3), &[tx.clone()], &[])
            .unwrap_err();
        assert!(matches!(err, Error::MalformedTransaction { id, .. } if id == tx.id));
    }

    #[test]
    fn test_custom_matcher() {
        let coarse = FifoMatcher::with_config(MatcherConfig { epsilon: 500.0 });
        let coarse_daily = DailyAggregator::with_matcher(Box::new(coarse), 0);
        let txs = vec![
            Transaction::buy("A", 1_000.0, 0.8, at(9)),
            Transaction::sell("B", 700.0, 0.75, at(10)),
        ];

        let report = coarse_daily.aggregate_day(june(3), &txs, &[]).unwrap();

        // The 300 left on the buy is below the coarse threshold
        assert_eq!(report.matches.len(), 1);
        assert!(report.remaining.is_empty());
        assert_eq!(coarse_daily.matcher_name(), "FIFO");
        assert_eq!(aggregator().aggregate_day(june(3), &txs, &[]).unwrap().remaining.len(), 1);
    }

    #[test]
    fn test_empty_day() {
        let report = aggregator().aggregate_day(june(3), &[], &[]).unwrap();
        assert_eq!(report.summary, PeriodSummary::default());
        assert!(report.summary.is_empty());
        assert_eq!(aggregator().matcher_name(), "FIFO");
    }
}
