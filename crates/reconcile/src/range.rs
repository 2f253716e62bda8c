//! Range Aggregation
//!
//! Produces one summary for a `[start, end]` span with a two-tier strategy:
//!
//! ```text
//! TryConsolidated ──(usable result)──────────────► Done
//!        │
//!        └─(absent / unavailable / failed)──► DayByDay ──► Done
//! ```
//!
//! The day-by-day path runs the daily aggregator once per calendar day in
//! ascending order and folds the results. A failing day is isolated: it
//! contributes a zero summary and is listed in `failed_days`.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use fxrecon_core::{
    Anomaly, ConsolidatedRange, DateRange, MatchResult, PeriodSummary, RemainingEntry, ReportRow,
    TransactionId,
};
use fxrecon_ports::{SourceError, SourceResult, TransactionSource};
use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{InventoryPolicy, ReconcileConfig};
use crate::daily::{DailyAggregator, Tally};
use crate::error::{DayFailure, Error, Result};
use crate::summary;

/// Which tier produced a range result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RangeStrategy {
    Consolidated,
    DayByDay,
}

/// Reporting scope an output row or item originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day(NaiveDate),
    Range(DateRange),
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Day(day) => write!(f, "{}", day),
            Period::Range(range) => write!(f, "{}", range),
        }
    }
}

/// An output item tagged with its originating period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dated<T> {
    pub period: Period,
    pub item: T,
}

impl<T> Dated<T> {
    fn tag(period: Period, items: Vec<T>) -> impl Iterator<Item = Dated<T>> {
        items.into_iter().map(move |item| Dated { period, item })
    }
}

/// Summary of one day (day-by-day) or of the whole range (consolidated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodRow {
    pub period: Period,
    pub summary: PeriodSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeReport {
    pub range: DateRange,
    pub strategy: RangeStrategy,
    /// Merged total for the range
    pub summary: PeriodSummary,
    pub rows: Vec<PeriodRow>,
    pub matches: Vec<Dated<MatchResult>>,
    pub remaining: Vec<Dated<RemainingEntry>>,
    pub anomalies: Vec<Dated<Anomaly>>,
    pub failed_days: Vec<DayFailure>,
}

impl RangeReport {
    /// One fixed-point row per period, in order
    pub fn report_rows(&self) -> Vec<ReportRow> {
        self.rows
            .iter()
            .map(|row| row.summary.to_report(row.period.to_string()))
            .collect()
    }

    /// Fixed-point row for the merged total
    pub fn total_row(&self) -> ReportRow {
        self.summary.to_report(self.range.to_string())
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_days.is_empty()
    }
}

enum Step {
    TryConsolidated(Option<SourceResult<ConsolidatedRange>>),
    DayByDay,
    Done(RangeReport),
}

pub struct RangeAggregator {
    daily: DailyAggregator,
    inventory_policy: InventoryPolicy,
    max_range_days: Option<u64>,
}

impl RangeAggregator {
    pub fn new(config: &ReconcileConfig) -> Self {
        Self::with_daily(DailyAggregator::new(config), config)
    }

    /// Use a prepared daily aggregator
    pub fn with_daily(daily: DailyAggregator, config: &ReconcileConfig) -> Self {
        Self {
            daily,
            inventory_policy: config.inventory_policy,
            max_range_days: config.max_range_days,
        }
    }

    pub fn daily(&self) -> &DailyAggregator {
        &self.daily
    }

    /// Aggregate a range, preferring the consolidated result when usable
    ///
    /// `consolidated` is whatever the caller obtained from the provider:
    /// `None` when it was not asked, `Some(Err(_))` when it could not answer.
    pub fn aggregate(
        &self,
        range: DateRange,
        source: &dyn TransactionSource,
        consolidated: Option<SourceResult<ConsolidatedRange>>,
    ) -> Result<RangeReport> {
        self.check_span(range)?;

        let mut step = Step::TryConsolidated(consolidated);
        loop {
            step = match step {
                Step::TryConsolidated(candidate) => {
                    match self.from_consolidated(range, source, candidate) {
                        Some(report) => Step::Done(report),
                        None => Step::DayByDay,
                    }
                }
                Step::DayByDay => Step::Done(self.day_by_day(range, source)),
                Step::Done(report) => return Ok(report),
            };
        }
    }

    fn check_span(&self, range: DateRange) -> Result<()> {
        match self.max_range_days {
            Some(limit) if range.num_days() > limit => Err(Error::RangeTooLong {
                days: range.num_days(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    fn from_consolidated(
        &self,
        range: DateRange,
        source: &dyn TransactionSource,
        candidate: Option<SourceResult<ConsolidatedRange>>,
    ) -> Option<RangeReport> {
        let consolidated = match candidate {
            None => {
                debug!("No consolidated result for {}, computing day by day", range);
                return None;
            }
            Some(Err(SourceError::Unavailable(reason))) => {
                info!("Consolidated result unavailable for {} ({}), computing day by day", range, reason);
                return None;
            }
            Some(Err(err)) => {
                warn!("Consolidated result for {} failed: {}, computing day by day", range, err);
                return None;
            }
            Some(Ok(consolidated)) => consolidated,
        };

        if consolidated.range != range {
            warn!(
                "Consolidated result covers {} but {} was requested, computing day by day",
                consolidated.range, range
            );
            return None;
        }
        if !consolidated.is_usable() {
            warn!("Consolidated result for {} has non-finite profit, computing day by day", range);
            return None;
        }

        // Volumes come from the records themselves; profit from the provider
        let tally = match source.for_range(range) {
            Ok(transactions) => Tally::of(&transactions),
            Err(err) => {
                warn!("Could not load records for {}: {}, volumes reported as zero", range, err);
                Tally::default()
            }
        };
        let period = Period::Range(range);
        let computed = PeriodSummary::from_profits(
            consolidated.buy_sell_profit(),
            consolidated.other_profit,
            tally.counts,
            tally.source_volume,
            tally.target_volume,
        );
        let summary = summary::reduce_with_counts([&computed], consolidated.counts);

        info!(
            "Range {} taken from consolidated result: total profit {}",
            range, summary.total_profit
        );

        Some(RangeReport {
            range,
            strategy: RangeStrategy::Consolidated,
            rows: vec![PeriodRow {
                period,
                summary: summary.clone(),
            }],
            summary,
            matches: Dated::tag(period, consolidated.matches).collect(),
            remaining: Dated::tag(period, consolidated.remaining).collect(),
            anomalies: Vec::new(),
            failed_days: Vec::new(),
        })
    }

    fn day_by_day(&self, range: DateRange, source: &dyn TransactionSource) -> RangeReport {
        let carry = self.inventory_policy == InventoryPolicy::Carryover;
        let mut rows = Vec::with_capacity(range.num_days() as usize);
        let mut matches = Vec::new();
        let mut remaining = Vec::new();
        let mut anomalies = Vec::new();
        let mut failed_days = Vec::new();
        // Open inventory handed from one day to the next under carryover
        let mut opening: Vec<Dated<RemainingEntry>> = Vec::new();

        for day in range.days() {
            let period = Period::Day(day);
            let carried: Vec<RemainingEntry> = opening.iter().map(|d| d.item.clone()).collect();
            let result = source
                .for_day(day)
                .map_err(Error::from)
                .and_then(|transactions| self.daily.aggregate_day(day, &transactions, &carried));

            match result {
                Ok(report) => {
                    rows.push(PeriodRow {
                        period,
                        summary: report.summary,
                    });
                    matches.extend(Dated::tag(period, report.matches));
                    anomalies.extend(Dated::tag(period, report.anomalies));
                    if carry {
                        opening = carry_forward(&opening, period, report.remaining);
                    } else {
                        remaining.extend(Dated::tag(period, report.remaining));
                    }
                }
                Err(err) => {
                    warn!("Daily computation for {} failed: {}", day, err);
                    rows.push(PeriodRow {
                        period,
                        summary: PeriodSummary::default(),
                    });
                    failed_days.push(DayFailure::new(day, &err));
                }
            }
        }

        if carry {
            remaining = opening;
        }

        let summary = summary::reduce(rows.iter().map(|row| &row.summary));

        info!(
            "Range {} computed day by day: {} days, {} failed, total profit {}",
            range,
            rows.len(),
            failed_days.len(),
            summary.total_profit
        );

        RangeReport {
            range,
            strategy: RangeStrategy::DayByDay,
            summary,
            rows,
            matches,
            remaining,
            anomalies,
            failed_days,
        }
    }
}

/// Next day's opening inventory; carried entries keep the day they came from
fn carry_forward(
    opening: &[Dated<RemainingEntry>],
    period: Period,
    remaining: Vec<RemainingEntry>,
) -> Vec<Dated<RemainingEntry>> {
    let origins: HashMap<TransactionId, Period> = opening
        .iter()
        .map(|dated| (dated.item.transaction_id, dated.period))
        .collect();

    remaining
        .into_iter()
        .map(|item| Dated {
            period: origins.get(&item.transaction_id).copied().unwrap_or(period),
            item,
        })
        .collect()
}
