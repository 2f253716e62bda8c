//! Summary Reduction
//!
//! Folds per-day or per-range summaries into one reporting total. Numeric
//! fields are summed; counts can be replaced by a range-level authoritative
//! count so rows seen by overlapping fetches are not counted twice.

use fxrecon_core::{PeriodSummary, TransactionCounts};
use log::debug;

/// Sum every field of the given summaries
pub fn reduce<'a, I>(summaries: I) -> PeriodSummary
where
    I: IntoIterator<Item = &'a PeriodSummary>,
{
    summaries
        .into_iter()
        .fold(PeriodSummary::default(), |acc, s| PeriodSummary {
            total_profit: acc.total_profit + s.total_profit,
            other_profit: acc.other_profit + s.other_profit,
            buy_sell_profit: acc.buy_sell_profit + s.buy_sell_profit,
            transaction_count: acc.transaction_count + s.transaction_count,
            buy_count: acc.buy_count + s.buy_count,
            sell_count: acc.sell_count + s.sell_count,
            source_volume: acc.source_volume + s.source_volume,
            target_volume: acc.target_volume + s.target_volume,
        })
}

/// Sum the summaries, then let authoritative counts override the summed ones
pub fn reduce_with_counts<'a, I>(
    summaries: I,
    authoritative: Option<TransactionCounts>,
) -> PeriodSummary
where
    I: IntoIterator<Item = &'a PeriodSummary>,
{
    let folded = reduce(summaries);
    match authoritative {
        Some(counts) => {
            if counts != folded.counts() {
                debug!(
                    "Authoritative counts {:?} replace summed counts {:?}",
                    counts,
                    folded.counts()
                );
            }
            folded.with_counts(counts)
        }
        None => folded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(profit: f64, other: f64, txs: u64, buys: u64, sells: u64) -> PeriodSummary {
        PeriodSummary::from_profits(
            profit,
            other,
            TransactionCounts {
                transaction_count: txs,
                buy_count: buys,
                sell_count: sells,
            },
            txs as f64 * 1_000.0,
            txs as f64 * 10.0,
        )
    }

    #[test]
    fn test_reduce_sums_every_field() {
        let days = [day(100.0, 5.0, 3, 1, 1), day(-40.0, 0.0, 2, 1, 1)];
        let total = reduce(&days);

        assert_eq!(total.total_profit, 65.0);
        assert_eq!(total.buy_sell_profit, 60.0);
        assert_eq!(total.other_profit, 5.0);
        assert_eq!(total.transaction_count, 5);
        assert_eq!(total.buy_count, 2);
        assert_eq!(total.sell_count, 2);
        assert_eq!(total.source_volume, 5_000.0);
        assert_eq!(total.target_volume, 50.0);
    }

    #[test]
    fn test_reduce_empty_is_zero() {
        let none: [PeriodSummary; 0] = [];
        assert_eq!(reduce(&none), PeriodSummary::default());
    }

    #[test]
    fn test_authoritative_counts_override_sum() {
        let days = [day(10.0, 0.0, 4, 2, 2), day(10.0, 0.0, 4, 2, 2)];
        let range_counts = TransactionCounts {
            transaction_count: 6,
            buy_count: 3,
            sell_count: 3,
        };

        let total = reduce_with_counts(&days, Some(range_counts));
        assert_eq!(total.counts(), range_counts);
        assert_eq!(total.total_profit, 20.0);
        assert_eq!(total.source_volume, 8_000.0);

        let summed = reduce_with_counts(&days, None);
        assert_eq!(summed.transaction_count, 8);
    }
}
