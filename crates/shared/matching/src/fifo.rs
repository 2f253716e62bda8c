use std::collections::VecDeque;

use fxrecon_core::{
    Amount, Anomaly, MatchOutcome, MatchResult, RemainingEntry, Side, Timestamp, Transaction,
    TransactionId,
};
use fxrecon_ports::MatchingAlgorithm;
use log::{debug, warn};

use crate::rate_guard::{PositiveRate, validate};

/// Remaining or matched amounts at or below this are treated as zero
pub const DEFAULT_EPSILON: Amount = 0.0001;

/// Matcher tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherConfig {
    /// Zero threshold for remaining and matched amounts
    pub epsilon: Amount,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

/// One queued unit of BUY or SELL volume
#[derive(Debug, Clone, PartialEq)]
pub struct Lot {
    pub transaction_id: TransactionId,
    pub side: Side,
    pub timestamp: Timestamp,
    pub customer: String,
    pub original_amount: Amount,
    /// Volume still available to match
    pub remaining: Amount,
    pub rate: PositiveRate,
}

impl Lot {
    /// Lot for a BUY/SELL transaction
    ///
    /// OTHER records, unusable rates and unusable amounts come back as anomalies.
    pub fn from_transaction(tx: &Transaction) -> Result<Self, Anomaly> {
        let Some(side) = tx.side() else {
            return Err(Anomaly::degenerate(tx.id, "OTHER records are not matchable"));
        };
        let rate = validate(tx.rate)
            .map_err(|e| Anomaly::invalid_rate(tx.id, e.rate(), e.to_string()))?;
        check_amount(tx.id, tx.source_amount)?;

        Ok(Self {
            transaction_id: tx.id,
            side,
            timestamp: tx.timestamp,
            customer: tx.customer.clone(),
            original_amount: tx.source_amount,
            remaining: tx.source_amount,
            rate,
        })
    }

    /// Lot for inventory carried over from an earlier period
    pub fn from_remaining(entry: &RemainingEntry) -> Result<Self, Anomaly> {
        let rate = validate(entry.rate)
            .map_err(|e| Anomaly::invalid_rate(entry.transaction_id, e.rate(), e.to_string()))?;
        check_amount(entry.transaction_id, entry.remaining_amount)?;

        Ok(Self {
            transaction_id: entry.transaction_id,
            side: entry.side,
            timestamp: entry.timestamp,
            customer: entry.customer.clone(),
            original_amount: entry.original_amount,
            remaining: entry.remaining_amount,
            rate,
        })
    }

    pub fn into_remaining(self) -> RemainingEntry {
        RemainingEntry {
            transaction_id: self.transaction_id,
            side: self.side,
            timestamp: self.timestamp,
            customer: self.customer,
            original_amount: self.original_amount,
            remaining_amount: self.remaining,
            rate: self.rate.get(),
        }
    }
}

fn check_amount(id: TransactionId, amount: Amount) -> Result<(), Anomaly> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Anomaly::degenerate(id, format!("unusable amount {amount}")));
    }
    Ok(())
}

/// Chronological first-available BUY/SELL pairing
///
/// Each side is a queue in timestamp order (ties keep input order). The heads
/// are paired for `min(buy, sell)` volume until either queue runs dry; this is
/// order-preserving greedy pairing, not profit-optimal pairing.
///
/// A head whose remaining amount is at or below epsilon is dropped on its own;
/// the opposite head stays queued rather than being discarded with it.
pub struct FifoMatcher {
    config: MatcherConfig,
}

impl FifoMatcher {
    pub fn new() -> Self {
        Self::with_config(MatcherConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Pair queues that are already in FIFO order
    pub fn match_lots(&self, buys: Vec<Lot>, sells: Vec<Lot>) -> MatchOutcome {
        self.run(buys.into(), sells.into(), Vec::new())
    }

    fn run(
        &self,
        mut buys: VecDeque<Lot>,
        mut sells: VecDeque<Lot>,
        mut anomalies: Vec<Anomaly>,
    ) -> MatchOutcome {
        let epsilon = self.config.epsilon;
        let mut matches = Vec::new();

        while let (Some(buy), Some(sell)) = (buys.front_mut(), sells.front_mut()) {
            let matched_amount = buy.remaining.min(sell.remaining);

            if matched_amount <= epsilon {
                // Only a lot that entered at ~zero gets here; drop the empty side(s)
                let buy_empty = buy.remaining <= epsilon;
                let sell_empty = sell.remaining <= epsilon;
                let mut dropped = Vec::with_capacity(2);
                if buy_empty {
                    dropped.extend(buys.pop_front());
                }
                if sell_empty {
                    dropped.extend(sells.pop_front());
                }
                for lot in dropped {
                    warn!(
                        "Skipping {} {} with near-zero amount {}",
                        lot.side.as_str(),
                        lot.transaction_id,
                        lot.remaining
                    );
                    anomalies.push(Anomaly::degenerate(
                        lot.transaction_id,
                        format!("amount {} at or below epsilon {}", lot.remaining, epsilon),
                    ));
                }
                continue;
            }

            let matched_major_amount = buy.rate.convert(matched_amount);
            let profit = sell.rate.convert(matched_amount) - matched_major_amount;

            if !profit.is_finite() || !matched_major_amount.is_finite() {
                warn!(
                    "Discarding match buy={} sell={}: non-finite profit (amount={}, buy_rate={}, sell_rate={})",
                    buy.transaction_id,
                    sell.transaction_id,
                    matched_amount,
                    buy.rate.get(),
                    sell.rate.get()
                );
                let detail = format!("non-finite profit for matched amount {matched_amount}");
                anomalies.push(Anomaly::degenerate(buy.transaction_id, detail.clone()));
                anomalies.push(Anomaly::degenerate(sell.transaction_id, detail));
                buys.pop_front();
                sells.pop_front();
                continue;
            }

            matches.push(MatchResult {
                buy_id: buy.transaction_id,
                sell_id: sell.transaction_id,
                buy_time: buy.timestamp,
                sell_time: sell.timestamp,
                buy_customer: buy.customer.clone(),
                sell_customer: sell.customer.clone(),
                buy_rate: buy.rate.get(),
                sell_rate: sell.rate.get(),
                matched_amount,
                matched_major_amount,
                profit,
            });

            buy.remaining -= matched_amount;
            sell.remaining -= matched_amount;
            let buy_done = buy.remaining <= epsilon;
            let sell_done = sell.remaining <= epsilon;
            if buy_done {
                buys.pop_front();
            }
            if sell_done {
                sells.pop_front();
            }
        }

        let remaining: Vec<RemainingEntry> = buys
            .into_iter()
            .chain(sells)
            .map(Lot::into_remaining)
            .collect();

        let outcome = MatchOutcome {
            matches,
            remaining,
            anomalies,
        };

        debug!(
            "FIFO matched {} pairs: profit={}, open entries={}, anomalies={}",
            outcome.matches.len(),
            outcome.profit(),
            outcome.remaining.len(),
            outcome.anomalies.len()
        );

        outcome
    }

    /// Build both queues: opening inventory first, then the period's records
    fn enqueue(
        &self,
        opening: &[RemainingEntry],
        transactions: &[Transaction],
    ) -> (VecDeque<Lot>, VecDeque<Lot>, Vec<Anomaly>) {
        let mut buys = VecDeque::new();
        let mut sells = VecDeque::new();
        let mut anomalies = Vec::new();

        // Stable sorts keep input order for equal timestamps
        let mut carried: Vec<&RemainingEntry> = opening.iter().collect();
        carried.sort_by_key(|entry| entry.timestamp);
        let mut ordered: Vec<&Transaction> =
            transactions.iter().filter(|tx| !tx.is_other()).collect();
        ordered.sort_by_key(|tx| tx.timestamp);

        let lots = carried
            .into_iter()
            .map(Lot::from_remaining)
            .chain(ordered.into_iter().map(Lot::from_transaction));

        for lot in lots {
            match lot {
                Ok(lot) => match lot.side {
                    Side::Buy => buys.push_back(lot),
                    Side::Sell => sells.push_back(lot),
                },
                Err(anomaly) => {
                    warn!(
                        "Excluding transaction {} from matching: {}",
                        anomaly.transaction_id, anomaly.reason
                    );
                    anomalies.push(anomaly);
                }
            }
        }

        (buys, sells, anomalies)
    }
}

impl Default for FifoMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchingAlgorithm for FifoMatcher {
    fn match_with_opening(
        &self,
        opening: &[RemainingEntry],
        transactions: &[Transaction],
    ) -> MatchOutcome {
        let (buys, sells, anomalies) = self.enqueue(opening, transactions);
        self.run(buys, sells, anomalies)
    }

    fn name(&self) -> &str {
        "FIFO"
    }
}
