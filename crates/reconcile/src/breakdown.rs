//! Match breakdown statistics for the reporting layer

use std::collections::BTreeMap;

use fxrecon_core::{Amount, MatchResult, Rate};
use serde::Serialize;

/// Spread between sell and buy rate over a set of matches
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateSpreadStats {
    pub average: Rate,
    pub minimum: Rate,
    pub maximum: Rate,
    pub match_count: usize,
}

/// `None` when there are no matches
pub fn spread_stats<'a, I>(matches: I) -> Option<RateSpreadStats>
where
    I: IntoIterator<Item = &'a MatchResult>,
{
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut minimum = f64::INFINITY;
    let mut maximum = f64::NEG_INFINITY;

    for spread in matches.into_iter().map(MatchResult::rate_spread) {
        count += 1;
        sum += spread;
        minimum = minimum.min(spread);
        maximum = maximum.max(spread);
    }

    (count > 0).then(|| RateSpreadStats {
        average: sum / count as f64,
        minimum,
        maximum,
        match_count: count,
    })
}

/// Profit attributed to the BUY-side customer of each match
pub fn profit_by_customer<'a, I>(matches: I) -> BTreeMap<String, Amount>
where
    I: IntoIterator<Item = &'a MatchResult>,
{
    let mut result: BTreeMap<String, Amount> = BTreeMap::new();
    for m in matches {
        *result.entry(m.buy_customer.clone()).or_default() += m.profit;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn matched(customer: &str, buy_rate: Rate, sell_rate: Rate, profit: Amount) -> MatchResult {
        MatchResult {
            buy_id: Uuid::new_v4(),
            sell_id: Uuid::new_v4(),
            buy_time: Utc::now(),
            sell_time: Utc::now(),
            buy_customer: customer.to_string(),
            sell_customer: "seller".to_string(),
            buy_rate,
            sell_rate,
            matched_amount: 1_000.0,
            matched_major_amount: 1_000.0 / buy_rate,
            profit,
        }
    }

    #[test]
    fn test_spread_stats() {
        let matches = vec![
            matched("A", 0.80, 0.82, -30.0),
            matched("B", 0.80, 0.75, 80.0),
            matched("A", 0.80, 0.78, 30.0),
        ];

        let stats = spread_stats(&matches).unwrap();

        assert_eq!(stats.match_count, 3);
        assert!((stats.minimum - (-0.05)).abs() < 1e-9);
        assert!((stats.maximum - 0.02).abs() < 1e-9);
        assert!((stats.average - (-0.05 / 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_spread_stats_empty() {
        let none: Vec<MatchResult> = Vec::new();
        assert_eq!(spread_stats(&none), None);
    }

    #[test]
    fn test_profit_by_customer() {
        let matches = vec![
            matched("A", 0.80, 0.82, -30.0),
            matched("B", 0.80, 0.75, 80.0),
            matched("A", 0.80, 0.78, 30.5),
        ];

        let by_customer = profit_by_customer(&matches);

        assert_eq!(by_customer.len(), 2);
        assert_eq!(by_customer["A"], 0.5);
        assert_eq!(by_customer["B"], 80.0);
    }
}
