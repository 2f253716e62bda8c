use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Side, TransactionKind};
use crate::values::{Amount, Rate, Timestamp, TransactionId};

/// A single exchange record as supplied by the transaction store
///
/// `source_amount` is always expressed in the minor currency, whatever the
/// direction of the exchange. `target_amount` is the major-currency side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    /// Defines chronological match order
    pub timestamp: Timestamp,
    /// Display label only
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub source_amount: Amount,
    #[serde(default)]
    pub target_amount: Amount,
    /// Must be > 0 for BUY/SELL, ignored for OTHER
    #[serde(default)]
    pub rate: Rate,
    /// Only meaningful for OTHER
    #[serde(default)]
    pub flat_profit: Amount,
}

impl Transaction {
    /// Create a BUY or SELL record; `target_amount` is derived from the rate
    pub fn new_exchange(
        side: Side,
        customer: impl Into<String>,
        source_amount: Amount,
        rate: Rate,
        timestamp: Timestamp,
    ) -> Self {
        let target_amount = if rate.is_finite() && rate > 0.0 {
            source_amount / rate
        } else {
            0.0
        };

        Self {
            id: Uuid::new_v4(),
            kind: side.into(),
            timestamp,
            customer: customer.into(),
            source_amount,
            target_amount,
            rate,
            flat_profit: 0.0,
        }
    }

    pub fn buy(
        customer: impl Into<String>,
        source_amount: Amount,
        rate: Rate,
        timestamp: Timestamp,
    ) -> Self {
        Self::new_exchange(Side::Buy, customer, source_amount, rate, timestamp)
    }

    pub fn sell(
        customer: impl Into<String>,
        source_amount: Amount,
        rate: Rate,
        timestamp: Timestamp,
    ) -> Self {
        Self::new_exchange(Side::Sell, customer, source_amount, rate, timestamp)
    }

    /// Create an OTHER record carrying a flat profit (negative for a loss)
    pub fn other(customer: impl Into<String>, flat_profit: Amount, timestamp: Timestamp) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Other,
            timestamp,
            customer: customer.into(),
            source_amount: 0.0,
            target_amount: 0.0,
            rate: 0.0,
            flat_profit,
        }
    }

    /// Builder: set an explicit identifier
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// Builder: override the major-currency amount
    pub fn with_target_amount(mut self, target_amount: Amount) -> Self {
        self.target_amount = target_amount;
        self
    }

    /// Matching side, `None` for OTHER entries
    pub fn side(&self) -> Option<Side> {
        self.kind.side()
    }

    pub fn is_other(&self) -> bool {
        self.kind == TransactionKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_exchange_derives_target_amount() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let tx = Transaction::buy("Ko Aung", 100_000.0, 0.8, ts);

        assert_eq!(tx.kind, TransactionKind::Buy);
        assert_eq!(tx.side(), Some(Side::Buy));
        assert!((tx.target_amount - 125_000.0).abs() < 1e-9);

        let id = Uuid::parse_str("6f9619ff-8b86-d011-b42d-00cf4fc964ff").unwrap();
        assert_eq!(tx.with_id(id).id, id);
    }

    #[test]
    fn test_invalid_rate_leaves_target_zero() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let tx = Transaction::sell("Ma Hla", 10_000.0, 0.0, ts);
        assert_eq!(tx.target_amount, 0.0);

        let tx = Transaction::sell("Ma Hla", 10_000.0, f64::NAN, ts);
        assert_eq!(tx.target_amount, 0.0);
    }

    #[test]
    fn test_other_has_no_side() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let tx = Transaction::other("bank fee", -1_500.0, ts);

        assert!(tx.is_other());
        assert_eq!(tx.side(), None);
        assert_eq!(tx.flat_profit, -1_500.0);
    }

    #[test]
    fn test_deserialize_store_record() {
        let json = r#"{
            "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff",
            "kind": "SELL",
            "timestamp": "2024-05-01T09:30:00Z",
            "customer": "Daw Mya",
            "source_amount": 30000.0,
            "rate": 0.75
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();

        assert_eq!(tx.kind, TransactionKind::Sell);
        assert_eq!(tx.source_amount, 30_000.0);
        assert_eq!(tx.target_amount, 0.0);
        assert_eq!(tx.flat_profit, 0.0);
    }
}
