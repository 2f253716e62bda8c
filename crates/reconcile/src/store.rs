//! In-memory transaction store
//!
//! Groups records by business day so the range aggregator can fetch them
//! per day. Days can be marked as failing to exercise failure isolation.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use fxrecon_core::{DateRange, Transaction, business_date};
use fxrecon_ports::{SourceError, SourceResult, TransactionSource};

#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    by_day: BTreeMap<NaiveDate, Vec<Transaction>>,
    failing: BTreeSet<NaiveDate>,
    utc_offset_minutes: i32,
}

impl InMemoryTransactionStore {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self {
            utc_offset_minutes,
            ..Default::default()
        }
    }

    pub fn from_transactions(
        transactions: impl IntoIterator<Item = Transaction>,
        utc_offset_minutes: i32,
    ) -> Self {
        let mut store = Self::new(utc_offset_minutes);
        store.extend(transactions);
        store
    }

    /// File a record under its business day
    ///
    /// A timestamp with no business day at the store's offset is filed under
    /// its UTC date, where the daily aggregator rejects it.
    pub fn insert(&mut self, transaction: Transaction) {
        let day = business_date(transaction.timestamp, self.utc_offset_minutes)
            .unwrap_or_else(|| transaction.timestamp.date_naive());
        self.by_day.entry(day).or_default().push(transaction);
    }

    pub fn extend(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        for tx in transactions {
            self.insert(tx);
        }
    }

    /// Make every fetch touching `day` fail
    pub fn fail_day(&mut self, day: NaiveDate) {
        self.failing.insert(day);
    }

    pub fn len(&self) -> usize {
        self.by_day.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self, day: NaiveDate) -> SourceResult<()> {
        if self.failing.contains(&day) {
            return Err(SourceError::Failed(format!("records for {} unreadable", day)));
        }
        Ok(())
    }
}

impl TransactionSource for InMemoryTransactionStore {
    fn for_day(&self, day: NaiveDate) -> SourceResult<Vec<Transaction>> {
        self.check(day)?;
        Ok(self.by_day.get(&day).cloned().unwrap_or_default())
    }

    fn for_range(&self, range: DateRange) -> SourceResult<Vec<Transaction>> {
        let mut all = Vec::new();
        for (day, transactions) in self.by_day.range(range.start()..=range.end()) {
            self.check(*day)?;
            all.extend(transactions.iter().cloned());
        }
        // Failing days without records still fail the range
        if let Some(day) = self.failing.iter().find(|day| range.contains(**day)) {
            self.check(*day)?;
        }
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_groups_by_business_day() {
        let late = Transaction::buy("A", 1.0, 0.8, Utc.with_ymd_and_hms(2024, 7, 1, 19, 0, 0).unwrap());
        let early = Transaction::sell("B", 1.0, 0.8, Utc.with_ymd_and_hms(2024, 7, 2, 3, 0, 0).unwrap());
        let store = InMemoryTransactionStore::from_transactions([late.clone(), early.clone()], 390);

        assert_eq!(store.len(), 2);
        assert!(store.for_day(day(1)).unwrap().is_empty());
        assert_eq!(store.for_day(day(2)).unwrap(), vec![late, early]);
    }

    #[test]
    fn test_unshiftable_timestamp_files_under_utc_date() {
        let edge = Transaction::buy("A", 1.0, 0.8, DateTime::<Utc>::MAX_UTC);
        let store = InMemoryTransactionStore::from_transactions([edge.clone()], 390);

        let day = DateTime::<Utc>::MAX_UTC.date_naive();
        assert_eq!(store.for_day(day).unwrap(), vec![edge]);
    }

    #[test]
    fn test_range_and_failures() {
        let mut store = InMemoryTransactionStore::new(0);
        store.insert(Transaction::buy("A", 1.0, 0.8, Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap()));
        store.insert(Transaction::buy("B", 1.0, 0.8, Utc.with_ymd_and_hms(2024, 7, 3, 9, 0, 0).unwrap()));
        store.insert(Transaction::buy("C", 1.0, 0.8, Utc.with_ymd_and_hms(2024, 7, 9, 9, 0, 0).unwrap()));

        let range = DateRange::new(day(1), day(5)).unwrap();
        assert_eq!(store.for_range(range).unwrap().len(), 2);

        store.fail_day(day(4));
        assert!(matches!(store.for_range(range), Err(SourceError::Failed(_))));
        assert!(store.for_day(day(4)).is_err());
        assert_eq!(store.for_day(day(3)).unwrap().len(), 1);
    }
}
