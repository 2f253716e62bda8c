use chrono::NaiveDate;
use fxrecon_core::{DateRange, Transaction};

use crate::error::SourceResult;

/// Port for the transaction store
///
/// Implementations hand over already-resolved records; the engine never waits.
pub trait TransactionSource {
    /// All records booked on one business day
    fn for_day(&self, day: NaiveDate) -> SourceResult<Vec<Transaction>>;

    /// All records booked within a range
    fn for_range(&self, range: DateRange) -> SourceResult<Vec<Transaction>> {
        let mut all = Vec::new();
        for day in range.days() {
            all.extend(self.for_day(day)?);
        }
        Ok(all)
    }
}
