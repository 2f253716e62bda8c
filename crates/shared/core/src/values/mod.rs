use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

/// Amount value - plain float, the engine guards non-finite results itself
pub type Amount = f64;

/// Exchange rate (minor currency units per one major unit)
pub type Rate = f64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Calendar day a transaction is booked on
pub type BusinessDate = NaiveDate;

/// Opaque identifier of a transaction record
pub type TransactionId = Uuid;

/// Map a UTC timestamp onto the business day seen at the given UTC offset.
///
/// `None` when the shifted timestamp falls outside the representable range.
pub fn business_date(timestamp: Timestamp, utc_offset_minutes: i32) -> Option<BusinessDate> {
    timestamp
        .checked_add_signed(Duration::minutes(i64::from(utc_offset_minutes)))
        .map(|shifted| shifted.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_business_date_shifts_with_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();

        assert_eq!(business_date(ts, 0), NaiveDate::from_ymd_opt(2024, 3, 1));
        // Yangon is UTC+06:30
        assert_eq!(business_date(ts, 390), NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(business_date(ts, -1260), NaiveDate::from_ymd_opt(2024, 2, 29));
    }

    #[test]
    fn test_business_date_at_the_edge_of_time() {
        assert_eq!(business_date(DateTime::<Utc>::MAX_UTC, 390), None);
        assert_eq!(business_date(DateTime::<Utc>::MIN_UTC, -60), None);
        assert!(business_date(DateTime::<Utc>::MAX_UTC, 0).is_some());
    }
}
