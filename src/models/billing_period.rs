//! Billing period model.
//!
//! Billing runs from the 21st of one month through the 20th of the next.
//! Periods are never stored; see
//! [`resolve_billing_period`](crate::calculation::resolve_billing_period).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A resolved 21st-to-20th billing period.
///
/// # Example
///
/// ```
/// use work_report_engine::models::BillingPeriod;
/// use chrono::NaiveDate;
///
/// let period = BillingPeriod {
///     start: NaiveDate::from_ymd_opt(2026, 9, 21).unwrap().and_hms_opt(0, 0, 0).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap().and_hms_milli_opt(23, 59, 59, 999).unwrap(),
///     label: "2026年9月21日〜2026年10月20日".to_string(),
/// };
///
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// The 21st at 00:00:00.000.
    pub start: NaiveDateTime,
    /// The 20th of the following month at 23:59:59.999.
    pub end: NaiveDateTime,
    /// Human-readable label naming both boundary dates.
    pub label: String,
}

impl BillingPeriod {
    /// Returns the first calendar day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start.date()
    }

    /// Returns the last calendar day of the period.
    pub fn end_date(&self) -> NaiveDate {
        self.end.date()
    }

    /// Checks if a report date falls within this period (inclusive).
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }
}
