//! Billing period resolution.
//!
//! Payroll is billed from the 21st of one month through the 20th of the
//! next. The cycle containing a reference instant is the anchor; an integer
//! offset moves backwards or forwards whole cycles for history browsing.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime};

use crate::error::{EngineError, EngineResult};
use crate::models::BillingPeriod;

/// Day of month on which a billing cycle starts.
pub const CYCLE_START_DAY: u32 = 21;

/// Day of month on which a billing cycle ends.
pub const CYCLE_END_DAY: u32 = 20;

/// Resolves the billing period for a reference instant and cycle offset.
///
/// The reference instant is supplied by the caller; this function never
/// reads the clock. On or after the 21st the anchor cycle starts this
/// month, otherwise it started last month. The period runs from the 21st
/// at 00:00:00.000 through the 20th of the following month at 23:59:59.999.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriodOffset`] if the offset moves the
/// period outside the supported date range.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::resolve_billing_period;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(9, 30, 0).unwrap();
///
/// let current = resolve_billing_period(now, 0).unwrap();
/// assert_eq!(current.start_date(), NaiveDate::from_ymd_opt(2026, 9, 21).unwrap());
/// assert_eq!(current.end_date(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
/// assert_eq!(current.label, "2026年9月21日〜2026年10月20日");
///
/// let previous = resolve_billing_period(now, -1).unwrap();
/// assert_eq!(previous.start_date(), NaiveDate::from_ymd_opt(2026, 8, 21).unwrap());
/// ```
pub fn resolve_billing_period(reference: NaiveDateTime, offset: i32) -> EngineResult<BillingPeriod> {
    let out_of_range = || EngineError::InvalidPeriodOffset { offset };

    let anchor = anchor_cycle_start(reference.date()).ok_or_else(out_of_range)?;
    let start_date = shift_months(anchor, offset).ok_or_else(out_of_range)?;
    let end_date = start_date
        .checked_add_months(Months::new(1))
        .and_then(|d| d.with_day(CYCLE_END_DAY))
        .ok_or_else(out_of_range)?;

    let start = start_date.and_hms_opt(0, 0, 0).ok_or_else(out_of_range)?;
    let end = end_date
        .and_hms_milli_opt(23, 59, 59, 999)
        .ok_or_else(out_of_range)?;

    Ok(BillingPeriod {
        start,
        end,
        label: period_label(start_date, end_date),
    })
}

/// Returns the start date of the cycle containing `today`.
fn anchor_cycle_start(today: NaiveDate) -> Option<NaiveDate> {
    let this_month = today.with_day(CYCLE_START_DAY)?;
    if today.day() >= CYCLE_START_DAY {
        Some(this_month)
    } else {
        this_month.checked_sub_months(Months::new(1))
    }
}

fn shift_months(date: NaiveDate, offset: i32) -> Option<NaiveDate> {
    let months = Months::new(offset.unsigned_abs());
    if offset >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    }
}

fn period_label(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "{}年{}月{}日〜{}年{}月{}日",
        start.year(),
        start.month(),
        start.day(),
        end.year(),
        end.month(),
        end.day()
    )
}
