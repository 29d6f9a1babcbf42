//! Travel time allocation.
//!
//! Remote sites record an outbound and a return leg on the report. The
//! round-trip minutes are shared equally by the named workers on that
//! report.

use rust_decimal::Decimal;

use crate::models::WorkReport;

use super::time_arithmetic::time_to_minutes;

/// Returns the minutes of one travel leg.
///
/// A leg needs both ends; a missing or unparseable end, or an arrival
/// before the departure, contributes zero.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::leg_minutes;
///
/// assert_eq!(leg_minutes(Some("07:00"), Some("07:45")), 45);
/// assert_eq!(leg_minutes(Some("07:00"), None), 0);
/// assert_eq!(leg_minutes(Some("08:00"), Some("07:00")), 0);
/// ```
pub fn leg_minutes(departure: Option<&str>, arrival: Option<&str>) -> i64 {
    match (
        departure.and_then(time_to_minutes),
        arrival.and_then(time_to_minutes),
    ) {
        (Some(departure), Some(arrival)) => (arrival - departure).max(0),
        _ => 0,
    }
}

/// Returns the total travel minutes recorded on a report.
pub fn report_travel_minutes(report: &WorkReport) -> i64 {
    leg_minutes(
        report.remote_departure_time.as_deref(),
        report.remote_arrival_time.as_deref(),
    ) + leg_minutes(
        report.remote_departure_time_2.as_deref(),
        report.remote_arrival_time_2.as_deref(),
    )
}

/// Returns each named worker's share of the report's travel minutes.
///
/// Returns `None` when the report has no named workers, in which case its
/// travel time is not allocated to anyone.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::travel_share_per_worker;
/// use work_report_engine::models::{WorkReport, WorkerEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut report = WorkReport::new("r1", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
/// report.remote_departure_time = Some("07:00".to_string());
/// report.remote_arrival_time = Some("08:00".to_string());
/// assert_eq!(travel_share_per_worker(&report), None);
///
/// report.worker_entries = vec![
///     WorkerEntry { name: "佐藤".to_string(), ..Default::default() },
///     WorkerEntry { name: "鈴木".to_string(), ..Default::default() },
/// ];
/// assert_eq!(travel_share_per_worker(&report), Some(Decimal::new(30, 0)));
/// ```
pub fn travel_share_per_worker(report: &WorkReport) -> Option<Decimal> {
    let workers = report.named_worker_count();
    if workers == 0 {
        return None;
    }
    Some(Decimal::from(report_travel_minutes(report)) / Decimal::from(workers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerEntry;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_report(legs: [Option<&str>; 4], workers: &[&str]) -> WorkReport {
        let mut report = WorkReport::new("r-1", NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        report.remote_departure_time = legs[0].map(str::to_string);
        report.remote_arrival_time = legs[1].map(str::to_string);
        report.remote_departure_time_2 = legs[2].map(str::to_string);
        report.remote_arrival_time_2 = legs[3].map(str::to_string);
        report.worker_entries = workers
            .iter()
            .map(|name| WorkerEntry {
                name: name.to_string(),
                ..Default::default()
            })
            .collect();
        report
    }

    /// TT-001: both legs are summed
    #[test]
    fn test_tt_001_round_trip() {
        let report = create_report(
            [Some("07:00"), Some("07:45"), Some("17:30"), Some("18:10")],
            &["佐藤"],
        );
        assert_eq!(report_travel_minutes(&report), 85);
    }

    /// TT-002: an incomplete leg contributes nothing
    #[test]
    fn test_tt_002_incomplete_leg() {
        let report = create_report([Some("07:00"), None, Some("17:30"), Some("18:00")], &["佐藤"]);
        assert_eq!(report_travel_minutes(&report), 30);
    }

    /// TT-003: share is split among named workers only
    #[test]
    fn test_tt_003_split_among_named_workers() {
        let report = create_report(
            [Some("07:00"), Some("08:00"), Some("17:00"), Some("18:00")],
            &["佐藤", " ", "鈴木", "田中"],
        );
        assert_eq!(travel_share_per_worker(&report), Some(dec("40")));
    }

    /// TT-004: no named workers means no allocation
    #[test]
    fn test_tt_004_no_named_workers() {
        let report = create_report([Some("07:00"), Some("08:00"), None, None], &["", "  "]);
        assert_eq!(travel_share_per_worker(&report), None);
    }

    #[test]
    fn test_uneven_share_keeps_fraction() {
        let report = create_report([Some("07:00"), Some("07:10"), None, None], &["A", "B", "C"]);
        let share = travel_share_per_worker(&report).unwrap();
        assert_eq!(share.round_dp(4), dec("3.3333"));
    }

    #[test]
    fn test_malformed_leg_is_zero() {
        assert_eq!(leg_minutes(Some("seven"), Some("08:00")), 0);
        assert_eq!(leg_minutes(None, None), 0);
    }
}
