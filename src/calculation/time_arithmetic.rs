//! Minute-of-day arithmetic for `"HH:MM"` times.
//!
//! Times on work reports carry no date, zone, or seconds. Everything here
//! works on minutes since midnight, on an axis that extends past 1440 when
//! a shift runs into the next day.

use serde::{Deserialize, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: i64 = 1440;

/// A half-open `[start, end)` interval of minutes.
///
/// # Example
///
/// ```
/// use work_report_engine::calculation::MinuteWindow;
///
/// let normal = MinuteWindow::new(480, 1020);
/// assert_eq!(normal.len(), 540);
/// assert_eq!(normal.overlap(1000, 1100), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteWindow {
    /// First minute inside the window.
    pub start: i64,
    /// First minute after the window.
    pub end: i64,
}

impl MinuteWindow {
    /// Creates a window from its bounds.
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Returns the window length in minutes, never negative.
    pub fn len(&self) -> i64 {
        (self.end - self.start).max(0)
    }

    /// Returns true if the window contains no minutes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many minutes of `[start, end)` fall inside this window.
    pub fn overlap(&self, start: i64, end: i64) -> i64 {
        overlap_minutes(start, end, self.start, self.end)
    }
}

/// Parses an `"HH:MM"` time into minutes since midnight.
///
/// Returns `None` for anything that is not a valid wall-clock time, so a
/// corrupt record can be skipped instead of aborting the aggregation.
/// `"24:00"` is accepted as end of day.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::time_to_minutes;
///
/// assert_eq!(time_to_minutes("08:30"), Some(510));
/// assert_eq!(time_to_minutes("7:05"), Some(425));
/// assert_eq!(time_to_minutes("24:00"), Some(1440));
/// assert_eq!(time_to_minutes("8時"), None);
/// assert_eq!(time_to_minutes("25:00"), None);
/// ```
pub fn time_to_minutes(value: &str) -> Option<i64> {
    let (hour, minute) = value.trim().split_once(':')?;
    if hour.is_empty()
        || minute.len() != 2
        || !hour.bytes().all(|b| b.is_ascii_digit())
        || !minute.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let hour: i64 = hour.parse().ok()?;
    let minute: i64 = minute.parse().ok()?;

    match (hour, minute) {
        (0..=23, 0..=59) | (24, 0) => Some(hour * 60 + minute),
        _ => None,
    }
}

/// Returns the overlap in minutes of two half-open intervals.
///
/// Both intervals must sit on the same minute axis. The result is symmetric
/// in its two intervals and zero when they do not touch.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::overlap_minutes;
///
/// assert_eq!(overlap_minutes(480, 1020, 900, 1200), 120);
/// assert_eq!(overlap_minutes(900, 1200, 480, 1020), 120);
/// assert_eq!(overlap_minutes(0, 300, 480, 1020), 0);
/// ```
pub fn overlap_minutes(start_a: i64, end_a: i64, start_b: i64, end_b: i64) -> i64 {
    (end_a.min(end_b) - start_a.max(start_b)).max(0)
}

/// Places a shift on a single minute axis.
///
/// An end at or before the start means the shift crossed midnight, so a
/// day is added to the end. A zero-length shift returns `None`.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::normalize_shift;
///
/// assert_eq!(normalize_shift(480, 1020), Some((480, 1020)));
/// assert_eq!(normalize_shift(1080, 120), Some((1080, 1560)));
/// assert_eq!(normalize_shift(600, 600), None);
/// ```
pub fn normalize_shift(start: i64, end: i64) -> Option<(i64, i64)> {
    if start == end {
        return None;
    }
    if end < start {
        Some((start, end + MINUTES_PER_DAY))
    } else {
        Some((start, end))
    }
}
