//! Work-hour classification.
//!
//! A shift is split into normal hours (08:00–17:00), late-night hours
//! (22:00–05:00) and overtime (everything else). Overnight shifts are laid
//! out on a two-day minute axis before the windows are applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::WorkerEntry;

use super::time_arithmetic::{MinuteWindow, normalize_shift, time_to_minutes};

/// The normal-hours window, 08:00–17:00.
pub const NORMAL_WINDOW: MinuteWindow = MinuteWindow::new(480, 1020);

/// The late-night windows: 22:00 through 05:00 the next morning, plus the
/// early-morning 00:00–05:00 of the start day.
pub const LATE_NIGHT_WINDOWS: [MinuteWindow; 2] =
    [MinuteWindow::new(1320, 1740), MinuteWindow::new(0, 300)];

/// The reference windows used to classify shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkWindows {
    /// Normal working hours.
    pub normal: MinuteWindow,
    /// Late-night windows; their overlaps are summed.
    pub late_night: Vec<MinuteWindow>,
}

impl Default for WorkWindows {
    fn default() -> Self {
        Self {
            normal: NORMAL_WINDOW,
            late_night: LATE_NIGHT_WINDOWS.to_vec(),
        }
    }
}

/// Minutes of a shift split by category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBreakdown {
    /// Minutes inside the normal window.
    pub normal: i64,
    /// Minutes outside both the normal and late-night windows.
    pub overtime: i64,
    /// Minutes inside the late-night windows.
    pub late_night: i64,
}

impl HourBreakdown {
    /// Returns the total classified minutes.
    pub fn total(&self) -> i64 {
        self.normal + self.overtime + self.late_night
    }
}

/// Classifies a shift given in minutes since midnight.
///
/// An end at or before the start is treated as crossing midnight. A
/// zero-length shift classifies as all zeros.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::{classify_minutes, HourBreakdown, WorkWindows};
///
/// let windows = WorkWindows::default();
///
/// // 18:00 to 02:00 the next day
/// let breakdown = classify_minutes(1080, 120, &windows);
/// assert_eq!(breakdown, HourBreakdown { normal: 0, overtime: 240, late_night: 240 });
/// ```
pub fn classify_minutes(start: i64, end: i64, windows: &WorkWindows) -> HourBreakdown {
    let Some((start, end)) = normalize_shift(start, end) else {
        return HourBreakdown::default();
    };

    let total = end - start;
    let normal = windows.normal.overlap(start, end);
    let late_night: i64 = windows
        .late_night
        .iter()
        .map(|window| window.overlap(start, end))
        .sum();
    let overtime = (total - normal - late_night).max(0);

    HourBreakdown {
        normal,
        overtime,
        late_night,
    }
}

/// Classifies a shift given as `"HH:MM"` strings.
///
/// Returns `None` if either time fails to parse.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::{classify_work_hours, WorkWindows};
///
/// let windows = WorkWindows::default();
/// let breakdown = classify_work_hours("08:00", "17:00", &windows).unwrap();
/// assert_eq!(breakdown.normal, 540);
/// assert_eq!(breakdown.overtime, 0);
/// assert_eq!(breakdown.late_night, 0);
///
/// assert!(classify_work_hours("8am", "17:00", &windows).is_none());
/// ```
pub fn classify_work_hours(
    start_time: &str,
    end_time: &str,
    windows: &WorkWindows,
) -> Option<HourBreakdown> {
    let start = time_to_minutes(start_time)?;
    let end = time_to_minutes(end_time)?;
    Some(classify_minutes(start, end, windows))
}

/// How a worker entry's hours were determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryHours {
    /// Start and end times were classified into windows.
    Classified(HourBreakdown),
    /// No time range; the declared duration (in minutes) counts as normal.
    Declared(Decimal),
    /// A time range was given but could not be parsed.
    Malformed,
    /// Neither a time range nor a declared duration was recorded.
    Unrecorded,
}

impl EntryHours {
    /// Returns `(normal, overtime, late_night)` minutes.
    pub fn bucket_minutes(&self) -> (Decimal, Decimal, Decimal) {
        match self {
            EntryHours::Classified(breakdown) => (
                Decimal::from(breakdown.normal),
                Decimal::from(breakdown.overtime),
                Decimal::from(breakdown.late_night),
            ),
            EntryHours::Declared(minutes) => (*minutes, Decimal::ZERO, Decimal::ZERO),
            EntryHours::Malformed | EntryHours::Unrecorded => {
                (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
            }
        }
    }
}

/// Determines the hours for one worker entry.
///
/// A start/end pair takes precedence. Without one, the declared
/// `workHours` (or legacy `dailyHours`) is counted entirely as normal time
/// regardless of when it was worked. A negative declared duration counts as
/// zero, and one too large to convert to minutes is malformed.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::{classify_worker_entry, EntryHours, WorkWindows};
/// use work_report_engine::models::WorkerEntry;
/// use rust_decimal::Decimal;
///
/// let entry = WorkerEntry {
///     name: "鈴木".to_string(),
///     work_hours: Some(Decimal::new(75, 1)), // 7.5 hours
///     ..Default::default()
/// };
/// let hours = classify_worker_entry(&entry, &WorkWindows::default());
/// assert_eq!(hours, EntryHours::Declared(Decimal::new(450, 0)));
/// ```
pub fn classify_worker_entry(entry: &WorkerEntry, windows: &WorkWindows) -> EntryHours {
    if let Some((start, end)) = entry.time_range() {
        return match classify_work_hours(start, end, windows) {
            Some(breakdown) => EntryHours::Classified(breakdown),
            None => {
                debug!(
                    worker = %entry.name,
                    start_time = start,
                    end_time = end,
                    "Skipping unparseable time range"
                );
                EntryHours::Malformed
            }
        };
    }

    match entry.declared_hours() {
        Some(hours) => match hours.checked_mul(Decimal::from(60)) {
            Some(minutes) => EntryHours::Declared(minutes.max(Decimal::ZERO)),
            None => {
                debug!(
                    worker = %entry.name,
                    declared_hours = %hours,
                    "Skipping declared hours too large to convert"
                );
                EntryHours::Malformed
            }
        },
        None => EntryHours::Unrecorded,
    }
}
