//! Calculation logic for the work report engine.
//!
//! This module contains the minute arithmetic for `"HH:MM"` times, the
//! normal/overtime/late-night classifier, the 21st-to-20th billing period
//! resolver, travel time allocation, the three report rollups, and the
//! assembly of the final rounded and collated summary.

mod accumulator;
mod aggregation;
mod assembler;
mod billing_period;
mod engine;
mod time_arithmetic;
mod travel_time;
mod work_hours;

pub use accumulator::KeyedAccumulator;
pub use aggregation::{
    LaborTally, MaterialKey, MaterialTally, SubcontractorTally, WorkAggregation, aggregate_reports,
};
pub use assembler::{NameCollator, assemble_report, minutes_to_hours};
pub use billing_period::{CYCLE_END_DAY, CYCLE_START_DAY, resolve_billing_period};
pub use engine::{
    aggregate_period, compute_work_summary, local_reference_time, summarize_from_store,
};
pub use time_arithmetic::{
    MINUTES_PER_DAY, MinuteWindow, normalize_shift, overlap_minutes, time_to_minutes,
};
pub use travel_time::{leg_minutes, report_travel_minutes, travel_share_per_worker};
pub use work_hours::{
    EntryHours, HourBreakdown, LATE_NIGHT_WINDOWS, NORMAL_WINDOW, WorkWindows, classify_minutes,
    classify_work_hours, classify_worker_entry,
};
