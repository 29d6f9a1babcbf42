//! Result assembly.
//!
//! Turns the accumulated minutes into rounded hours, orders each rollup by
//! name using locale-aware collation, and computes the grand totals.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AggregationReport, BillingPeriod, LaborSummary, MaterialSummary, ProjectOption, ReportTotals,
    SubcontractorSummary,
};

use super::aggregation::{LaborTally, WorkAggregation};

const MINUTES_PER_HOUR: i64 = 60;

/// Converts minutes to hours rounded to `precision` decimal places.
///
/// Midpoints round away from zero and the result always carries exactly
/// `precision` decimal places.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::minutes_to_hours;
/// use rust_decimal::Decimal;
///
/// assert_eq!(minutes_to_hours(Decimal::from(540), 2).to_string(), "9.00");
/// assert_eq!(minutes_to_hours(Decimal::from(20), 2).to_string(), "0.33");
/// assert_eq!(minutes_to_hours(Decimal::new(3, 1), 2).to_string(), "0.01");
/// ```
pub fn minutes_to_hours(minutes: Decimal, precision: u32) -> Decimal {
    let mut hours = (minutes / Decimal::from(MINUTES_PER_HOUR))
        .round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    hours.rescale(precision);
    hours
}

/// Locale-aware comparison of display names.
pub struct NameCollator {
    collator: Collator,
}

impl NameCollator {
    /// Builds a collator for a BCP 47 locale such as `"ja"`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CollationUnavailable`] if the locale cannot be
    /// parsed or has no collation data.
    pub fn new(locale: &str) -> EngineResult<Self> {
        let unavailable = |message: String| EngineError::CollationUnavailable {
            locale: locale.to_string(),
            message,
        };

        let parsed: Locale = locale.parse().map_err(|e| unavailable(format!("{e}")))?;
        let collator = Collator::try_new(&(&parsed).into(), CollatorOptions::new())
            .map_err(|e| unavailable(format!("{e}")))?;

        Ok(Self { collator })
    }

    /// Compares two names in collation order.
    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        self.collator.compare(left, right)
    }

    /// Sorts rows by name, keeping first-seen order for equal names.
    pub fn sort_by_name<T>(&self, rows: &mut [T], name: impl Fn(&T) -> &str) {
        rows.sort_by(|a, b| self.compare(name(a), name(b)));
    }
}

impl std::fmt::Debug for NameCollator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameCollator").finish_non_exhaustive()
    }
}

fn labor_summary(name: String, tally: &LaborTally, precision: u32) -> LaborSummary {
    let hours = |minutes: Decimal| minutes_to_hours(minutes, precision);

    LaborSummary {
        name,
        weekday_normal: hours(tally.weekday_normal),
        weekday_overtime: hours(tally.weekday_overtime),
        weekday_late_night: hours(tally.weekday_late_night),
        weekday_subtotal: hours(tally.weekday_subtotal()),
        sunday_normal: hours(tally.sunday_normal),
        sunday_overtime: hours(tally.sunday_overtime),
        sunday_late_night: hours(tally.sunday_late_night),
        sunday_subtotal: hours(tally.sunday_subtotal()),
        total: hours(tally.total),
        travel_time: hours(tally.travel_minutes),
    }
}

/// Builds the final report from an aggregation.
///
/// Subtotals and grand totals are computed from unrounded minutes and
/// rounded once, so they may differ from the sum of the rounded rows by a
/// rounding step. Travel time is reported separately and is not part of
/// any total.
///
/// # Errors
///
/// Returns [`EngineError::CollationUnavailable`] if no collator can be built
/// for `collation_locale`.
pub fn assemble_report(
    aggregation: WorkAggregation,
    period: BillingPeriod,
    projects: Vec<ProjectOption>,
    hour_precision: u32,
    collation_locale: &str,
) -> EngineResult<AggregationReport> {
    let collator = NameCollator::new(collation_locale)?;
    let WorkAggregation {
        report_count,
        labor,
        materials,
        subcontractors,
        labor_minutes,
        material_amount,
        subcontractor_count,
    } = aggregation;

    let mut labor: Vec<LaborSummary> = labor
        .into_entries()
        .into_iter()
        .map(|(name, tally)| labor_summary(name, &tally, hour_precision))
        .collect();
    collator.sort_by_name(&mut labor, |row| row.name.as_str());

    let mut materials: Vec<MaterialSummary> = materials
        .into_entries()
        .into_iter()
        .map(|(key, tally)| MaterialSummary {
            name: key.name,
            volume: key.volume,
            volume_unit: key.volume_unit,
            unit_price: key.unit_price,
            total_quantity: tally.total_quantity,
            total_amount: tally.total_amount,
        })
        .collect();
    collator.sort_by_name(&mut materials, |row| row.name.as_str());

    let mut subcontractors: Vec<SubcontractorSummary> = subcontractors
        .into_entries()
        .into_iter()
        .map(|(name, tally)| SubcontractorSummary {
            total_worker_count: tally.total_worker_count,
            total_days: tally.total_days(),
            name,
        })
        .collect();
    collator.sort_by_name(&mut subcontractors, |row| row.name.as_str());

    let totals = ReportTotals {
        labor_hours: minutes_to_hours(labor_minutes, hour_precision),
        material_amount,
        subcontractor_count,
    };

    Ok(AggregationReport {
        period,
        report_count,
        labor,
        materials,
        subcontractors,
        projects,
        totals,
    })
}
