//! Work report aggregation.
//!
//! Folds every report in a billing period into three independent rollups:
//! labor hours per worker, material usage per material identity, and
//! subcontractor attendance per subcontractor. Malformed entries contribute
//! zero; blank names never become keys.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{BillingPeriod, MaterialEntry, SubcontractorEntry, WorkReport};

use super::accumulator::KeyedAccumulator;
use super::travel_time::travel_share_per_worker;
use super::work_hours::{WorkWindows, classify_worker_entry};

/// Running labor minutes for one worker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaborTally {
    /// Weekday minutes inside the normal window.
    pub weekday_normal: Decimal,
    /// Weekday overtime minutes.
    pub weekday_overtime: Decimal,
    /// Weekday late-night minutes.
    pub weekday_late_night: Decimal,
    /// Sunday minutes inside the normal window.
    pub sunday_normal: Decimal,
    /// Sunday overtime minutes.
    pub sunday_overtime: Decimal,
    /// Sunday late-night minutes.
    pub sunday_late_night: Decimal,
    /// Every classified or declared minute added.
    pub total: Decimal,
    /// Allocated travel minutes.
    pub travel_minutes: Decimal,
}

impl LaborTally {
    /// Returns the weekday minutes across all three buckets.
    pub fn weekday_subtotal(&self) -> Decimal {
        self.weekday_normal + self.weekday_overtime + self.weekday_late_night
    }

    /// Returns the Sunday minutes across all three buckets.
    pub fn sunday_subtotal(&self) -> Decimal {
        self.sunday_normal + self.sunday_overtime + self.sunday_late_night
    }

    /// Adds one entry's bucket minutes, leaving the tally untouched if any
    /// bucket would overflow.
    fn add_minutes(
        &mut self,
        (normal, overtime, late_night): (Decimal, Decimal, Decimal),
        is_sunday: bool,
    ) -> Option<()> {
        let mut next = self.clone();
        let buckets = if is_sunday {
            (
                &mut next.sunday_normal,
                &mut next.sunday_overtime,
                &mut next.sunday_late_night,
            )
        } else {
            (
                &mut next.weekday_normal,
                &mut next.weekday_overtime,
                &mut next.weekday_late_night,
            )
        };
        *buckets.0 = buckets.0.checked_add(normal)?;
        *buckets.1 = buckets.1.checked_add(overtime)?;
        *buckets.2 = buckets.2.checked_add(late_night)?;
        next.total = next
            .total
            .checked_add(normal)?
            .checked_add(overtime)?
            .checked_add(late_night)?;

        *self = next;
        Some(())
    }
}

/// Grouping identity of a material: the same name at a different price or
/// package size is a different material.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MaterialKey {
    /// Trimmed material name.
    pub name: String,
    /// Trimmed package magnitude.
    pub volume: String,
    /// Trimmed package unit.
    pub volume_unit: String,
    /// Normalized unit price; missing prices are zero.
    pub unit_price: Decimal,
}

impl MaterialKey {
    /// Builds the key for an entry, or `None` if the name is blank.
    pub fn from_entry(entry: &MaterialEntry) -> Option<Self> {
        Some(Self {
            name: entry.trimmed_name()?.to_string(),
            volume: entry.volume.trim().to_string(),
            volume_unit: entry.volume_unit.trim().to_string(),
            unit_price: entry.unit_price.unwrap_or(Decimal::ZERO).normalize(),
        })
    }
}

/// Running usage for one material identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTally {
    /// Units used.
    pub total_quantity: Decimal,
    /// Amount spent.
    pub total_amount: Decimal,
}

impl MaterialTally {
    fn add(&mut self, quantity: Decimal, amount: Decimal) -> Option<()> {
        let total_quantity = self.total_quantity.checked_add(quantity)?;
        let total_amount = self.total_amount.checked_add(amount)?;
        self.total_quantity = total_quantity;
        self.total_amount = total_amount;
        Some(())
    }
}

/// Running attendance for one subcontractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcontractorTally {
    /// Sum of daily head-counts.
    pub total_worker_count: u64,
    /// Distinct days the subcontractor appeared.
    pub dates: BTreeSet<NaiveDate>,
}

impl SubcontractorTally {
    /// Returns the number of distinct days on site.
    pub fn total_days(&self) -> u32 {
        u32::try_from(self.dates.len()).unwrap_or(u32::MAX)
    }

    fn add_entry(&mut self, entry: &SubcontractorEntry, date: NaiveDate) {
        self.total_worker_count += u64::from(entry.worker_count);
        self.dates.insert(date);
    }
}

/// The three rollups for a set of reports, before unit conversion.
#[derive(Debug, Clone, Default)]
pub struct WorkAggregation {
    /// Reports folded in.
    pub report_count: usize,
    /// Labor tallies keyed by trimmed worker name.
    pub labor: KeyedAccumulator<String, LaborTally>,
    /// Material tallies keyed by material identity.
    pub materials: KeyedAccumulator<MaterialKey, MaterialTally>,
    /// Subcontractor tallies keyed by trimmed name.
    pub subcontractors: KeyedAccumulator<String, SubcontractorTally>,
    /// Labor minutes across every worker, travel excluded.
    pub labor_minutes: Decimal,
    /// Material amount across every material.
    pub material_amount: Decimal,
    /// Subcontractor head-count across every subcontractor.
    pub subcontractor_count: u64,
}

impl WorkAggregation {
    /// Creates an empty aggregation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one report into all three rollups.
    ///
    /// Sunday reports fill the Sunday buckets; every other day, Saturday
    /// included, fills the weekday buckets. An entry whose numbers would
    /// overflow a tally or a grand total contributes nothing.
    pub fn add_report(&mut self, report: &WorkReport, windows: &WorkWindows) {
        self.report_count += 1;
        let is_sunday = report.is_sunday();
        let travel_share = travel_share_per_worker(report);

        for entry in &report.worker_entries {
            let Some(name) = entry.trimmed_name() else {
                continue;
            };
            let buckets = classify_worker_entry(entry, windows).bucket_minutes();
            let labor_minutes = buckets
                .0
                .checked_add(buckets.1)
                .and_then(|m| m.checked_add(buckets.2))
                .and_then(|m| self.labor_minutes.checked_add(m));

            let tally = self.labor.entry_or_default(name.to_string());
            let added = labor_minutes
                .and_then(|total| tally.add_minutes(buckets, is_sunday).map(|()| total));
            match added {
                Some(total) => self.labor_minutes = total,
                None => debug!(
                    report = %report.id,
                    worker = name,
                    "Skipping worker entry whose hours overflow the labor totals"
                ),
            }
            let travel = travel_share.and_then(|share| tally.travel_minutes.checked_add(share));
            if let Some(travel) = travel {
                tally.travel_minutes = travel;
            }
        }

        for entry in &report.material_entries {
            let Some(key) = MaterialKey::from_entry(entry) else {
                continue;
            };
            let quantity = entry.quantity.unwrap_or(Decimal::ZERO);
            let amount = entry.line_amount();
            let material_amount = amount.and_then(|a| self.material_amount.checked_add(a));

            let tally = self.materials.entry_or_default(key);
            let added = material_amount
                .zip(amount)
                .and_then(|(total, amount)| tally.add(quantity, amount).map(|()| total));
            match added {
                Some(total) => self.material_amount = total,
                None => debug!(
                    report = %report.id,
                    material = %entry.name,
                    "Skipping material entry whose amount overflows the material totals"
                ),
            }
        }

        for entry in &report.subcontractor_entries {
            if let Some(name) = entry.trimmed_name() {
                self.subcontractors
                    .entry_or_default(name.to_string())
                    .add_entry(entry, report.date);
                self.subcontractor_count += u64::from(entry.worker_count);
            }
        }
    }
}

/// Aggregates the reports that fall inside `period`.
///
/// Reports dated outside the period, or filed against a different project
/// when `project_id` is given, are skipped.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::{WorkWindows, aggregate_reports, resolve_billing_period};
/// use work_report_engine::models::{WorkReport, WorkerEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let period = resolve_billing_period(now, 0).unwrap();
///
/// let mut report = WorkReport::new("r1", NaiveDate::from_ymd_opt(2026, 10, 1).unwrap());
/// report.worker_entries.push(WorkerEntry {
///     name: "佐藤".to_string(),
///     start_time: Some("08:00".to_string()),
///     end_time: Some("17:00".to_string()),
///     ..Default::default()
/// });
///
/// let aggregation = aggregate_reports(&[report], &period, None, &WorkWindows::default());
/// assert_eq!(aggregation.report_count, 1);
/// let tally = aggregation.labor.get(&"佐藤".to_string()).unwrap();
/// assert_eq!(tally.weekday_normal, Decimal::from(540));
/// ```
pub fn aggregate_reports<'a>(
    reports: impl IntoIterator<Item = &'a WorkReport>,
    period: &BillingPeriod,
    project_id: Option<&str>,
    windows: &WorkWindows,
) -> WorkAggregation {
    let mut aggregation = WorkAggregation::new();
    let mut skipped = 0usize;

    for report in reports {
        let in_period = period.contains_date(report.date);
        let in_project = project_id.is_none_or(|id| report.matches_project(id));
        if in_period && in_project {
            aggregation.add_report(report, windows);
        } else {
            skipped += 1;
        }
    }

    debug!(
        period = %period.label,
        reports = aggregation.report_count,
        skipped,
        workers = aggregation.labor.len(),
        materials = aggregation.materials.len(),
        subcontractors = aggregation.subcontractors.len(),
        "Aggregated work reports"
    );

    aggregation
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::resolve_billing_period;
    use crate::models::WorkerEntry;
    use chrono::NaiveDateTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn create_period() -> BillingPeriod {
        let now = NaiveDateTime::parse_from_str("2026-10-19 12:00:00", "%Y-%m-%d %H:%M:%S")
            .unwrap();
        resolve_billing_period(now, 0).unwrap()
    }

    fn worker(name: &str, start: &str, end: &str) -> WorkerEntry {
        WorkerEntry {
            name: name.to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Default::default()
        }
    }

    fn material(name: &str, unit_price: &str, quantity: &str) -> MaterialEntry {
        MaterialEntry {
            name: name.to_string(),
            volume: "16".to_string(),
            volume_unit: "kg".to_string(),
            unit_price: Some(dec(unit_price)),
            quantity: Some(dec(quantity)),
            amount: None,
        }
    }

    fn subcontractor(name: &str, worker_count: u32) -> SubcontractorEntry {
        SubcontractorEntry {
            name: name.to_string(),
            worker_count,
            work_content: None,
        }
    }

    fn aggregate(reports: &[WorkReport]) -> WorkAggregation {
        aggregate_reports(reports, &create_period(), None, &WorkWindows::default())
    }

    /// AG-001: weekday and Sunday hours land in separate buckets
    #[test]
    fn test_ag_001_sunday_buckets() {
        // 2026-10-04 is a Sunday, 2026-10-05 a Monday
        let mut sunday = WorkReport::new("r1", make_date("2026-10-04"));
        sunday.worker_entries.push(worker("佐藤", "08:00", "17:00"));
        let mut monday = WorkReport::new("r2", make_date("2026-10-05"));
        monday.worker_entries.push(worker("佐藤", "18:00", "02:00"));

        let aggregation = aggregate(&[sunday, monday]);
        let tally = aggregation.labor.get(&"佐藤".to_string()).unwrap();
        assert_eq!(tally.sunday_normal, dec("540"));
        assert_eq!(tally.weekday_normal, Decimal::ZERO);
        assert_eq!(tally.weekday_overtime, dec("240"));
        assert_eq!(tally.weekday_late_night, dec("240"));
        assert_eq!(tally.total, dec("1020"));
        assert_eq!(tally.sunday_subtotal(), dec("540"));
        assert_eq!(tally.weekday_subtotal(), dec("480"));
    }

    /// AG-002: Saturday is classified as a weekday
    #[test]
    fn test_ag_002_saturday_is_weekday() {
        // 2026-10-03 is a Saturday
        let mut saturday = WorkReport::new("r1", make_date("2026-10-03"));
        saturday.worker_entries.push(worker("佐藤", "08:00", "17:00"));

        let aggregation = aggregate(&[saturday]);
        let tally = aggregation.labor.get(&"佐藤".to_string()).unwrap();
        assert_eq!(tally.weekday_normal, dec("540"));
        assert_eq!(tally.sunday_subtotal(), Decimal::ZERO);
    }

    /// AG-003: same material at different prices stays separate
    #[test]
    fn test_ag_003_material_identity_includes_price() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.material_entries = vec![
            material("Paint A", "2500", "2"),
            material("Paint A", "2800", "1"),
            material("Paint A", "2500.00", "3"),
        ];

        let aggregation = aggregate(&[report]);
        let entries = aggregation.materials.into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.unit_price, dec("2500"));
        assert_eq!(entries[0].1.total_quantity, dec("5"));
        assert_eq!(entries[0].1.total_amount, dec("12500"));
        assert_eq!(entries[1].0.unit_price, dec("2800"));
        assert_eq!(entries[1].1.total_amount, dec("2800"));
    }

    /// AG-004: subcontractor days count distinct dates
    #[test]
    fn test_ag_004_subcontractor_distinct_days() {
        let mut first = WorkReport::new("r1", make_date("2026-10-05"));
        first.subcontractor_entries.push(subcontractor("山田塗装", 3));
        let mut second = WorkReport::new("r2", make_date("2026-10-05"));
        second.subcontractor_entries.push(subcontractor("山田塗装", 2));

        let aggregation = aggregate(&[first, second]);
        let tally = aggregation
            .subcontractors
            .get(&"山田塗装".to_string())
            .unwrap();
        assert_eq!(tally.total_worker_count, 5);
        assert_eq!(tally.total_days(), 1);
    }

    /// AG-005: travel is not allocated on a report without named workers
    #[test]
    fn test_ag_005_travel_without_workers() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.remote_departure_time = Some("07:00".to_string());
        report.remote_arrival_time = Some("08:00".to_string());
        report.worker_entries.push(worker("  ", "08:00", "17:00"));

        let aggregation = aggregate(&[report]);
        assert!(aggregation.labor.is_empty());
        assert_eq!(aggregation.report_count, 1);
    }

    #[test]
    fn test_travel_accumulates_across_reports() {
        let mut first = WorkReport::new("r1", make_date("2026-10-05"));
        first.remote_departure_time = Some("07:00".to_string());
        first.remote_arrival_time = Some("08:00".to_string());
        first.worker_entries = vec![worker("佐藤", "08:00", "17:00"), worker("鈴木", "08:00", "17:00")];

        let mut second = WorkReport::new("r2", make_date("2026-10-06"));
        second.remote_departure_time_2 = Some("17:00".to_string());
        second.remote_arrival_time_2 = Some("17:20".to_string());
        second.worker_entries = vec![worker("佐藤", "08:00", "17:00")];

        let aggregation = aggregate(&[first, second]);
        assert_eq!(
            aggregation.labor.get(&"佐藤".to_string()).unwrap().travel_minutes,
            dec("50")
        );
        assert_eq!(
            aggregation.labor.get(&"鈴木".to_string()).unwrap().travel_minutes,
            dec("30")
        );
    }

    #[test]
    fn test_blank_names_never_become_keys() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries.push(worker("", "08:00", "17:00"));
        report.material_entries.push(material(" ", "100", "1"));
        report.subcontractor_entries.push(subcontractor("\t", 4));

        let aggregation = aggregate(&[report]);
        assert!(aggregation.labor.is_empty());
        assert!(aggregation.materials.is_empty());
        assert!(aggregation.subcontractors.is_empty());
    }

    #[test]
    fn test_worker_names_are_trimmed_and_case_sensitive() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries = vec![
            worker(" Tanaka ", "08:00", "09:00"),
            worker("Tanaka", "09:00", "10:00"),
            worker("tanaka", "10:00", "11:00"),
        ];

        let aggregation = aggregate(&[report]);
        assert_eq!(aggregation.labor.len(), 2);
        assert_eq!(
            aggregation.labor.get(&"Tanaka".to_string()).unwrap().total,
            dec("120")
        );
        assert_eq!(
            aggregation.labor.get(&"tanaka".to_string()).unwrap().total,
            dec("60")
        );
    }

    #[test]
    fn test_reports_outside_period_are_skipped() {
        let mut before = WorkReport::new("r1", make_date("2026-09-20"));
        before.worker_entries.push(worker("佐藤", "08:00", "17:00"));
        let mut after = WorkReport::new("r2", make_date("2026-10-21"));
        after.worker_entries.push(worker("佐藤", "08:00", "17:00"));

        let aggregation = aggregate(&[before, after]);
        assert_eq!(aggregation.report_count, 0);
        assert!(aggregation.labor.is_empty());
    }

    #[test]
    fn test_project_filter() {
        let mut ours = WorkReport::new("r1", make_date("2026-10-05"));
        ours.project_id = Some("p-1".to_string());
        ours.worker_entries.push(worker("佐藤", "08:00", "17:00"));
        let mut theirs = WorkReport::new("r2", make_date("2026-10-05"));
        theirs.project_id = Some("p-2".to_string());
        theirs.worker_entries.push(worker("鈴木", "08:00", "17:00"));

        let reports = [ours, theirs];
        let aggregation = aggregate_reports(
            &reports,
            &create_period(),
            Some("p-1"),
            &WorkWindows::default(),
        );
        assert_eq!(aggregation.report_count, 1);
        assert!(aggregation.labor.get(&"佐藤".to_string()).is_some());
        assert!(aggregation.labor.get(&"鈴木".to_string()).is_none());
    }

    #[test]
    fn test_material_without_amount_or_price_contributes_zero_amount() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.material_entries.push(MaterialEntry {
            name: "Masking tape".to_string(),
            quantity: Some(dec("4")),
            ..Default::default()
        });

        let aggregation = aggregate(&[report]);
        let entries = aggregation.materials.into_entries();
        assert_eq!(entries[0].1.total_quantity, dec("4"));
        assert_eq!(entries[0].1.total_amount, Decimal::ZERO);
    }

    #[test]
    fn test_named_worker_without_hours_still_listed() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries.push(WorkerEntry {
            name: "見習い".to_string(),
            ..Default::default()
        });

        let aggregation = aggregate(&[report]);
        let tally = aggregation.labor.get(&"見習い".to_string()).unwrap();
        assert_eq!(tally, &LaborTally::default());
    }

    /// AG-006: an overflowing material line is skipped, the rest still count
    #[test]
    fn test_ag_006_material_overflow_contributes_zero() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.material_entries = vec![
            material("Paint A", "2", "79228162514264337593543950335"),
            material("Paint B", "100", "3"),
        ];

        let aggregation = aggregate(&[report]);
        assert_eq!(aggregation.report_count, 1);
        assert_eq!(aggregation.material_amount, dec("300"));

        let entries = aggregation.materials.into_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.name, "Paint A");
        assert_eq!(entries[0].1, MaterialTally::default());
        assert_eq!(entries[1].1.total_amount, dec("300"));
    }

    /// AG-007: amounts that only overflow once summed across materials are skipped
    #[test]
    fn test_ag_007_material_grand_total_overflow() {
        let huge = MaterialEntry {
            name: "Steel".to_string(),
            amount: Some(Decimal::MAX),
            ..Default::default()
        };
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.material_entries = vec![
            huge.clone(),
            MaterialEntry {
                name: "Copper".to_string(),
                ..huge
            },
        ];

        let aggregation = aggregate(&[report]);
        assert_eq!(aggregation.material_amount, Decimal::MAX);
        let entries = aggregation.materials.into_entries();
        assert_eq!(entries[0].1.total_amount, Decimal::MAX);
        assert_eq!(entries[1].1.total_amount, Decimal::ZERO);
    }

    /// AG-008: declared hours too large to convert count as zero
    #[test]
    fn test_ag_008_declared_hours_overflow_contributes_zero() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries = vec![
            WorkerEntry {
                name: "佐藤".to_string(),
                work_hours: Some(Decimal::MAX),
                ..Default::default()
            },
            worker("佐藤", "08:00", "17:00"),
        ];

        let aggregation = aggregate(&[report]);
        let tally = aggregation.labor.get(&"佐藤".to_string()).unwrap();
        assert_eq!(tally.weekday_normal, dec("540"));
        assert_eq!(tally.total, dec("540"));
        assert_eq!(aggregation.labor_minutes, dec("540"));
    }

    /// AG-009: labor minutes that overflow the running total are skipped
    #[test]
    fn test_ag_009_labor_total_overflow() {
        let declared = Decimal::MAX / Decimal::from(100);
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries = vec![
            WorkerEntry {
                name: "佐藤".to_string(),
                work_hours: Some(declared),
                ..Default::default()
            },
            WorkerEntry {
                name: "鈴木".to_string(),
                work_hours: Some(declared),
                ..Default::default()
            },
        ];

        let aggregation = aggregate(&[report]);
        let sato = aggregation.labor.get(&"佐藤".to_string()).unwrap();
        let suzuki = aggregation.labor.get(&"鈴木".to_string()).unwrap();
        assert_eq!(aggregation.labor_minutes, sato.total);
        assert_ne!(sato.total, Decimal::ZERO);
        assert_eq!(suzuki.total, Decimal::ZERO);
    }

    #[test]
    fn test_grand_totals_track_rollups() {
        let mut report = WorkReport::new("r1", make_date("2026-10-05"));
        report.worker_entries = vec![worker("佐藤", "08:00", "17:00"), worker("鈴木", "18:00", "02:00")];
        report.material_entries = vec![material("Paint A", "2500", "2"), material("Paint B", "100", "1")];
        report.subcontractor_entries = vec![subcontractor("山田塗装", 3), subcontractor("川口電設", 2)];

        let aggregation = aggregate(&[report]);
        assert_eq!(aggregation.labor_minutes, dec("1020"));
        assert_eq!(aggregation.material_amount, dec("5100"));
        assert_eq!(aggregation.subcontractor_count, 5);
    }
}
