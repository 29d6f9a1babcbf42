//! Aggregation query and output models.
//!
//! These are created fresh for every request and serialized as camelCase
//! JSON for the report screens.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BillingPeriod, lenient};

/// Which billing cycle to aggregate, and for which project.
///
/// # Example
///
/// ```
/// use work_report_engine::models::AggregationQuery;
///
/// let query: AggregationQuery = serde_json::from_str(r#"{"offset": -1}"#).unwrap();
/// assert_eq!(query.offset, -1);
/// assert!(query.project_id.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationQuery {
    /// Cycle offset in months: 0 is the current cycle, negative is history.
    #[serde(default)]
    pub offset: i32,
    /// Restrict to reports filed against this project.
    #[serde(default)]
    pub project_id: Option<String>,
}

/// A project offered in the report filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectOption {
    /// Project identifier.
    #[serde(default, deserialize_with = "lenient::required_identifier")]
    pub id: String,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
}

/// Per-worker labor hours for a billing period.
///
/// All values are hours rounded to the configured precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborSummary {
    /// Worker name.
    pub name: String,
    /// Weekday hours inside 08:00–17:00.
    pub weekday_normal: Decimal,
    /// Weekday hours outside the normal and late-night windows.
    pub weekday_overtime: Decimal,
    /// Weekday hours inside 22:00–05:00.
    pub weekday_late_night: Decimal,
    /// Sum of the three weekday buckets.
    pub weekday_subtotal: Decimal,
    /// Sunday hours inside 08:00–17:00.
    pub sunday_normal: Decimal,
    /// Sunday hours outside the normal and late-night windows.
    pub sunday_overtime: Decimal,
    /// Sunday hours inside 22:00–05:00.
    pub sunday_late_night: Decimal,
    /// Sum of the three Sunday buckets.
    pub sunday_subtotal: Decimal,
    /// All classified hours.
    pub total: Decimal,
    /// Travel hours allocated to this worker.
    pub travel_time: Decimal,
}

/// Per-material usage for a billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    /// Material name.
    pub name: String,
    /// Package magnitude.
    pub volume: String,
    /// Package unit.
    pub volume_unit: String,
    /// Price per unit; a missing price is reported as zero.
    pub unit_price: Decimal,
    /// Units used across the period.
    pub total_quantity: Decimal,
    /// Amount spent across the period.
    pub total_amount: Decimal,
}

/// Per-subcontractor attendance for a billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcontractorSummary {
    /// Subcontractor name.
    pub name: String,
    /// Sum of daily head-counts.
    pub total_worker_count: u64,
    /// Distinct calendar days the subcontractor was on site.
    pub total_days: u32,
}

/// Grand totals across all three rollups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    /// All classified labor hours.
    pub labor_hours: Decimal,
    /// All material amounts.
    pub material_amount: Decimal,
    /// All subcontractor head-counts.
    pub subcontractor_count: u64,
}

/// The complete aggregation for one billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationReport {
    /// The resolved billing period.
    pub period: BillingPeriod,
    /// Number of reports that were aggregated.
    pub report_count: usize,
    /// Labor rollup, ordered by worker name.
    pub labor: Vec<LaborSummary>,
    /// Material rollup, ordered by material name.
    pub materials: Vec<MaterialSummary>,
    /// Subcontractor rollup, ordered by name.
    pub subcontractors: Vec<SubcontractorSummary>,
    /// Projects for the filter dropdown.
    pub projects: Vec<ProjectOption>,
    /// Grand totals.
    pub totals: ReportTotals,
}
