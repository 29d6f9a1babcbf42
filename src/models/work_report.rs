//! Daily work report model and its child entries.
//!
//! A [`WorkReport`] is owned by the surrounding application; the engine only
//! reads it. Field names follow the camelCase JSON the report forms emit.

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::lenient;

/// One worker's time on a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerEntry {
    /// Worker name as typed on the form. Blank names are ignored.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Start of work, `"HH:MM"`.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub start_time: Option<String>,
    /// End of work, `"HH:MM"`. May be earlier than the start for overnight work.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub end_time: Option<String>,
    /// Declared duration in decimal hours, used only without a start/end pair.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub work_hours: Option<Decimal>,
    /// Legacy name for the declared duration on older report forms.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub daily_hours: Option<Decimal>,
}

impl WorkerEntry {
    /// Returns the trimmed name, or `None` when the name is blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use work_report_engine::models::WorkerEntry;
    ///
    /// let entry = WorkerEntry { name: "  佐藤 ".to_string(), ..Default::default() };
    /// assert_eq!(entry.trimmed_name(), Some("佐藤"));
    ///
    /// let blank = WorkerEntry { name: "   ".to_string(), ..Default::default() };
    /// assert_eq!(blank.trimmed_name(), None);
    /// ```
    pub fn trimmed_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    /// Returns the start/end pair when both ends were filled in.
    pub fn time_range(&self) -> Option<(&str, &str)> {
        let start = self.start_time.as_deref().and_then(non_blank)?;
        let end = self.end_time.as_deref().and_then(non_blank)?;
        Some((start, end))
    }

    /// Returns the declared duration, preferring `workHours` over `dailyHours`.
    pub fn declared_hours(&self) -> Option<Decimal> {
        self.work_hours.or(self.daily_hours)
    }
}

/// A material consumed on a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialEntry {
    /// Material name. Blank names are ignored.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Package magnitude as typed, e.g. "20".
    #[serde(default, deserialize_with = "lenient::text")]
    pub volume: String,
    /// Package unit, e.g. "kg".
    #[serde(default, deserialize_with = "lenient::text")]
    pub volume_unit: String,
    /// Price per unit.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub unit_price: Option<Decimal>,
    /// Number of units used.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub quantity: Option<Decimal>,
    /// Precomputed line amount; overrides quantity × unit price when present.
    #[serde(default, deserialize_with = "lenient::decimal")]
    pub amount: Option<Decimal>,
}

impl MaterialEntry {
    /// Returns the trimmed name, or `None` when the name is blank.
    pub fn trimmed_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    /// Returns the line amount, falling back to quantity × unit price.
    ///
    /// Missing numbers count as zero. Returns `None` when quantity × unit
    /// price does not fit in a `Decimal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use work_report_engine::models::MaterialEntry;
    /// use rust_decimal::Decimal;
    ///
    /// let entry = MaterialEntry {
    ///     name: "Paint A".to_string(),
    ///     unit_price: Some(Decimal::new(2500, 0)),
    ///     quantity: Some(Decimal::new(3, 0)),
    ///     ..Default::default()
    /// };
    /// assert_eq!(entry.line_amount(), Some(Decimal::new(7500, 0)));
    /// ```
    pub fn line_amount(&self) -> Option<Decimal> {
        match self.amount {
            Some(amount) => Some(amount),
            None => self
                .quantity
                .unwrap_or(Decimal::ZERO)
                .checked_mul(self.unit_price.unwrap_or(Decimal::ZERO)),
        }
    }
}

/// A subcontractor crew present on a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcontractorEntry {
    /// Subcontractor company name. Blank names are ignored.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Head-count supplied that day.
    #[serde(default, deserialize_with = "lenient::count")]
    pub worker_count: u32,
    /// Free-text description of the work; not aggregated.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub work_content: Option<String>,
}

impl SubcontractorEntry {
    /// Returns the trimmed name, or `None` when the name is blank.
    pub fn trimmed_name(&self) -> Option<&str> {
        non_blank(&self.name)
    }
}

/// A daily work report with its worker, material and subcontractor entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkReport {
    /// Identifier assigned by the record store.
    #[serde(default, deserialize_with = "lenient::required_identifier")]
    pub id: String,
    /// The work day.
    pub date: NaiveDate,
    /// Project the report was filed against.
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub project_id: Option<String>,
    /// Outbound departure, `"HH:MM"`.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub remote_departure_time: Option<String>,
    /// Outbound arrival, `"HH:MM"`.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub remote_arrival_time: Option<String>,
    /// Return departure, `"HH:MM"`.
    #[serde(
        default,
        rename = "remoteDepartureTime2",
        deserialize_with = "lenient::optional_text"
    )]
    pub remote_departure_time_2: Option<String>,
    /// Return arrival, `"HH:MM"`.
    #[serde(
        default,
        rename = "remoteArrivalTime2",
        deserialize_with = "lenient::optional_text"
    )]
    pub remote_arrival_time_2: Option<String>,
    /// Worker time entries, in form order.
    #[serde(default)]
    pub worker_entries: Vec<WorkerEntry>,
    /// Material entries, in form order.
    #[serde(default)]
    pub material_entries: Vec<MaterialEntry>,
    /// Subcontractor entries, in form order.
    #[serde(default)]
    pub subcontractor_entries: Vec<SubcontractorEntry>,
}

impl WorkReport {
    /// Creates an empty report for the given day.
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            project_id: None,
            remote_departure_time: None,
            remote_arrival_time: None,
            remote_departure_time_2: None,
            remote_arrival_time_2: None,
            worker_entries: Vec::new(),
            material_entries: Vec::new(),
            subcontractor_entries: Vec::new(),
        }
    }

    /// Returns true if the report falls on a Sunday.
    ///
    /// Saturday counts as a weekday for hour classification.
    ///
    /// # Examples
    ///
    /// ```
    /// use work_report_engine::models::WorkReport;
    /// use chrono::NaiveDate;
    ///
    /// let sunday = WorkReport::new("r1", NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    /// assert!(sunday.is_sunday());
    ///
    /// let saturday = WorkReport::new("r2", NaiveDate::from_ymd_opt(2026, 1, 17).unwrap());
    /// assert!(!saturday.is_sunday());
    /// ```
    pub fn is_sunday(&self) -> bool {
        self.date.weekday() == Weekday::Sun
    }

    /// Counts worker entries with a non-blank name.
    pub fn named_worker_count(&self) -> usize {
        self.worker_entries
            .iter()
            .filter(|w| w.trimmed_name().is_some())
            .count()
    }

    /// Returns true when the report belongs to the given project.
    pub fn matches_project(&self, project_id: &str) -> bool {
        self.project_id.as_deref() == Some(project_id.trim())
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
