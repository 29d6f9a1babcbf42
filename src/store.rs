//! Report store collaborator.
//!
//! The engine never owns report records. A [`ReportStore`] supplies the
//! reports of a billing period and the projects offered in the filter;
//! [`InMemoryReportStore`] backs development servers and tests.

use std::fs;
use std::path::Path;
use std::sync::RwLock;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{BillingPeriod, ProjectOption, WorkReport};

/// Source of work reports and project options.
pub trait ReportStore: Send + Sync {
    /// Returns the reports dated inside `period`, restricted to `project_id`
    /// when given.
    fn fetch_reports(
        &self,
        period: &BillingPeriod,
        project_id: Option<&str>,
    ) -> EngineResult<Vec<WorkReport>>;

    /// Returns the projects offered in the report filter.
    fn list_projects(&self) -> EngineResult<Vec<ProjectOption>>;
}

/// Seed document accepted by [`InMemoryReportStore::from_json_file`].
#[derive(Debug, Deserialize)]
struct SeedData {
    #[serde(default)]
    reports: Vec<WorkReport>,
    #[serde(default)]
    projects: Vec<ProjectOption>,
}

/// In-memory store for development and testing.
///
/// # Example
///
/// ```
/// use work_report_engine::calculation::resolve_billing_period;
/// use work_report_engine::models::WorkReport;
/// use work_report_engine::store::{InMemoryReportStore, ReportStore};
/// use chrono::NaiveDate;
///
/// let store = InMemoryReportStore::new();
/// store.insert_report(WorkReport::new("r1", NaiveDate::from_ymd_opt(2026, 10, 1).unwrap())).unwrap();
/// store.insert_report(WorkReport::new("r2", NaiveDate::from_ymd_opt(2026, 11, 1).unwrap())).unwrap();
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let period = resolve_billing_period(now, 0).unwrap();
/// assert_eq!(store.fetch_reports(&period, None).unwrap().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct InMemoryReportStore {
    reports: RwLock<Vec<WorkReport>>,
    projects: RwLock<Vec<ProjectOption>>,
}

fn poisoned<T>(_: T) -> EngineError {
    EngineError::RecordStoreUnavailable {
        message: "in-memory store lock poisoned".to_string(),
    }
}

impl InMemoryReportStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given records.
    pub fn with_data(reports: Vec<WorkReport>, projects: Vec<ProjectOption>) -> Self {
        Self {
            reports: RwLock::new(reports),
            projects: RwLock::new(projects),
        }
    }

    /// Loads a store from a JSON file of the form
    /// `{"reports": [...], "projects": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RecordStoreUnavailable`] if the file cannot be
    /// read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let unavailable = |message: String| EngineError::RecordStoreUnavailable {
            message: format!("{}: {}", path.display(), message),
        };

        let content = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let seed: SeedData =
            serde_json::from_str(&content).map_err(|e| unavailable(e.to_string()))?;

        Ok(Self::with_data(seed.reports, seed.projects))
    }

    /// Adds a report.
    pub fn insert_report(&self, report: WorkReport) -> EngineResult<()> {
        self.reports.write().map_err(poisoned)?.push(report);
        Ok(())
    }

    /// Adds a project option.
    pub fn insert_project(&self, project: ProjectOption) -> EngineResult<()> {
        self.projects.write().map_err(poisoned)?.push(project);
        Ok(())
    }

    /// Returns the number of stored reports.
    pub fn report_count(&self) -> EngineResult<usize> {
        Ok(self.reports.read().map_err(poisoned)?.len())
    }
}

impl ReportStore for InMemoryReportStore {
    fn fetch_reports(
        &self,
        period: &BillingPeriod,
        project_id: Option<&str>,
    ) -> EngineResult<Vec<WorkReport>> {
        let reports = self.reports.read().map_err(poisoned)?;
        Ok(reports
            .iter()
            .filter(|r| period.contains_date(r.date))
            .filter(|r| project_id.is_none_or(|id| r.matches_project(id)))
            .cloned()
            .collect())
    }

    fn list_projects(&self) -> EngineResult<Vec<ProjectOption>> {
        Ok(self.projects.read().map_err(poisoned)?.clone())
    }
}
