//! End-to-end work summary computation.
//!
//! Resolves the billing period, aggregates the reports that fall inside it
//! and assembles the final report. Nothing here reads the clock; callers
//! pass the reference instant in.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AggregationQuery, AggregationReport, BillingPeriod, ProjectOption, WorkReport};
use crate::store::ReportStore;

use super::aggregation::aggregate_reports;
use super::assembler::assemble_report;
use super::billing_period::resolve_billing_period;

/// Converts a UTC instant to wall-clock time at a fixed offset.
///
/// The billing cycle boundary is a local calendar date, so "now" must be
/// read in the zone the reports are filed in.
///
/// # Errors
///
/// Returns [`EngineError::InvalidConfig`] if the offset is a day or more.
///
/// # Examples
///
/// ```
/// use work_report_engine::calculation::local_reference_time;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// // 2026-10-20 20:00 UTC is already the 21st in Tokyo
/// let now = Utc.with_ymd_and_hms(2026, 10, 20, 20, 0, 0).unwrap();
/// let local = local_reference_time(now, 540).unwrap();
/// assert_eq!(local.date(), NaiveDate::from_ymd_opt(2026, 10, 21).unwrap());
/// ```
pub fn local_reference_time(
    now: DateTime<Utc>,
    utc_offset_minutes: i32,
) -> EngineResult<NaiveDateTime> {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| EngineError::InvalidConfig {
            message: format!("utc_offset_minutes {utc_offset_minutes} is out of range"),
        })?;
    Ok(now.with_timezone(&offset).naive_local())
}

/// Aggregates reports for an already-resolved period.
///
/// Reports outside the period or the requested project are ignored, so the
/// caller may pass an unfiltered batch.
pub fn aggregate_period(
    reports: &[WorkReport],
    period: BillingPeriod,
    project_id: Option<&str>,
    projects: Vec<ProjectOption>,
    config: &EngineConfig,
) -> EngineResult<AggregationReport> {
    let aggregation = aggregate_reports(reports, &period, project_id, &config.windows);
    assemble_report(
        aggregation,
        period,
        projects,
        config.output.hour_precision,
        &config.output.collation_locale,
    )
}

/// Computes the work summary for a query from an in-memory batch.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPeriodOffset`] for an unreachable offset
/// and [`EngineError::CollationUnavailable`] if names cannot be ordered.
///
/// # Example
///
/// ```
/// use work_report_engine::calculation::compute_work_summary;
/// use work_report_engine::config::EngineConfig;
/// use work_report_engine::models::{AggregationQuery, WorkReport, WorkerEntry};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut report = WorkReport::new("r1", NaiveDate::from_ymd_opt(2026, 10, 5).unwrap());
/// report.worker_entries.push(WorkerEntry {
///     name: "佐藤".to_string(),
///     start_time: Some("08:00".to_string()),
///     end_time: Some("17:00".to_string()),
///     ..Default::default()
/// });
///
/// let now = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// let summary = compute_work_summary(
///     &[report],
///     vec![],
///     &AggregationQuery::default(),
///     now,
///     &EngineConfig::default(),
/// )
/// .unwrap();
///
/// assert_eq!(summary.labor[0].weekday_normal, Decimal::new(900, 2));
/// assert_eq!(summary.totals.labor_hours.to_string(), "9.00");
/// ```
pub fn compute_work_summary(
    reports: &[WorkReport],
    projects: Vec<ProjectOption>,
    query: &AggregationQuery,
    reference: NaiveDateTime,
    config: &EngineConfig,
) -> EngineResult<AggregationReport> {
    let period = resolve_billing_period(reference, query.offset)?;
    aggregate_period(
        reports,
        period,
        query.project_id.as_deref(),
        projects,
        config,
    )
}

/// Computes the work summary for a query from a report store.
///
/// A store failure aborts the whole aggregation; nothing partial is
/// returned.
pub fn summarize_from_store(
    store: &dyn ReportStore,
    query: &AggregationQuery,
    reference: NaiveDateTime,
    config: &EngineConfig,
) -> EngineResult<AggregationReport> {
    let period = resolve_billing_period(reference, query.offset)?;
    let project_id = query.project_id.as_deref();

    let fetched = store
        .fetch_reports(&period, project_id)
        .and_then(|reports| Ok((reports, store.list_projects()?)));
    let (reports, projects) = match fetched {
        Ok(fetched) => fetched,
        Err(e) => {
            warn!(period = %period.label, error = %e, "Report store failed");
            return Err(e);
        }
    };

    info!(
        period = %period.label,
        project_id = project_id.unwrap_or("*"),
        fetched = reports.len(),
        "Fetched reports for billing period"
    );

    aggregate_period(&reports, period, project_id, projects, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WorkerEntry;
    use crate::store::InMemoryReportStore;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn report(id: &str, date: &str, start: &str, end: &str) -> WorkReport {
        let mut report = WorkReport::new(id, make_date(date));
        report.project_id = Some("p1".to_string());
        report.worker_entries.push(WorkerEntry {
            name: "佐藤".to_string(),
            start_time: Some(start.to_string()),
            end_time: Some(end.to_string()),
            ..Default::default()
        });
        report
    }

    struct FailingStore;

    impl ReportStore for FailingStore {
        fn fetch_reports(
            &self,
            _period: &BillingPeriod,
            _project_id: Option<&str>,
        ) -> EngineResult<Vec<WorkReport>> {
            Err(EngineError::RecordStoreUnavailable {
                message: "connection refused".to_string(),
            })
        }

        fn list_projects(&self) -> EngineResult<Vec<ProjectOption>> {
            Ok(vec![])
        }
    }

    /// EN-001: offset selects the previous cycle
    #[test]
    fn test_en_001_offset_selects_history() {
        let reports = vec![
            report("r1", "2026-09-01", "08:00", "17:00"),
            report("r2", "2026-10-01", "08:00", "12:00"),
        ];
        let now = make_datetime("2026-10-19", "12:00:00");
        let query = AggregationQuery {
            offset: -1,
            project_id: None,
        };

        let summary =
            compute_work_summary(&reports, vec![], &query, now, &EngineConfig::default()).unwrap();
        assert_eq!(summary.period.label, "2026年8月21日〜2026年9月20日");
        assert_eq!(summary.report_count, 1);
        assert_eq!(summary.labor[0].weekday_normal, dec("9.00"));
    }

    /// EN-002: store failures surface as one error
    #[test]
    fn test_en_002_store_failure() {
        let now = make_datetime("2026-10-19", "12:00:00");
        match summarize_from_store(
            &FailingStore,
            &AggregationQuery::default(),
            now,
            &EngineConfig::default(),
        ) {
            Err(EngineError::RecordStoreUnavailable { message }) => {
                assert_eq!(message, "connection refused");
            }
            other => panic!("Expected RecordStoreUnavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_summarize_from_store_passes_projects_through() {
        let store = InMemoryReportStore::with_data(
            vec![report("r1", "2026-10-05", "08:00", "17:00")],
            vec![ProjectOption {
                id: "p1".to_string(),
                name: "本社塗装".to_string(),
            }],
        );
        let query = AggregationQuery {
            offset: 0,
            project_id: Some("p1".to_string()),
        };

        let summary = summarize_from_store(
            &store,
            &query,
            make_datetime("2026-10-19", "12:00:00"),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(summary.report_count, 1);
        assert_eq!(summary.projects.len(), 1);
        assert_eq!(summary.projects[0].name, "本社塗装");
    }

    #[test]
    fn test_unreachable_offset() {
        let result = compute_work_summary(
            &[],
            vec![],
            &AggregationQuery {
                offset: i32::MAX,
                project_id: None,
            },
            make_datetime("2026-10-19", "12:00:00"),
            &EngineConfig::default(),
        );
        assert!(matches!(
            result,
            Err(EngineError::InvalidPeriodOffset { offset: i32::MAX })
        ));
    }

    #[test]
    fn test_precision_from_config() {
        let mut config = EngineConfig::default();
        config.output.hour_precision = 1;
        let reports = vec![report("r1", "2026-10-05", "08:00", "10:20")];

        let summary = compute_work_summary(
            &reports,
            vec![],
            &AggregationQuery::default(),
            make_datetime("2026-10-19", "12:00:00"),
            &config,
        )
        .unwrap();
        assert_eq!(summary.labor[0].weekday_normal.to_string(), "2.3");
    }

    #[test]
    fn test_local_reference_time_shifts_cycle() {
        let now = Utc.with_ymd_and_hms(2026, 10, 20, 16, 0, 0).unwrap();
        assert_eq!(
            local_reference_time(now, 0).unwrap().date(),
            make_date("2026-10-20")
        );
        assert_eq!(
            local_reference_time(now, 540).unwrap().date(),
            make_date("2026-10-21")
        );
        assert!(local_reference_time(now, 24 * 60).is_err());
    }
}
