//! Request types for the work report API.
//!
//! This module defines the JSON body of `POST /aggregate` and the query
//! string of `GET /work-summary`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{AggregationQuery, ProjectOption, WorkReport};

/// Query string for `GET /work-summary`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSummaryParams {
    /// Cycle offset in months; 0 when omitted.
    #[serde(default)]
    pub offset: i32,
    /// Optional project filter. An empty value means all projects.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl From<WorkSummaryParams> for AggregationQuery {
    fn from(params: WorkSummaryParams) -> Self {
        AggregationQuery {
            offset: params.offset,
            project_id: non_empty(params.project_id),
        }
    }
}

/// Request body for `POST /aggregate`.
///
/// Carries the reports themselves, so the aggregation runs without touching
/// the report store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateRequest {
    /// Instant that decides the current cycle; the server clock when omitted.
    #[serde(default)]
    pub reference_time: Option<NaiveDateTime>,
    /// Cycle offset in months.
    #[serde(default)]
    pub offset: i32,
    /// Optional project filter.
    #[serde(default)]
    pub project_id: Option<String>,
    /// Reports to aggregate. Reports outside the period are ignored.
    pub reports: Vec<WorkReport>,
    /// Projects passed through to the result.
    #[serde(default)]
    pub projects: Vec<ProjectOption>,
}

impl AggregateRequest {
    /// Returns the period/project selection of this request.
    pub fn query(&self) -> AggregationQuery {
        AggregationQuery {
            offset: self.offset,
            project_id: non_empty(self.project_id.clone()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
