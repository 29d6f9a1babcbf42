//! HTTP request handlers for the work report API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{compute_work_summary, summarize_from_store};
use crate::error::EngineResult;
use crate::models::{AggregationQuery, AggregationReport};

use super::request::{AggregateRequest, WorkSummaryParams};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/work-summary", get(work_summary_handler))
        .route("/aggregate", post(aggregate_handler))
        .with_state(state)
}

fn bad_request(error: ApiError) -> Response {
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error,
    }
    .into_response()
}

/// Logs the outcome of an aggregation and renders it.
fn finish(
    correlation_id: Uuid,
    query: &AggregationQuery,
    started: Instant,
    result: EngineResult<AggregationReport>,
) -> Response {
    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                period = %report.period.label,
                offset = query.offset,
                project_id = query.project_id.as_deref().unwrap_or("*"),
                report_count = report.report_count,
                workers = report.labor.len(),
                labor_hours = %report.totals.labor_hours,
                duration_us = started.elapsed().as_micros(),
                "Aggregation completed successfully"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                offset = query.offset,
                error = %err,
                "Aggregation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for GET /work-summary.
///
/// Aggregates the reports held by the store for the requested cycle.
async fn work_summary_handler(
    State(state): State<AppState>,
    params: Result<Query<WorkSummaryParams>, QueryRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing work summary request");

    let query: AggregationQuery = match params {
        Ok(Query(params)) => params.into(),
        Err(rejection) => {
            let body_text = rejection.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "Invalid query string"
            );
            return bad_request(ApiError::validation_error(body_text));
        }
    };

    let started = Instant::now();
    let result = state.reference_time().and_then(|reference| {
        summarize_from_store(state.store(), &query, reference, state.config().config())
    });
    finish(correlation_id, &query, started, result)
}

/// Handler for POST /aggregate.
///
/// Aggregates the reports carried in the request body.
async fn aggregate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AggregateRequest>, JsonRejection>,
) -> impl IntoResponse {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing aggregate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return bad_request(error);
        }
    };

    let query = request.query();
    let started = Instant::now();
    let reference = match request.reference_time {
        Some(reference) => Ok(reference),
        None => state.reference_time(),
    };
    let result = reference.and_then(|reference| {
        compute_work_summary(
            &request.reports,
            request.projects,
            &query,
            reference,
            state.config().config(),
        )
    });
    finish(correlation_id, &query, started, result)
}
