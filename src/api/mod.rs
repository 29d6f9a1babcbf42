//! HTTP API module for the work report engine.
//!
//! This module provides the REST endpoints that serve billing-period work
//! summaries.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AggregateRequest, WorkSummaryParams};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
