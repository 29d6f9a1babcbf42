//! Core data models for the work report aggregation engine.
//!
//! Input records ([`WorkReport`] and its entries) are owned by the record
//! store; output models are built per request by the engine.

mod billing_period;
mod lenient;
mod summary;
mod work_report;

pub use billing_period::BillingPeriod;
pub use summary::{
    AggregationQuery, AggregationReport, LaborSummary, MaterialSummary, ProjectOption,
    ReportTotals, SubcontractorSummary,
};
pub use work_report::{MaterialEntry, SubcontractorEntry, WorkReport, WorkerEntry};
