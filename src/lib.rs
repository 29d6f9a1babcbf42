//! Payroll-period work aggregation engine
//!
//! This crate turns daily work reports into billing-period summaries: labor
//! hours split into weekday/Sunday and normal/overtime/late-night buckets,
//! material usage and cost, and subcontractor head-counts and days. Billing
//! periods run from the 21st of one month to the 20th of the next.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
