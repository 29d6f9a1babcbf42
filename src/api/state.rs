//! Application state for the work report API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{NaiveDateTime, Utc};

use crate::calculation::local_reference_time;
use crate::config::ConfigLoader;
use crate::error::EngineResult;
use crate::store::ReportStore;

/// Shared application state.
///
/// Holds the loaded configuration, the report store, and optionally a fixed
/// reference time that replaces the wall clock.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// Source of work reports and projects.
    store: Arc<dyn ReportStore>,
    /// Frozen "now", used by tests and replays.
    fixed_time: Option<NaiveDateTime>,
}

impl AppState {
    /// Creates a new application state with the given configuration and store.
    pub fn new(config: ConfigLoader, store: Arc<dyn ReportStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            fixed_time: None,
        }
    }

    /// Pins the reference time instead of reading the clock.
    pub fn with_fixed_time(mut self, reference: NaiveDateTime) -> Self {
        self.fixed_time = Some(reference);
        self
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the report store.
    pub fn store(&self) -> &dyn ReportStore {
        self.store.as_ref()
    }

    /// Returns the wall-clock reference time in the billing time zone.
    pub fn reference_time(&self) -> EngineResult<NaiveDateTime> {
        match self.fixed_time {
            Some(reference) => Ok(reference),
            None => local_reference_time(
                Utc::now(),
                self.config.config().billing.utc_offset_minutes,
            ),
        }
    }
}
