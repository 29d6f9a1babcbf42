//! Configuration types for the aggregation engine.
//!
//! These are deserialized from `engine.yaml`. Every section and field has a
//! default, so an empty file yields the standard windows and output format.

use serde::Deserialize;

use crate::calculation::{NameCollator, WorkWindows, overlap_minutes};
use crate::error::{EngineError, EngineResult};

/// Output formatting settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places for hour values.
    pub hour_precision: u32,
    /// BCP 47 locale used to order names.
    pub collation_locale: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            hour_precision: 2,
            collation_locale: "ja".to_string(),
        }
    }
}

/// Billing cycle settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    /// Offset from UTC, in minutes, of the zone whose wall clock decides
    /// which billing cycle is current.
    pub utc_offset_minutes: i32,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 540,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_address: String,
    /// Optional JSON file used to seed the in-memory report store.
    pub data_file: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            data_file: None,
        }
    }
}

/// The complete engine configuration from engine.yaml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reference windows for hour classification.
    pub windows: WorkWindows,
    /// Output formatting.
    pub output: OutputConfig,
    /// Billing cycle settings.
    pub billing: BillingConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

/// Largest precision a `Decimal` can carry.
const MAX_HOUR_PRECISION: u32 = 28;

/// Windows may extend into the next day but no further.
const MAX_WINDOW_MINUTE: i64 = 2880;

impl EngineConfig {
    /// Checks values that deserialize fine but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for inverted, out-of-range or
    /// overlapping windows, an excessive precision, a locale with no
    /// collation data, or an offset of a day or more.
    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |message: String| Err(EngineError::InvalidConfig { message });

        let windows: Vec<_> = std::iter::once(("normal", &self.windows.normal))
            .chain(self.windows.late_night.iter().map(|w| ("late_night", w)))
            .collect();
        for &(name, window) in &windows {
            if window.start < 0 || window.end > MAX_WINDOW_MINUTE {
                return invalid(format!(
                    "{name} window [{}, {}) must lie within [0, {MAX_WINDOW_MINUTE})",
                    window.start, window.end
                ));
            }
            if window.start >= window.end {
                return invalid(format!(
                    "{name} window [{}, {}) ends before it starts",
                    window.start, window.end
                ));
            }
        }

        // Overlapping windows would count the same minute twice.
        for (i, &(name, window)) in windows.iter().enumerate() {
            for &(other_name, other) in &windows[i + 1..] {
                if overlap_minutes(window.start, window.end, other.start, other.end) > 0 {
                    return invalid(format!(
                        "{name} window [{}, {}) overlaps {other_name} window [{}, {})",
                        window.start, window.end, other.start, other.end
                    ));
                }
            }
        }

        if self.output.hour_precision > MAX_HOUR_PRECISION {
            return invalid(format!(
                "hour_precision {} exceeds {MAX_HOUR_PRECISION}",
                self.output.hour_precision
            ));
        }
        if self.output.collation_locale.trim().is_empty() {
            return invalid("collation_locale must not be empty".to_string());
        }
        if let Err(e) = NameCollator::new(&self.output.collation_locale) {
            return invalid(format!("collation_locale: {e}"));
        }
        if self.billing.utc_offset_minutes.unsigned_abs() >= 1440 {
            return invalid(format!(
                "utc_offset_minutes {} must be less than a day",
                self.billing.utc_offset_minutes
            ));
        }

        Ok(())
    }
}
