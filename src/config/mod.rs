//! Configuration loading and management for the work report engine.
//!
//! This module loads the classification windows, output format, billing
//! time zone and server settings from `engine.yaml`.
//!
//! # Example
//!
//! ```no_run
//! use work_report_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Normal window: {:?}", config.windows().normal);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader};
pub use types::{BillingConfig, EngineConfig, OutputConfig, ServerConfig};
