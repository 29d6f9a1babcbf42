//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::calculation::WorkWindows;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, OutputConfig};

/// Name of the configuration file inside a configuration directory.
pub const CONFIG_FILE_NAME: &str = "engine.yaml";

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── engine.yaml   # Windows, output format, billing zone, server
/// ```
///
/// # Example
///
/// ```no_run
/// use work_report_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Hour precision: {}", loader.output().hour_precision);
/// # Ok::<(), work_report_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `engine.yaml` is missing
    /// - the file contains invalid YAML
    /// - the values fail validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE_NAME);
        let config = Self::load_yaml::<EngineConfig>(&config_path)?;
        let loader = Self::from_config(config)?;

        info!(
            path = %config_path.display(),
            collation_locale = %loader.config.output.collation_locale,
            "Loaded engine configuration"
        );
        Ok(loader)
    }

    /// Wraps an already-built configuration after validating it.
    ///
    /// # Example
    ///
    /// ```
    /// use work_report_engine::config::{ConfigLoader, EngineConfig};
    ///
    /// let loader = ConfigLoader::from_config(EngineConfig::default()).unwrap();
    /// assert_eq!(loader.output().collation_locale, "ja");
    /// ```
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the classification windows.
    pub fn windows(&self) -> &WorkWindows {
        &self.config.windows
    }

    /// Returns the output formatting settings.
    pub fn output(&self) -> &OutputConfig {
        &self.config.output
    }
}
