//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, TableLoadStatus, TaxTableState};

use super::types::{EngineConfig, EngineMetadata, InputDefaults};
use super::withholding::load_tax_table;

/// Name of the configuration file inside the configuration directory.
pub const ENGINE_FILE: &str = "engine.yaml";

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/kr2025/
/// ├── engine.yaml     # Metadata, form defaults, table file name
/// └── tax_table.csv   # Simplified withholding table
/// ```
///
/// The configuration is loaded once at startup. The withholding table is
/// read separately with [`ConfigLoader::load_tax_table`] so that it can be
/// reloaded without touching the rest of the configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::TaxTableState;
///
/// let loader = ConfigLoader::load("./config/kr2025")?;
/// println!("Loaded rule set: {}", loader.metadata().name);
///
/// let table = TaxTableState::from(loader.load_tax_table());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    dir: PathBuf,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::ConfigNotFound`] when `engine.yaml` is missing
    /// and [`EngineError::ConfigParseError`] when it is not valid.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref().to_path_buf();
        let config = Self::load_yaml::<EngineConfig>(&dir.join(ENGINE_FILE))?;

        info!(
            code = %config.engine.code,
            version = %config.engine.version,
            dir = %dir.display(),
            "engine configuration loaded"
        );

        Ok(Self { config, dir })
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

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the rule-set metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        &self.config.engine
    }

    /// Returns the form defaults.
    pub fn defaults(&self) -> &InputDefaults {
        &self.config.defaults
    }

    /// Returns a payroll input pre-filled with the form defaults.
    pub fn default_input(&self) -> PayrollInput {
        self.config.defaults.to_input()
    }

    /// Returns the path of the withholding table file.
    pub fn tax_table_path(&self) -> PathBuf {
        self.dir.join(&self.config.tax_table.file)
    }

    /// Reads the withholding table. Never fails; see [`load_tax_table`].
    pub fn load_tax_table(&self) -> TableLoadStatus {
        load_tax_table(self.tax_table_path())
    }

    /// Reads the withholding table and validates it into a [`TaxTableState`].
    pub fn tax_table_state(&self) -> TaxTableState {
        TaxTableState::from(self.load_tax_table())
    }
}
