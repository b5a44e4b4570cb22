//! Configuration loading for the payroll engine.
//!
//! This module loads the rule-set metadata and form defaults from
//! `engine.yaml`, and the simplified withholding table from a CSV file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/kr2025").unwrap();
//! println!("Loaded rule set: {}", config.metadata().name);
//! ```

mod loader;
mod types;
mod withholding;

pub use loader::{ConfigLoader, ENGINE_FILE};
pub use types::{EngineConfig, EngineMetadata, InputDefaults, TaxTableSource};
pub use withholding::{TABLE_COLUMNS, load_tax_table, parse_tax_table};
