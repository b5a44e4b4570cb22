//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{info, warn};

use crate::config::ConfigLoader;
use crate::models::TaxTableState;

/// Shared application state.
///
/// The withholding table sits behind an [`ArcSwap`]. A calculation loads one
/// snapshot and uses it to the end, so a reload never exposes a partially
/// replaced table.
#[derive(Clone)]
pub struct AppState {
    /// The loaded engine configuration.
    config: Arc<ConfigLoader>,
    /// The current withholding table.
    tax_table: Arc<ArcSwap<TaxTableState>>,
}

impl AppState {
    /// Creates a new application state, reading the withholding table named
    /// by the configuration.
    pub fn new(config: ConfigLoader) -> Self {
        let tax_table = config.tax_table_state();
        Self::with_tax_table(config, tax_table)
    }

    /// Creates a new application state with an already loaded table.
    pub fn with_tax_table(config: ConfigLoader, tax_table: TaxTableState) -> Self {
        Self {
            config: Arc::new(config),
            tax_table: Arc::new(ArcSwap::from_pointee(tax_table)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a snapshot of the current withholding table.
    pub fn tax_table(&self) -> Arc<TaxTableState> {
        self.tax_table.load_full()
    }

    /// Replaces the withholding table.
    pub fn replace_tax_table(&self, tax_table: TaxTableState) {
        self.tax_table.store(Arc::new(tax_table));
    }

    /// Re-reads the withholding table from disk and swaps it in.
    ///
    /// A failed reload still replaces the table; income tax then resolves
    /// with a zero base until the next successful reload.
    pub fn reload_tax_table(&self) -> Arc<TaxTableState> {
        let path = self.config.tax_table_path();
        let state = self.config.tax_table_state();

        match &state {
            TaxTableState::Loaded(table) => {
                info!(path = %path.display(), rows = table.len(), "withholding table reloaded");
            }
            TaxTableState::Unavailable { message } => {
                warn!(
                    path = %path.display(),
                    message = %message,
                    "withholding table reload unavailable"
                );
            }
        }

        let state = Arc::new(state);
        self.tax_table.store(Arc::clone(&state));
        state
    }
}
