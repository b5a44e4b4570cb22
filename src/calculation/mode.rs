//! Selection between the two formula generations.

use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayrollInput, SimplePayrollInput, SimplePayrollResult, TaxTableState};

use super::payroll::{FullPayrollResult, calculate_full};
use super::simple_mode::compute_simple;

/// Which formula generation computes a payroll.
///
/// The two generations round differently and produce different numbers for
/// the same input; a result is always labelled with the mode that produced it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputationMode {
    /// Weekly-hour generation with round-up rounding and no deductions.
    Simple,
    /// Half-up rounding, statutory deductions and withholding-table lookup.
    #[default]
    Full,
}

/// The result of [`calculate`], tagged with its mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PayrollOutcome {
    /// Full-mode payroll and its income tax resolution.
    Full(FullPayrollResult),
    /// Simple-mode payroll.
    Simple(SimplePayrollResult),
}

impl PayrollOutcome {
    /// Returns the mode that produced this outcome.
    pub fn mode(&self) -> ComputationMode {
        match self {
            PayrollOutcome::Full(_) => ComputationMode::Full,
            PayrollOutcome::Simple(_) => ComputationMode::Simple,
        }
    }
}

/// Computes a payroll with the selected formula generation.
///
/// Simple mode reads only the fields it knows from `input` (see
/// [`SimplePayrollInput`]) and ignores `table`.
pub fn calculate(
    mode: ComputationMode,
    input: &PayrollInput,
    table: &TaxTableState,
) -> EngineResult<PayrollOutcome> {
    match mode {
        ComputationMode::Full => calculate_full(input, table).map(PayrollOutcome::Full),
        ComputationMode::Simple => {
            compute_simple(&SimplePayrollInput::from(input)).map(PayrollOutcome::Simple)
        }
    }
}
