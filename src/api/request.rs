//! Request types for the payroll engine API.

use serde::{Deserialize, Serialize};

use crate::calculation::ComputationMode;
use crate::models::PayrollInput;

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Formula generation to use; full mode when omitted.
    #[serde(default)]
    pub mode: ComputationMode,
    /// The payroll inputs.
    pub input: PayrollInput,
}
