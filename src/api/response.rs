//! Response types for the payroll engine API.
//!
//! This module defines the success envelopes and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{ComputationMode, PayrollOutcome};
use crate::config::{EngineMetadata, InputDefaults};
use crate::error::EngineError;
use crate::models::{BracketRow, TaxTableState};

/// Response body of a successful `/calculate` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Version of the rule set (rates and table) in effect.
    pub rule_set_version: String,
    /// The formula generation that produced the result.
    pub mode: ComputationMode,
    /// The calculation result.
    pub outcome: PayrollOutcome,
}

/// Response body of `/defaults`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsResponse {
    /// Version of the engine.
    pub engine_version: String,
    /// Rule-set metadata.
    pub engine: EngineMetadata,
    /// Form defaults.
    pub defaults: InputDefaults,
}

/// Response body of `/tax-table` and `/tax-table/reload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTableResponse {
    /// Whether lookups against the table are possible.
    pub ok: bool,
    /// Row count or the reason the table is unavailable.
    pub message: String,
    /// The bracket rows, empty when unavailable.
    pub rows: Vec<BracketRow>,
}

impl From<&TaxTableState> for TaxTableResponse {
    fn from(state: &TaxTableState) -> Self {
        match state {
            TaxTableState::Loaded(table) => Self {
                ok: !table.is_empty(),
                message: format!("{} withholding brackets loaded", table.len()),
                rows: table.rows().to_vec(),
            },
            TaxTableState::Unavailable { message } => Self {
                ok: false,
                message: message.clone(),
                rows: Vec::new(),
            },
        }
    }
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code such as `INVALID_INPUT`.
    pub code: String,
    /// Message suitable for display next to the form.
    pub message: String,
    /// Offending field or underlying cause, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Builds an error body without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Builds an error body carrying details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Error for a request body that is not the expected JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// An [`ApiError`] paired with the status it is sent with.
pub struct ApiErrorResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_INPUT",
                    format!("Invalid input field '{}': {}", field, message),
                    field,
                ),
            },
            EngineError::InvalidTaxTable { row, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "TAX_TABLE_ERROR",
                    "Withholding table is invalid",
                    format!("Row {}: {}", row, message),
                ),
            },
            err @ EngineError::ZeroDuration { .. } => ApiErrorResponse {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                error: ApiError::with_details(
                    "ZERO_DURATION",
                    "Working hours add up to zero; no hourly wage can be derived",
                    err.to_string(),
                ),
            },
        }
    }
}
