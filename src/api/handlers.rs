//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollOutcome, calculate};

use super::request::CalculationRequest;
use super::response::{
    ApiError, ApiErrorResponse, CalculationResponse, DefaultsResponse, TaxTableResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/defaults", get(defaults_handler))
        .route("/tax-table", get(tax_table_handler))
        .route("/tax-table/reload", post(reload_tax_table_handler))
        .with_state(state)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for POST /calculate endpoint.
///
/// Validates the input, computes the payroll in the requested mode against a
/// snapshot of the withholding table and returns the result envelope.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    // Handle JSON parsing errors
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("INVALID_INPUT", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    if let Err(err) = request.input.validate() {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Input validation failed"
        );
        let api_error: ApiErrorResponse = err.into();
        return json_response(api_error.status, api_error.error);
    }

    let tax_table = state.tax_table();
    let start_time = Instant::now();

    match calculate(request.mode, &request.input, &tax_table) {
        Ok(outcome) => {
            let duration = start_time.elapsed();
            match &outcome {
                PayrollOutcome::Full(full) => info!(
                    correlation_id = %correlation_id,
                    mode = "full",
                    monthly_pay = %full.payroll.monthly_pay,
                    net_pay = %full.payroll.net_pay,
                    income_tax_substituted = full.income_tax.substituted_zero,
                    duration_us = duration.as_micros(),
                    "Calculation completed successfully"
                ),
                PayrollOutcome::Simple(simple) => info!(
                    correlation_id = %correlation_id,
                    mode = "simple",
                    total_pay = %simple.total_pay,
                    duration_us = duration.as_micros(),
                    "Calculation completed successfully"
                ),
            }

            let response = CalculationResponse {
                calculation_id: correlation_id,
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                rule_set_version: state.config().metadata().version.clone(),
                mode: outcome.mode(),
                outcome,
            };
            json_response(StatusCode::OK, response)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            let api_error: ApiErrorResponse = err.into();
            json_response(api_error.status, api_error.error)
        }
    }
}

/// Handler for GET /defaults endpoint.
async fn defaults_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(
        StatusCode::OK,
        DefaultsResponse {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            engine: config.metadata().clone(),
            defaults: config.defaults().clone(),
        },
    )
}

/// Handler for GET /tax-table endpoint.
async fn tax_table_handler(State(state): State<AppState>) -> Response {
    let tax_table = state.tax_table();
    json_response(StatusCode::OK, TaxTableResponse::from(tax_table.as_ref()))
}

/// Handler for POST /tax-table/reload endpoint.
///
/// Always answers 200; the body's `ok` flag reports whether the new table
/// is usable.
async fn reload_tax_table_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Reloading withholding table");

    let reloaded = state.reload_tax_table();
    json_response(StatusCode::OK, TaxTableResponse::from(reloaded.as_ref()))
}
