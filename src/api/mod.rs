//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating monthly
//! payroll, reading the form defaults and inspecting or reloading the
//! withholding table.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, DefaultsResponse, TaxTableResponse,
};
pub use state::AppState;
