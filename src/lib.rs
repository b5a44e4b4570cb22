//! Korean monthly payroll engine.
//!
//! Computes the monthly pay breakdown of a salaried employee on a fixed
//! overtime contract: standard and overtime hours, hourly wage, base pay,
//! fixed overtime pay, the minimum-wage comparison, withholding income tax
//! from the simplified table, statutory social insurance and net pay.
//!
//! Two formula generations are available through
//! [`calculation::calculate`]: the full generation with half-up rounding and
//! the deduction stack, and the earlier simple generation with round-up
//! rounding and no deductions.
//!
//! # Example
//!
//! ```
//! use payroll_engine::calculation::{ComputationMode, PayrollOutcome, calculate};
//! use payroll_engine::models::{PayrollInput, TaxTableState};
//! use rust_decimal::Decimal;
//!
//! let input = PayrollInput {
//!     annual_salary: Decimal::from(36_000_000),
//!     daily_work_hours: Decimal::from(8),
//!     weekly_overtime_hours: Decimal::from(9),
//!     work_days_per_week: 5,
//!     minimum_wage: Decimal::from(10_320),
//!     min_wage_inclusion_ratio: Decimal::ZERO,
//!     allowances: Default::default(),
//!     misc_deduction: Decimal::ZERO,
//!     dependent_count: 1,
//!     children_8_to_20: 0,
//! };
//! let table = TaxTableState::Unavailable { message: "not loaded".to_string() };
//!
//! let outcome = calculate(ComputationMode::Full, &input, &table).unwrap();
//! if let PayrollOutcome::Full(full) = outcome {
//!     assert_eq!(full.payroll.monthly_pay, Decimal::from(3_000_000));
//!     assert!(full.income_tax.substituted_zero);
//! }
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
