//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod payroll_input;
mod payroll_result;
mod simple;
mod tax_table;

pub use payroll_input::{
    Allowances, MAX_AMOUNT, MAX_DAILY_HOURS, MAX_WEEKLY_OVERTIME_HOURS, MAX_WORK_DAYS_PER_WEEK,
    PayrollInput,
};
pub use payroll_result::{
    AuditStep, ComplianceVerdict, Deductions, MinimumWageCheck, PayrollResult, ValidationCheck,
    ValidationStatus,
};
pub use simple::{SimplePayrollInput, SimplePayrollResult};
pub use tax_table::{
    BracketLookup, BracketRow, DEPENDENT_COLUMNS, TableLoadStatus, TaxTable, TaxTableState,
    clamp_dependents,
};
