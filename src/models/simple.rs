//! Models for the simple formula generation.
//!
//! The simple generation works from weekly hours and a single blended hourly
//! rate, rounds every hour and pay figure up, and has no deduction stage.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, ComplianceVerdict, PayrollInput, ValidationStatus};

/// Inputs known to the simple formula generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePayrollInput {
    /// Annual salary.
    pub annual_salary: Decimal,
    /// Contractual working hours per week.
    pub weekly_work_hours: Decimal,
    /// Fixed overtime hours per week.
    pub weekly_overtime_hours: Decimal,
    /// Statutory minimum hourly wage.
    pub minimum_wage: Decimal,
    /// Meal allowance.
    #[serde(default)]
    pub meal_allowance: Decimal,
    /// Private-car driving allowance.
    #[serde(default)]
    pub car_allowance: Decimal,
}

impl From<&PayrollInput> for SimplePayrollInput {
    /// Weekly hours are daily hours times working days; fields the simple
    /// generation has no concept of are dropped.
    fn from(input: &PayrollInput) -> Self {
        Self {
            annual_salary: input.annual_salary,
            weekly_work_hours: input.daily_work_hours * Decimal::from(input.work_days_per_week),
            weekly_overtime_hours: input.weekly_overtime_hours,
            minimum_wage: input.minimum_wage,
            meal_allowance: input.allowances.meal,
            car_allowance: input.allowances.car,
        }
    }
}

/// The result of a simple-mode calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplePayrollResult {
    /// Weekly paid holiday hours, one fifth of weekly hours.
    pub weekly_holiday_hours: Decimal,
    /// Weekly hours plus paid holiday hours.
    pub weekly_paid_hours: Decimal,
    /// Monthly standard hours, rounded up.
    pub monthly_standard_hours: Decimal,
    /// Monthly overtime hours, rounded up.
    pub monthly_overtime_hours: Decimal,
    /// Monthly salary, `annual_salary / 12` unrounded.
    pub monthly_salary: Decimal,
    /// Blended hourly rate at full precision.
    pub hourly_wage: Decimal,
    /// Base pay, rounded up.
    pub base_pay: Decimal,
    /// Fixed overtime pay, rounded up.
    pub fixed_overtime_pay: Decimal,
    /// Meal allowance as paid.
    pub meal_allowance: Decimal,
    /// Car allowance as paid.
    pub car_allowance: Decimal,
    /// Base pay plus overtime pay plus allowances.
    pub total_pay: Decimal,
    /// `total_pay - monthly_salary`.
    pub diff: Decimal,
    /// Hourly rate compared with the minimum wage.
    pub min_wage_verdict: ComplianceVerdict,
    /// Classification of `diff`.
    pub validation_status: ValidationStatus,
    /// Audit trace of every derivation rule, in evaluation order.
    pub audit_steps: Vec<AuditStep>,
}
