//! The simple formula generation.
//!
//! Works from weekly hours with one paid holiday hour per five working hours,
//! rounds monthly hours and pay up, and derives a single blended hourly rate
//! after meal and car allowances are taken out of the monthly salary. There is
//! no deduction stage.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ComplianceVerdict, SimplePayrollInput, SimplePayrollResult};

use super::payroll::{MONTHS_PER_YEAR, classify_diff};
use super::rounding::roundup_0;
use super::work_hours::{OVERTIME_PREMIUM, WEEKS_PER_MONTH};

/// Working hours that earn one paid holiday hour.
pub const HOURS_PER_HOLIDAY_HOUR: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Computes a simple-mode payroll.
///
/// # Errors
///
/// Returns [`EngineError::ZeroDuration`] when the rounded monthly standard
/// hours plus weighted overtime hours is zero.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_simple;
/// use payroll_engine::models::SimplePayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = SimplePayrollInput {
///     annual_salary: Decimal::from(36_000_000),
///     weekly_work_hours: Decimal::from(40),
///     weekly_overtime_hours: Decimal::from(9),
///     minimum_wage: Decimal::from(10_320),
///     meal_allowance: Decimal::ZERO,
///     car_allowance: Decimal::ZERO,
/// };
///
/// let result = compute_simple(&input).unwrap();
/// assert_eq!(result.monthly_standard_hours, Decimal::from(209));
/// assert_eq!(result.monthly_overtime_hours, Decimal::from(40));
/// assert_eq!(result.total_pay, Decimal::from(3_000_001));
/// ```
pub fn compute_simple(input: &SimplePayrollInput) -> EngineResult<SimplePayrollResult> {
    let mut audit_steps = Vec::new();

    let weekly_holiday_hours = input.weekly_work_hours / HOURS_PER_HOLIDAY_HOUR;
    let weekly_paid_hours = input.weekly_work_hours + weekly_holiday_hours;
    let monthly_standard_hours = roundup_0(weekly_paid_hours * WEEKS_PER_MONTH);
    let monthly_overtime_hours = roundup_0(input.weekly_overtime_hours * WEEKS_PER_MONTH);
    let weighted_overtime_hours = monthly_overtime_hours * OVERTIME_PREMIUM;
    let denominator = monthly_standard_hours + weighted_overtime_hours;

    if denominator.is_zero() {
        return Err(EngineError::ZeroDuration {
            standard_hours: monthly_standard_hours,
            weighted_overtime_hours,
        });
    }

    audit_steps.push(AuditStep {
        step_number: 1,
        rule_id: "simple_work_hours".to_string(),
        rule_name: "Monthly Work Hours (Simple)".to_string(),
        input: serde_json::json!({
            "weekly_work_hours": input.weekly_work_hours.normalize().to_string(),
            "weekly_overtime_hours": input.weekly_overtime_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "weekly_holiday_hours": weekly_holiday_hours.normalize().to_string(),
            "monthly_standard_hours": monthly_standard_hours.normalize().to_string(),
            "monthly_overtime_hours": monthly_overtime_hours.normalize().to_string()
        }),
        reasoning: format!(
            "({} + {} holiday) × {} rounded up = {} standard hours; {} × {} rounded up = {} overtime hours",
            input.weekly_work_hours.normalize(),
            weekly_holiday_hours.normalize(),
            WEEKS_PER_MONTH,
            monthly_standard_hours.normalize(),
            input.weekly_overtime_hours.normalize(),
            WEEKS_PER_MONTH,
            monthly_overtime_hours.normalize()
        ),
    });

    let monthly_salary = input.annual_salary / MONTHS_PER_YEAR;
    let allowances = input.meal_allowance + input.car_allowance;
    let hourly_wage = (monthly_salary - allowances) / denominator;

    audit_steps.push(AuditStep {
        step_number: 2,
        rule_id: "simple_hourly_wage".to_string(),
        rule_name: "Blended Hourly Wage".to_string(),
        input: serde_json::json!({
            "monthly_salary": monthly_salary.normalize().to_string(),
            "allowances": allowances.normalize().to_string(),
            "denominator": denominator.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        reasoning: format!(
            "({} - {}) / {} hours = {} per hour",
            monthly_salary.round_dp(2),
            allowances.normalize(),
            denominator.normalize(),
            hourly_wage.round_dp(2)
        ),
    });

    let base_pay = roundup_0(hourly_wage * monthly_standard_hours);
    let fixed_overtime_pay = roundup_0(hourly_wage * weighted_overtime_hours);
    let total_pay = base_pay + fixed_overtime_pay + allowances;
    let diff = total_pay - monthly_salary;
    let validation_status = classify_diff(diff);

    audit_steps.push(AuditStep {
        step_number: 3,
        rule_id: "simple_pay_components".to_string(),
        rule_name: "Base and Fixed Overtime Pay (Simple)".to_string(),
        input: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string(),
            "monthly_standard_hours": monthly_standard_hours.normalize().to_string(),
            "weighted_overtime_hours": weighted_overtime_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "base_pay": base_pay.normalize().to_string(),
            "fixed_overtime_pay": fixed_overtime_pay.normalize().to_string(),
            "total_pay": total_pay.normalize().to_string(),
            "diff": diff.normalize().to_string(),
            "status": validation_status
        }),
        reasoning: format!(
            "Base {} + overtime {} + allowances {} = {}, {} against the monthly salary",
            base_pay.normalize(),
            fixed_overtime_pay.normalize(),
            allowances.normalize(),
            total_pay.normalize(),
            diff.round_dp(2)
        ),
    });

    let min_wage_verdict = if hourly_wage >= input.minimum_wage {
        ComplianceVerdict::Compliant
    } else {
        ComplianceVerdict::NonCompliant
    };

    audit_steps.push(AuditStep {
        step_number: 4,
        rule_id: "simple_minimum_wage".to_string(),
        rule_name: "Minimum Wage Check (Simple)".to_string(),
        input: serde_json::json!({
            "hourly_wage": hourly_wage.normalize().to_string(),
            "minimum_wage": input.minimum_wage.normalize().to_string()
        }),
        output: serde_json::json!({
            "verdict": min_wage_verdict
        }),
        reasoning: format!(
            "Blended rate {} compared with minimum wage {}",
            hourly_wage.round_dp(2),
            input.minimum_wage.normalize()
        ),
    });

    Ok(SimplePayrollResult {
        weekly_holiday_hours,
        weekly_paid_hours,
        monthly_standard_hours,
        monthly_overtime_hours,
        monthly_salary,
        hourly_wage,
        base_pay,
        fixed_overtime_pay,
        meal_allowance: input.meal_allowance,
        car_allowance: input.car_allowance,
        total_pay,
        diff,
        min_wage_verdict,
        validation_status,
        audit_steps,
    })
}
