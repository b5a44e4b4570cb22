//! Full-mode monthly payroll calculation.
//!
//! Derives hours, hourly wage, base and fixed overtime pay, the minimum-wage
//! comparison, statutory deductions and net pay from a [`PayrollInput`] and an
//! income tax amount. Base pay is the residual of the monthly pay target after
//! overtime pay and allowances, so it may be negative; that is reported, not
//! rejected.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{
    AuditStep, PayrollInput, PayrollResult, TaxTableState, ValidationCheck, ValidationStatus,
};

use super::deduction_table::{IncomeTaxResolution, resolve_income_tax};
use super::insurance::calculate_deductions;
use super::minimum_wage::check_minimum_wage;
use super::rounding::round_half_up_0;
use super::work_hours::{OVERTIME_PREMIUM, calculate_work_hours};

/// Months per year.
pub const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Largest absolute difference, in won, still classified as normal.
pub const VALIDATION_TOLERANCE: Decimal = Decimal::ONE;

/// A full-mode result together with the income tax resolution that fed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullPayrollResult {
    /// How the income tax was resolved.
    pub income_tax: IncomeTaxResolution,
    /// The payroll figures.
    pub payroll: PayrollResult,
}

/// Returns the monthly pay target, `round_half_up_0(annual_salary / 12)`.
pub fn monthly_pay(annual_salary: Decimal) -> Decimal {
    round_half_up_0(annual_salary / MONTHS_PER_YEAR)
}

/// Returns the taxable amount, monthly pay minus non-taxable allowances.
///
/// ```
/// use payroll_engine::calculation::taxable_amount;
/// use payroll_engine::models::{Allowances, PayrollInput};
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     annual_salary: Decimal::from(36_000_000),
///     daily_work_hours: Decimal::from(8),
///     weekly_overtime_hours: Decimal::ZERO,
///     work_days_per_week: 5,
///     minimum_wage: Decimal::from(10_320),
///     min_wage_inclusion_ratio: Decimal::ZERO,
///     allowances: Allowances { meal: Decimal::from(200_000), ..Default::default() },
///     misc_deduction: Decimal::ZERO,
///     dependent_count: 1,
///     children_8_to_20: 0,
/// };
/// assert_eq!(taxable_amount(&input), Decimal::from(2_800_000));
/// ```
pub fn taxable_amount(input: &PayrollInput) -> Decimal {
    monthly_pay(input.annual_salary) - input.non_taxable_sum()
}

/// Converts a won amount to an integer, truncating any fraction and
/// saturating at the `i64` range.
pub fn to_whole_won(amount: Decimal) -> i64 {
    amount.trunc().to_i64().unwrap_or(if amount.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Computes the full-mode payroll for an already resolved income tax.
///
/// # Errors
///
/// Returns [`EngineError::ZeroDuration`](crate::error::EngineError::ZeroDuration)
/// when standard hours plus weighted overtime hours is zero. No other input
/// is rejected.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     annual_salary: Decimal::from(36_000_000),
///     daily_work_hours: Decimal::from(8),
///     weekly_overtime_hours: Decimal::from(9),
///     work_days_per_week: 5,
///     minimum_wage: Decimal::from(10_320),
///     min_wage_inclusion_ratio: Decimal::ZERO,
///     allowances: Default::default(),
///     misc_deduction: Decimal::ZERO,
///     dependent_count: 1,
///     children_8_to_20: 0,
/// };
///
/// let result = compute_payroll(&input, Decimal::from(112_950)).unwrap();
/// assert_eq!(result.monthly_pay, Decimal::from(3_000_000));
/// assert_eq!(result.fixed_overtime_pay, Decimal::from(657_454));
/// assert_eq!(result.base_pay, Decimal::from(2_342_546));
/// assert_eq!(result.net_pay, Decimal::from(2_593_640));
/// ```
pub fn compute_payroll(input: &PayrollInput, income_tax: Decimal) -> EngineResult<PayrollResult> {
    let (payroll, ()) = build_payroll(input, |taxable_amount, step_number| {
        let audit_step = AuditStep {
            step_number,
            rule_id: "income_tax_supplied".to_string(),
            rule_name: "Income Tax Supplied".to_string(),
            input: serde_json::json!({
                "taxable_amount": taxable_amount.normalize().to_string()
            }),
            output: serde_json::json!({
                "income_tax": income_tax.normalize().to_string()
            }),
            reasoning: format!(
                "Income tax {} supplied by the caller for taxable amount {}",
                income_tax.normalize(),
                taxable_amount.normalize()
            ),
        };
        (income_tax, audit_step, ())
    })?;
    Ok(payroll)
}

/// Runs the complete full-mode flow: taxable amount, income tax resolution
/// against `table`, then the payroll calculation.
///
/// An unavailable table does not fail the calculation; the income tax is
/// resolved with a zero base withholding and the substitution is recorded
/// in [`FullPayrollResult::income_tax`].
pub fn calculate_full(
    input: &PayrollInput,
    table: &TaxTableState,
) -> EngineResult<FullPayrollResult> {
    let (payroll, income_tax) = build_payroll(input, |taxable_amount, step_number| {
        let resolution = resolve_income_tax(
            to_whole_won(taxable_amount),
            input.dependent_count,
            input.children_8_to_20,
            table,
            step_number,
        );
        (resolution.income_tax, resolution.audit_step.clone(), resolution)
    })?;

    Ok(FullPayrollResult {
        income_tax,
        payroll,
    })
}

/// Shared calculation body. `income_tax` receives the taxable amount and
/// the audit step number and returns the tax, its audit step and any extra
/// record the caller wants back.
fn build_payroll<T>(
    input: &PayrollInput,
    income_tax: impl FnOnce(Decimal, u32) -> (Decimal, AuditStep, T),
) -> EngineResult<(PayrollResult, T)> {
    let mut audit_steps = Vec::new();
    let mut step_number: u32 = 1;

    // Hours
    let hours = calculate_work_hours(
        input.daily_work_hours,
        input.work_days_per_week,
        input.weekly_overtime_hours,
        step_number,
    )?;
    audit_steps.push(hours.audit_step);
    step_number += 1;

    // Monthly pay and hourly wage
    let monthly_pay = monthly_pay(input.annual_salary);
    let hourly_wage = monthly_pay / hours.weighted_total_hours;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "hourly_wage".to_string(),
        rule_name: "Monthly Pay and Hourly Wage".to_string(),
        input: serde_json::json!({
            "annual_salary": input.annual_salary.normalize().to_string(),
            "weighted_total_hours": hours.weighted_total_hours.normalize().to_string()
        }),
        output: serde_json::json!({
            "monthly_pay": monthly_pay.normalize().to_string(),
            "hourly_wage": hourly_wage.normalize().to_string()
        }),
        reasoning: format!(
            "{} / 12 rounded half up = {}; {} / {} hours = {} per hour",
            input.annual_salary.normalize(),
            monthly_pay.normalize(),
            monthly_pay.normalize(),
            hours.weighted_total_hours.normalize(),
            hourly_wage.round_dp(2)
        ),
    });
    step_number += 1;

    // Fixed overtime pay and residual base pay
    let fixed_overtime_pay =
        round_half_up_0(hours.overtime_hours * hourly_wage * OVERTIME_PREMIUM);
    let allowance_sum = input.allowance_sum();
    let base_pay = monthly_pay - (fixed_overtime_pay + allowance_sum);
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "pay_components".to_string(),
        rule_name: "Base and Fixed Overtime Pay".to_string(),
        input: serde_json::json!({
            "overtime_hours": hours.overtime_hours.normalize().to_string(),
            "allowance_sum": allowance_sum.normalize().to_string()
        }),
        output: serde_json::json!({
            "fixed_overtime_pay": fixed_overtime_pay.normalize().to_string(),
            "base_pay": base_pay.normalize().to_string()
        }),
        reasoning: format!(
            "{} overtime hours × {} × {} rounded half up = {}; base pay {} - ({} + {}) = {}",
            hours.overtime_hours.normalize(),
            hourly_wage.round_dp(2),
            OVERTIME_PREMIUM,
            fixed_overtime_pay.normalize(),
            monthly_pay.normalize(),
            fixed_overtime_pay.normalize(),
            allowance_sum.normalize(),
            base_pay.normalize()
        ),
    });
    step_number += 1;

    // Minimum wage
    let non_taxable_sum = input.non_taxable_sum();
    let minimum_wage = check_minimum_wage(
        base_pay,
        non_taxable_sum,
        hours.standard_hours,
        input.minimum_wage,
        input.min_wage_inclusion_ratio,
        step_number,
    );
    audit_steps.push(minimum_wage.audit_step);
    step_number += 1;

    // Income tax
    let taxable_amount = monthly_pay - non_taxable_sum;
    let (income_tax, tax_step, extra) = income_tax(taxable_amount, step_number);
    audit_steps.push(tax_step);
    step_number += 1;

    // Deductions and net pay
    let deductions = calculate_deductions(
        taxable_amount,
        income_tax,
        input.misc_deduction,
        step_number,
    );
    audit_steps.push(deductions.audit_step);
    step_number += 1;

    let net_pay = monthly_pay - deductions.deductions.total;

    // Consistency
    let components = base_pay + fixed_overtime_pay + allowance_sum;
    let diff = components - monthly_pay;
    let validation = ValidationCheck {
        check_ok: components == monthly_pay,
        diff,
        status: classify_diff(diff),
    };
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "consistency_check".to_string(),
        rule_name: "Consistency Check".to_string(),
        input: serde_json::json!({
            "components": components.normalize().to_string(),
            "monthly_pay": monthly_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "check_ok": validation.check_ok,
            "diff": diff.normalize().to_string(),
            "status": validation.status
        }),
        reasoning: format!(
            "Base + overtime + allowances {} vs monthly pay {}: difference {}, net pay {}",
            components.normalize(),
            monthly_pay.normalize(),
            diff.normalize(),
            net_pay.normalize()
        ),
    });

    let payroll = PayrollResult {
        monthly_pay,
        standard_hours: hours.standard_hours,
        overtime_hours: hours.overtime_hours,
        weighted_total_hours: hours.weighted_total_hours,
        hourly_wage,
        base_pay,
        fixed_overtime_pay,
        allowance_sum,
        non_taxable_sum,
        taxable_amount,
        deductions: deductions.deductions,
        net_pay,
        minimum_wage: minimum_wage.check,
        validation,
        audit_steps,
    };

    Ok((payroll, extra))
}

/// Classifies a difference against [`VALIDATION_TOLERANCE`].
pub fn classify_diff(diff: Decimal) -> ValidationStatus {
    if diff.abs() <= VALIDATION_TOLERANCE {
        ValidationStatus::Normal
    } else {
        ValidationStatus::Abnormal
    }
}
