//! Statutory deductions other than income tax.
//!
//! Resident tax follows from income tax; the four social insurance
//! contributions follow from the taxable amount. Every line is floored to
//! 10 won, and the pension base is first floored to 1,000 won.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, Deductions};

use super::rounding::floor_to_step;

/// Local resident tax as a share of income tax.
pub const RESIDENT_TAX_RATE: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// National pension employee contribution rate.
pub const PENSION_RATE: Decimal = Decimal::from_parts(45, 0, 0, false, 3);

/// National health insurance employee contribution rate.
pub const HEALTH_INSURANCE_RATE: Decimal = Decimal::from_parts(3545, 0, 0, false, 5);

/// Long-term care insurance as a share of the health insurance contribution.
pub const LONG_TERM_CARE_RATE: Decimal = Decimal::from_parts(1295, 0, 0, false, 4);

/// Employment insurance employee contribution rate.
pub const EMPLOYMENT_INSURANCE_RATE: Decimal = Decimal::from_parts(9, 0, 0, false, 3);

const TEN_WON: Decimal = Decimal::TEN;
const THOUSAND_WON: Decimal = Decimal::ONE_THOUSAND;

/// The deduction lines and the audit step documenting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsResult {
    /// The computed deductions.
    pub deductions: Deductions,
    /// The audit step recording the derivation.
    pub audit_step: AuditStep,
}

/// Computes resident tax, social insurance and the deduction total.
///
/// - resident tax = `floor_to_step(income_tax × 0.1, 10)`, applied even when
///   income tax is negative
/// - pension = `floor_to_step(floor_to_step(taxable, 1000) × 0.045, 10)`
/// - health = `floor_to_step(taxable × 0.03545, 10)`
/// - long-term care = `floor_to_step(health × 0.1295, 10)`
/// - employment = `floor_to_step(taxable × 0.009, 10)`
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use rust_decimal::Decimal;
///
/// let result = calculate_deductions(
///     Decimal::from(3_000_000),
///     Decimal::from(112_950),
///     Decimal::ZERO,
///     1,
/// );
/// let d = result.deductions;
/// assert_eq!(d.resident_tax, Decimal::from(11_290));
/// assert_eq!(d.national_pension, Decimal::from(135_000));
/// assert_eq!(d.health_insurance, Decimal::from(106_350));
/// assert_eq!(d.long_term_care, Decimal::from(13_770));
/// assert_eq!(d.employment_insurance, Decimal::from(27_000));
/// assert_eq!(d.total, Decimal::from(406_360));
/// ```
pub fn calculate_deductions(
    taxable_amount: Decimal,
    income_tax: Decimal,
    misc_deduction: Decimal,
    step_number: u32,
) -> DeductionsResult {
    let resident_tax = floor_to_step(income_tax * RESIDENT_TAX_RATE, TEN_WON);
    let pension_base = floor_to_step(taxable_amount, THOUSAND_WON);
    let national_pension = floor_to_step(pension_base * PENSION_RATE, TEN_WON);
    let health_insurance = floor_to_step(taxable_amount * HEALTH_INSURANCE_RATE, TEN_WON);
    let long_term_care = floor_to_step(health_insurance * LONG_TERM_CARE_RATE, TEN_WON);
    let employment_insurance = floor_to_step(taxable_amount * EMPLOYMENT_INSURANCE_RATE, TEN_WON);

    let total = income_tax
        + resident_tax
        + national_pension
        + health_insurance
        + long_term_care
        + employment_insurance
        + misc_deduction;

    let deductions = Deductions {
        income_tax,
        resident_tax,
        pension_base,
        national_pension,
        health_insurance,
        long_term_care,
        employment_insurance,
        misc_deduction,
        total,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "statutory_deductions".to_string(),
        rule_name: "Statutory Deductions".to_string(),
        input: serde_json::json!({
            "taxable_amount": taxable_amount.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string(),
            "misc_deduction": misc_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "resident_tax": resident_tax.normalize().to_string(),
            "pension_base": pension_base.normalize().to_string(),
            "national_pension": national_pension.normalize().to_string(),
            "health_insurance": health_insurance.normalize().to_string(),
            "long_term_care": long_term_care.normalize().to_string(),
            "employment_insurance": employment_insurance.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "Income tax {} + resident tax {} + pension {} + health {} + care {} + employment {} + misc {} = {}",
            income_tax.normalize(),
            resident_tax.normalize(),
            national_pension.normalize(),
            health_insurance.normalize(),
            long_term_care.normalize(),
            employment_insurance.normalize(),
            misc_deduction.normalize(),
            total.normalize()
        ),
    };

    DeductionsResult {
        deductions,
        audit_step,
    }
}
