//! Minimum-wage compliance comparison.
//!
//! The comparison wage is base pay plus non-taxable allowances per standard
//! hour. When non-taxable allowances are paid, a prorated slice of the
//! statutory minimum monthly wage (the non-included portion) is taken out
//! before dividing.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, ComplianceVerdict, MinimumWageCheck};

use super::rounding::round_half_up_0;

/// Monthly hours of the statutory minimum monthly wage.
pub const MINIMUM_WAGE_MONTHLY_HOURS: Decimal = Decimal::from_parts(209, 0, 0, false, 0);

/// The minimum-wage check and the audit step documenting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageResult {
    /// The comparison outcome.
    pub check: MinimumWageCheck,
    /// The audit step recording the comparison.
    pub audit_step: AuditStep,
}

/// Returns `round_half_up_0(minimum_wage × 209 × inclusion_ratio)`.
///
/// ```
/// use payroll_engine::calculation::non_included_portion;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let portion = non_included_portion(Decimal::from(10_320), Decimal::from_str("0.5").unwrap());
/// assert_eq!(portion, Decimal::from(1_078_440));
/// ```
pub fn non_included_portion(minimum_wage: Decimal, inclusion_ratio: Decimal) -> Decimal {
    round_half_up_0(minimum_wage * MINIMUM_WAGE_MONTHLY_HOURS * inclusion_ratio)
}

/// Compares the effective hourly wage with the minimum wage.
///
/// With `non_taxable_sum > 0` the comparison wage is
/// `(base_pay + non_taxable_sum - non_included_portion) / standard_hours`,
/// otherwise `(base_pay + non_taxable_sum) / standard_hours`. The verdict is
/// compliant when the comparison wage is at least the minimum wage. With zero
/// standard hours there is no comparison wage and the verdict is
/// [`ComplianceVerdict::Undetermined`].
pub fn check_minimum_wage(
    base_pay: Decimal,
    non_taxable_sum: Decimal,
    standard_hours: Decimal,
    minimum_wage: Decimal,
    inclusion_ratio: Decimal,
    step_number: u32,
) -> MinimumWageResult {
    let portion = non_included_portion(minimum_wage, inclusion_ratio);
    let numerator = if non_taxable_sum > Decimal::ZERO {
        base_pay + non_taxable_sum - portion
    } else {
        base_pay + non_taxable_sum
    };

    let compare_wage = if standard_hours.is_zero() {
        None
    } else {
        Some(numerator / standard_hours)
    };

    let verdict = match compare_wage {
        Some(wage) if wage >= minimum_wage => ComplianceVerdict::Compliant,
        Some(_) => ComplianceVerdict::NonCompliant,
        None => ComplianceVerdict::Undetermined,
    };

    let reasoning = match compare_wage {
        Some(wage) => format!(
            "{} / {} standard hours = {} compared with minimum wage {}: {:?}",
            numerator.normalize(),
            standard_hours.normalize(),
            round_half_up_0(wage),
            minimum_wage.normalize(),
            verdict
        ),
        None => "No standard hours, minimum wage comparison undetermined".to_string(),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "minimum_wage_check".to_string(),
        rule_name: "Minimum Wage Check".to_string(),
        input: serde_json::json!({
            "base_pay": base_pay.normalize().to_string(),
            "non_taxable_sum": non_taxable_sum.normalize().to_string(),
            "standard_hours": standard_hours.normalize().to_string(),
            "minimum_wage": minimum_wage.normalize().to_string(),
            "inclusion_ratio": inclusion_ratio.normalize().to_string()
        }),
        output: serde_json::json!({
            "non_included_portion": portion.normalize().to_string(),
            "compare_wage": compare_wage.map(|wage| wage.normalize().to_string()),
            "verdict": verdict
        }),
        reasoning,
    };

    MinimumWageResult {
        check: MinimumWageCheck {
            minimum_wage,
            non_included_portion: portion,
            compare_wage,
            verdict,
        },
        audit_step,
    }
}
