//! Payroll result models.
//!
//! This module contains the [`PayrollResult`] type and the structures that
//! capture every derived line of a monthly payroll calculation: pay
//! components, statutory deductions, the minimum-wage comparison, the internal
//! consistency check and an audit trace of each derivation rule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Outcome of the minimum-wage comparison.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ComplianceVerdict;
///
/// let json = serde_json::to_string(&ComplianceVerdict::NonCompliant).unwrap();
/// assert_eq!(json, "\"non-compliant\"");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceVerdict {
    /// The comparison wage is at or above the minimum wage.
    Compliant,
    /// The comparison wage is below the minimum wage.
    NonCompliant,
    /// There are no standard hours to divide by, so no comparison wage exists.
    Undetermined,
}

/// Classification of the difference between the pay components and the
/// monthly pay target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// The absolute difference is at most one won.
    Normal,
    /// The absolute difference exceeds one won.
    Abnormal,
}

/// The six statutory deduction lines plus the caller's miscellaneous deduction.
///
/// Income tax and resident tax may be negative when the dependent-child
/// credit exceeds the base withholding; they are reported as computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Income tax after the dependent-child credit.
    pub income_tax: Decimal,
    /// Local resident tax (10% of income tax, floored to 10 won).
    pub resident_tax: Decimal,
    /// Taxable amount floored to 1,000 won, the base for the pension.
    pub pension_base: Decimal,
    /// National pension contribution.
    pub national_pension: Decimal,
    /// National health insurance contribution.
    pub health_insurance: Decimal,
    /// Long-term care insurance contribution.
    pub long_term_care: Decimal,
    /// Employment insurance contribution.
    pub employment_insurance: Decimal,
    /// Caller-supplied miscellaneous deduction.
    pub misc_deduction: Decimal,
    /// Sum of all deduction lines.
    pub total: Decimal,
}

/// The minimum-wage compliance comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumWageCheck {
    /// The statutory minimum hourly wage compared against.
    pub minimum_wage: Decimal,
    /// Portion of the minimum monthly wage excluded from the comparison.
    pub non_included_portion: Decimal,
    /// Hourly wage used for the comparison, absent when standard hours are zero.
    pub compare_wage: Option<Decimal>,
    /// The compliance verdict.
    pub verdict: ComplianceVerdict,
}

/// The advisory consistency checks over base pay, overtime pay and allowances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationCheck {
    /// Whether base pay, overtime pay and allowances add up to monthly pay exactly.
    pub check_ok: bool,
    /// `(base + overtime + allowances) - monthly pay`.
    pub diff: Decimal,
    /// Classification of `diff`.
    pub status: ValidationStatus,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a full-mode payroll calculation.
///
/// All money fields are whole won except `hourly_wage` and the minimum-wage
/// `compare_wage`, which keep full decimal precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollResult {
    /// Monthly pay target, `annual_salary / 12` rounded half up.
    pub monthly_pay: Decimal,
    /// Monthly standard hours including weekly paid holiday hours.
    pub standard_hours: Decimal,
    /// Monthly fixed overtime hours before weighting (not rounded).
    pub overtime_hours: Decimal,
    /// Standard hours plus overtime hours weighted at 1.5.
    pub weighted_total_hours: Decimal,
    /// Hourly ordinary wage at full precision.
    pub hourly_wage: Decimal,
    /// Base pay, the residual of monthly pay after overtime and allowances.
    pub base_pay: Decimal,
    /// Fixed overtime pay.
    pub fixed_overtime_pay: Decimal,
    /// Sum of all six allowances.
    pub allowance_sum: Decimal,
    /// Sum of the non-taxable allowances.
    pub non_taxable_sum: Decimal,
    /// Monthly pay minus non-taxable allowances.
    pub taxable_amount: Decimal,
    /// Statutory and miscellaneous deductions.
    pub deductions: Deductions,
    /// Monthly pay minus total deductions.
    pub net_pay: Decimal,
    /// Minimum-wage comparison.
    pub minimum_wage: MinimumWageCheck,
    /// Consistency checks.
    pub validation: ValidationCheck,
    /// Audit trace of every derivation rule, in evaluation order.
    pub audit_steps: Vec<AuditStep>,
}
