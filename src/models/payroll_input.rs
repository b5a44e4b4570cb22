//! Payroll input model.
//!
//! This module defines the [`PayrollInput`] struct holding the scalar inputs
//! for a single monthly payroll calculation, and the [`Allowances`] it carries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Monthly allowance amounts in won.
///
/// Meal, car and childcare allowances are non-taxable; duty, grade and
/// miscellaneous allowances are taxable. Every field defaults to zero.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Allowances;
/// use rust_decimal::Decimal;
///
/// let allowances = Allowances {
///     meal: Decimal::from(200_000),
///     duty: Decimal::from(50_000),
///     ..Default::default()
/// };
/// assert_eq!(allowances.non_taxable_sum(), Decimal::from(200_000));
/// assert_eq!(allowances.total(), Decimal::from(250_000));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowances {
    /// Meal allowance (non-taxable).
    #[serde(default)]
    pub meal: Decimal,
    /// Private-car driving allowance (non-taxable).
    #[serde(default)]
    pub car: Decimal,
    /// Childcare allowance (non-taxable).
    #[serde(default)]
    pub child: Decimal,
    /// Duty allowance (taxable).
    #[serde(default)]
    pub duty: Decimal,
    /// Grade allowance (taxable).
    #[serde(default)]
    pub grade: Decimal,
    /// Miscellaneous allowance (taxable).
    #[serde(default)]
    pub misc: Decimal,
}

impl Allowances {
    /// Sum of the non-taxable allowances (meal, car, child).
    pub fn non_taxable_sum(&self) -> Decimal {
        self.meal + self.car + self.child
    }

    /// Sum of the taxable allowances (duty, grade, misc).
    pub fn taxable_sum(&self) -> Decimal {
        self.duty + self.grade + self.misc
    }

    /// Sum of all six allowances.
    pub fn total(&self) -> Decimal {
        self.non_taxable_sum() + self.taxable_sum()
    }

    fn fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("allowances.meal", self.meal),
            ("allowances.car", self.car),
            ("allowances.child", self.child),
            ("allowances.duty", self.duty),
            ("allowances.grade", self.grade),
            ("allowances.misc", self.misc),
        ]
    }
}

/// Largest accepted money amount in won (one trillion).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Largest accepted contractual hours per day.
pub const MAX_DAILY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Largest accepted fixed overtime hours per week.
pub const MAX_WEEKLY_OVERTIME_HOURS: Decimal = Decimal::from_parts(168, 0, 0, false, 0);

/// Largest accepted number of working days per week.
pub const MAX_WORK_DAYS_PER_WEEK: u32 = 7;

/// Hours are accepted to the hundredth of an hour.
const HOURS_SCALE: u32 = 2;

fn invalid(field: &str, message: String) -> EngineError {
    EngineError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn check_non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

fn check_amount(field: &str, value: Decimal) -> EngineResult<()> {
    check_non_negative(field, value)?;
    if !value.fract().is_zero() {
        return Err(invalid(field, format!("must be a whole number of won, got {}", value)));
    }
    if value > MAX_AMOUNT {
        return Err(invalid(field, format!("must not exceed {}, got {}", MAX_AMOUNT, value)));
    }
    Ok(())
}

fn check_hours(field: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    check_non_negative(field, value)?;
    if value.normalize().scale() > HOURS_SCALE {
        return Err(invalid(
            field,
            format!("must have at most {} decimal places, got {}", HOURS_SCALE, value),
        ));
    }
    if value > max {
        return Err(invalid(field, format!("must not exceed {}, got {}", max, value)));
    }
    Ok(())
}

fn default_dependent_count() -> u32 {
    1
}

/// The scalar inputs for one monthly payroll calculation.
///
/// Amounts are in won, hours are decimal hours (half-hour steps are typical
/// but not enforced). Counts are unsigned so they are integral by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Annual salary.
    pub annual_salary: Decimal,
    /// Contractual working hours per day.
    pub daily_work_hours: Decimal,
    /// Fixed overtime hours per week included in the salary.
    pub weekly_overtime_hours: Decimal,
    /// Working days per week.
    pub work_days_per_week: u32,
    /// Statutory minimum hourly wage.
    pub minimum_wage: Decimal,
    /// Share of the minimum monthly wage excluded from the compliance
    /// comparison when non-taxable allowances are paid, in `[0, 1]`.
    #[serde(default)]
    pub min_wage_inclusion_ratio: Decimal,
    /// Monthly allowances.
    #[serde(default)]
    pub allowances: Allowances,
    /// Miscellaneous deduction withheld from net pay.
    #[serde(default)]
    pub misc_deduction: Decimal,
    /// Number of dependents including the employee.
    #[serde(default = "default_dependent_count")]
    pub dependent_count: u32,
    /// Number of dependents aged 8 to 20.
    #[serde(default)]
    pub children_8_to_20: u32,
}

impl PayrollInput {
    /// Sum of the non-taxable allowances.
    pub fn non_taxable_sum(&self) -> Decimal {
        self.allowances.non_taxable_sum()
    }

    /// Sum of all allowances.
    pub fn allowance_sum(&self) -> Decimal {
        self.allowances.total()
    }

    /// Checks the input the way the collection form constrains it.
    ///
    /// Money amounts must be whole won in `[0, MAX_AMOUNT]`. Hours must be
    /// non-negative with at most two decimal places, daily hours at most 24
    /// and weekly overtime at most 168. The inclusion ratio must lie in
    /// `[0, 1]` and the week must have between 1 and 7 working days.
    /// Within these bounds no calculation step can overflow.
    /// The calculator itself does not call this; it is applied by whoever
    /// collects the input before a calculation is requested.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollInput;
    /// use rust_decimal::Decimal;
    ///
    /// let mut input = PayrollInput {
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
    /// assert!(input.validate().is_ok());
    ///
    /// input.annual_salary = Decimal::from(-1);
    /// assert!(input.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        let amounts = [
            ("annual_salary", self.annual_salary),
            ("minimum_wage", self.minimum_wage),
            ("misc_deduction", self.misc_deduction),
        ];
        for (field, value) in amounts.into_iter().chain(self.allowances.fields()) {
            check_amount(field, value)?;
        }

        check_hours("daily_work_hours", self.daily_work_hours, MAX_DAILY_HOURS)?;
        check_hours(
            "weekly_overtime_hours",
            self.weekly_overtime_hours,
            MAX_WEEKLY_OVERTIME_HOURS,
        )?;

        check_non_negative("min_wage_inclusion_ratio", self.min_wage_inclusion_ratio)?;
        if self.min_wage_inclusion_ratio > Decimal::ONE {
            return Err(invalid(
                "min_wage_inclusion_ratio",
                format!(
                    "must be between 0 and 1, got {}",
                    self.min_wage_inclusion_ratio
                ),
            ));
        }

        if self.work_days_per_week == 0 || self.work_days_per_week > MAX_WORK_DAYS_PER_WEEK {
            return Err(invalid(
                "work_days_per_week",
                format!(
                    "must be between 1 and {}, got {}",
                    MAX_WORK_DAYS_PER_WEEK, self.work_days_per_week
                ),
            ));
        }

        Ok(())
    }
}
