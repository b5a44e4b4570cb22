//! Calculation logic for the payroll engine.
//!
//! Leaf rules (rounding, working hours, the withholding table, statutory
//! deductions, the minimum-wage comparison) are combined by [`calculate_full`]
//! into a full-mode payroll. [`compute_simple`] implements the earlier simple
//! formula generation, and [`calculate`] selects between the two.

mod deduction_table;
mod insurance;
mod minimum_wage;
mod mode;
mod payroll;
mod rounding;
mod simple_mode;
mod work_hours;

pub use deduction_table::{
    ADDITIONAL_CHILD_CREDIT, HIGH_INCOME_THRESHOLD, IncomeTaxResolution, ONE_CHILD_CREDIT,
    REDUCTION_FACTOR, THRESHOLD_WITHHOLDING, TWO_CHILDREN_CREDIT, TaxResolution,
    UnavailableReason, base_withholding, child_tax_credit, high_income_withholding,
    resolve_income_tax,
};
pub use insurance::{
    DeductionsResult, EMPLOYMENT_INSURANCE_RATE, HEALTH_INSURANCE_RATE, LONG_TERM_CARE_RATE,
    PENSION_RATE, RESIDENT_TAX_RATE, calculate_deductions,
};
pub use minimum_wage::{
    MINIMUM_WAGE_MONTHLY_HOURS, MinimumWageResult, check_minimum_wage, non_included_portion,
};
pub use mode::{ComputationMode, PayrollOutcome, calculate};
pub use payroll::{
    FullPayrollResult, MONTHS_PER_YEAR, VALIDATION_TOLERANCE, calculate_full, classify_diff,
    compute_payroll, monthly_pay, taxable_amount, to_whole_won,
};
pub use rounding::{floor_to_step, round_half_up_0, roundup_0, truncate_to_step};
pub use simple_mode::{HOURS_PER_HOLIDAY_HOUR, compute_simple};
pub use work_hours::{OVERTIME_PREMIUM, WEEKS_PER_MONTH, WorkHoursResult, calculate_work_hours};
