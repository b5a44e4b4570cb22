//! Monthly working-hour derivation.
//!
//! Converts a weekly schedule into month-equivalent hours using the fixed
//! weeks-per-month factor, and produces the weighted hour denominator from
//! which the hourly wage is derived.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::rounding::round_half_up_0;

/// Average number of weeks in a month (365 / 7 / 12, as published).
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(4345, 0, 0, false, 3);

/// Premium multiplier for overtime hours.
pub const OVERTIME_PREMIUM: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Monthly hour figures derived from the weekly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkHoursResult {
    /// Monthly standard hours including one paid holiday day per week, rounded half up.
    pub standard_hours: Decimal,
    /// Monthly overtime hours, not rounded.
    pub overtime_hours: Decimal,
    /// Standard hours plus overtime hours weighted by the premium.
    pub weighted_total_hours: Decimal,
    /// The audit step recording the derivation.
    pub audit_step: AuditStep,
}

/// Derives monthly standard, overtime and weighted hours.
///
/// Standard hours count the working days plus one paid weekly holiday day:
/// `round_half_up_0((daily × days + daily) × 4.345)`. Overtime hours are
/// `weekly_overtime × 4.345` and stay unrounded. The weighted total adds
/// `weekly_overtime × 1.5 × 4.345` to the standard hours.
///
/// # Errors
///
/// Returns [`EngineError::ZeroDuration`] when the weighted total is zero,
/// since no hourly wage can be derived from it.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_work_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = calculate_work_hours(Decimal::from(8), 5, Decimal::from(9), 1).unwrap();
/// assert_eq!(hours.standard_hours, Decimal::from(209));
/// assert_eq!(hours.overtime_hours, Decimal::from_str("39.105").unwrap());
/// assert_eq!(hours.weighted_total_hours, Decimal::from_str("267.6575").unwrap());
/// ```
pub fn calculate_work_hours(
    daily_work_hours: Decimal,
    work_days_per_week: u32,
    weekly_overtime_hours: Decimal,
    step_number: u32,
) -> EngineResult<WorkHoursResult> {
    let weekly_paid_hours =
        daily_work_hours * Decimal::from(work_days_per_week) + daily_work_hours;
    let standard_hours = round_half_up_0(weekly_paid_hours * WEEKS_PER_MONTH);
    let overtime_hours = weekly_overtime_hours * WEEKS_PER_MONTH;
    let weighted_overtime_hours = weekly_overtime_hours * OVERTIME_PREMIUM * WEEKS_PER_MONTH;
    let weighted_total_hours = standard_hours + weighted_overtime_hours;

    if weighted_total_hours.is_zero() {
        return Err(EngineError::ZeroDuration {
            standard_hours,
            weighted_overtime_hours,
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_work_hours".to_string(),
        rule_name: "Monthly Work Hours".to_string(),
        input: serde_json::json!({
            "daily_work_hours": daily_work_hours.normalize().to_string(),
            "work_days_per_week": work_days_per_week,
            "weekly_overtime_hours": weekly_overtime_hours.normalize().to_string(),
            "weeks_per_month": WEEKS_PER_MONTH.to_string()
        }),
        output: serde_json::json!({
            "standard_hours": standard_hours.normalize().to_string(),
            "overtime_hours": overtime_hours.normalize().to_string(),
            "weighted_total_hours": weighted_total_hours.normalize().to_string()
        }),
        reasoning: format!(
            "({} × {} + {}) × {} rounded half up = {} standard hours; {} overtime hours weighted at {} gives {} total",
            daily_work_hours.normalize(),
            work_days_per_week,
            daily_work_hours.normalize(),
            WEEKS_PER_MONTH,
            standard_hours.normalize(),
            overtime_hours.normalize(),
            OVERTIME_PREMIUM,
            weighted_total_hours.normalize()
        ),
    };

    Ok(WorkHoursResult {
        standard_hours,
        overtime_hours,
        weighted_total_hours,
        audit_step,
    })
}
