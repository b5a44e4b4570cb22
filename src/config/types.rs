//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `engine.yaml`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Allowances, PayrollInput};

/// Identifying information about the rule set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Short rule-set code (e.g., "KR2025").
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Version of the rates and table in effect.
    pub version: String,
    /// Where the rates and table come from.
    pub source: String,
}

/// Values the input form starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDefaults {
    /// Annual salary in won.
    pub annual_salary: Decimal,
    /// Contractual working hours per day.
    pub daily_work_hours: Decimal,
    /// Working days per week.
    pub work_days_per_week: u32,
    /// Fixed overtime hours per week.
    pub weekly_overtime_hours: Decimal,
    /// Statutory minimum hourly wage.
    pub minimum_wage: Decimal,
    /// Minimum-wage inclusion ratio.
    pub min_wage_inclusion_ratio: Decimal,
    /// Number of dependents including the employee.
    pub dependent_count: u32,
    /// Dependent children aged 8 to 20.
    #[serde(default)]
    pub children_8_to_20: u32,
}

impl InputDefaults {
    /// Builds a payroll input with these defaults and no allowances.
    pub fn to_input(&self) -> PayrollInput {
        PayrollInput {
            annual_salary: self.annual_salary,
            daily_work_hours: self.daily_work_hours,
            weekly_overtime_hours: self.weekly_overtime_hours,
            work_days_per_week: self.work_days_per_week,
            minimum_wage: self.minimum_wage,
            min_wage_inclusion_ratio: self.min_wage_inclusion_ratio,
            allowances: Allowances::default(),
            misc_deduction: Decimal::ZERO,
            dependent_count: self.dependent_count,
            children_8_to_20: self.children_8_to_20,
        }
    }
}

/// Where the withholding table is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTableSource {
    /// CSV file name, relative to the configuration directory.
    pub file: String,
    /// Free-form description of the table's provenance.
    #[serde(default)]
    pub description: String,
}

/// The complete engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Rule-set metadata.
    pub engine: EngineMetadata,
    /// Form defaults.
    pub defaults: InputDefaults,
    /// Withholding table location.
    pub tax_table: TaxTableSource,
}
