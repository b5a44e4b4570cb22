//! Income tax resolution against the simplified withholding table.
//!
//! Below the high-income threshold the base withholding is read from the
//! table by taxable-income bracket and dependent count. At or above the
//! threshold it is computed with a six-tier piecewise-linear formula. The
//! base amount is then truncated to 10 won and reduced by the
//! dependent-child credit.
//!
//! ## Unavailable table
//!
//! A missing, empty or malformed table, or a taxable amount that no bracket
//! covers, produces [`TaxResolution::Unavailable`]. [`resolve_income_tax`]
//! substitutes zero for the base withholding in that case and records that
//! it did so in [`IncomeTaxResolution::substituted_zero`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AuditStep, BracketLookup, TaxTableState, clamp_dependents};

use super::rounding::truncate_to_step;

/// Taxable income at which the table stops and the formula takes over.
pub const HIGH_INCOME_THRESHOLD: i64 = 10_000_000;

/// Withholding at exactly the threshold.
pub const THRESHOLD_WITHHOLDING: Decimal = Decimal::from_parts(1_507_400, 0, 0, false, 0);

/// Published reduction factor applied to the marginal amount of the lower tiers.
pub const REDUCTION_FACTOR: Decimal = Decimal::from_parts(98, 0, 0, false, 2);

/// Credit for the first dependent child aged 8 to 20.
pub const ONE_CHILD_CREDIT: Decimal = Decimal::from_parts(12_500, 0, 0, false, 0);

/// Credit for two dependent children aged 8 to 20.
pub const TWO_CHILDREN_CREDIT: Decimal = Decimal::from_parts(29_160, 0, 0, false, 0);

/// Additional credit for every dependent child beyond the second.
pub const ADDITIONAL_CHILD_CREDIT: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

/// One tier of the high-income formula.
struct Tier {
    /// Exclusive floor of the tier; the tier covers `(floor, ceiling]`.
    floor: i64,
    /// Inclusive ceiling, `None` for the open top tier.
    ceiling: Option<i64>,
    /// Amount added on top of the threshold withholding.
    base: Decimal,
    /// Marginal rate on the excess over `floor`.
    rate: Decimal,
    /// Whether the marginal amount is multiplied by [`REDUCTION_FACTOR`].
    reduced: bool,
}

const TIERS: [Tier; 6] = [
    Tier {
        floor: 10_000_000,
        ceiling: Some(14_000_000),
        base: Decimal::from_parts(25_000, 0, 0, false, 0),
        rate: Decimal::from_parts(35, 0, 0, false, 2),
        reduced: true,
    },
    Tier {
        floor: 14_000_000,
        ceiling: Some(28_000_000),
        base: Decimal::from_parts(1_397_000, 0, 0, false, 0),
        rate: Decimal::from_parts(38, 0, 0, false, 2),
        reduced: true,
    },
    Tier {
        floor: 28_000_000,
        ceiling: Some(30_000_000),
        base: Decimal::from_parts(6_610_600, 0, 0, false, 0),
        rate: Decimal::from_parts(40, 0, 0, false, 2),
        reduced: true,
    },
    Tier {
        floor: 30_000_000,
        ceiling: Some(45_000_000),
        base: Decimal::from_parts(7_394_600, 0, 0, false, 0),
        rate: Decimal::from_parts(40, 0, 0, false, 2),
        reduced: false,
    },
    Tier {
        floor: 45_000_000,
        ceiling: Some(87_000_000),
        base: Decimal::from_parts(13_394_600, 0, 0, false, 0),
        rate: Decimal::from_parts(42, 0, 0, false, 2),
        reduced: false,
    },
    Tier {
        floor: 87_000_000,
        ceiling: None,
        base: Decimal::from_parts(31_034_600, 0, 0, false, 0),
        rate: Decimal::from_parts(45, 0, 0, false, 2),
        reduced: false,
    },
];

/// Why no base withholding could be read from the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// The loader reported a failure or the rows did not validate.
    TableNotLoaded {
        /// The loader's message.
        message: String,
    },
    /// The table has no rows.
    EmptyTable,
    /// The taxable amount is below every bracket.
    BelowLowestBracket {
        /// The lowest lower bound in the table.
        lowest: i64,
    },
    /// No bracket contains the taxable amount.
    NoMatchingBracket,
}

/// The base withholding, or why it could not be determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TaxResolution {
    /// A base withholding amount before truncation and child credit.
    Resolved {
        /// The amount.
        amount: Decimal,
    },
    /// No amount could be determined.
    Unavailable(UnavailableReason),
}

/// Full record of an income tax resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxResolution {
    /// The taxable amount that was looked up.
    pub monthly_taxable: i64,
    /// The dependent count after clamping to `[1, 11]`.
    pub dependent_count: u32,
    /// Number of dependent children aged 8 to 20.
    pub children_8_to_20: u32,
    /// Table or formula outcome.
    pub base: TaxResolution,
    /// True when `base` was unavailable and zero was used instead.
    pub substituted_zero: bool,
    /// Base withholding truncated to 10 won.
    pub truncated_base: Decimal,
    /// Dependent-child credit.
    pub child_credit: Decimal,
    /// `truncated_base - child_credit`; may be negative.
    pub income_tax: Decimal,
    /// The audit step recording the resolution.
    pub audit_step: AuditStep,
}

/// Computes the withholding for taxable income at or above the threshold.
///
/// At exactly the threshold the result is [`THRESHOLD_WITHHOLDING`]. Above
/// it, the tier containing the amount contributes its base plus its marginal
/// rate times the excess over its floor, with [`REDUCTION_FACTOR`] applied
/// to the marginal amount in the three lowest tiers. Amounts below the
/// threshold are outside the formula's domain and also return the
/// threshold withholding.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::high_income_withholding;
/// use rust_decimal::Decimal;
///
/// assert_eq!(high_income_withholding(10_000_000), Decimal::from(1_507_400));
/// // 1,507,400 + 25,000 + 2,000,000 × 0.98 × 0.35
/// assert_eq!(high_income_withholding(12_000_000), Decimal::from(2_218_400));
/// ```
pub fn high_income_withholding(monthly_taxable: i64) -> Decimal {
    let Some(tier) = TIERS.iter().find(|tier| {
        monthly_taxable > tier.floor
            && tier
                .ceiling
                .is_none_or(|ceiling| monthly_taxable <= ceiling)
    }) else {
        return THRESHOLD_WITHHOLDING;
    };

    let excess = Decimal::from(monthly_taxable - tier.floor);
    let marginal = if tier.reduced {
        excess * REDUCTION_FACTOR * tier.rate
    } else {
        excess * tier.rate
    };

    THRESHOLD_WITHHOLDING + tier.base + marginal
}

/// Returns the dependent-child tax credit for `children` dependents aged 8 to 20.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::child_tax_credit;
/// use rust_decimal::Decimal;
///
/// assert_eq!(child_tax_credit(0), Decimal::ZERO);
/// assert_eq!(child_tax_credit(1), Decimal::from(12_500));
/// assert_eq!(child_tax_credit(2), Decimal::from(29_160));
/// assert_eq!(child_tax_credit(5), Decimal::from(104_160));
/// ```
pub fn child_tax_credit(children: u32) -> Decimal {
    match children {
        0 => Decimal::ZERO,
        1 => ONE_CHILD_CREDIT,
        2 => TWO_CHILDREN_CREDIT,
        n => TWO_CHILDREN_CREDIT + Decimal::from(n - 2) * ADDITIONAL_CHILD_CREDIT,
    }
}

/// Determines the base withholding before truncation and child credit.
///
/// Taxable income at or above [`HIGH_INCOME_THRESHOLD`] always resolves via
/// [`high_income_withholding`], whether or not a table is loaded.
pub fn base_withholding(
    monthly_taxable: i64,
    dependent_count: u32,
    table: &TaxTableState,
) -> TaxResolution {
    if monthly_taxable >= HIGH_INCOME_THRESHOLD {
        return TaxResolution::Resolved {
            amount: high_income_withholding(monthly_taxable),
        };
    }

    let table = match table {
        TaxTableState::Loaded(table) => table,
        TaxTableState::Unavailable { message } => {
            return TaxResolution::Unavailable(UnavailableReason::TableNotLoaded {
                message: message.clone(),
            });
        }
    };

    match table.find(monthly_taxable) {
        BracketLookup::Found(row) => TaxResolution::Resolved {
            amount: Decimal::from(row.amount_for(dependent_count)),
        },
        BracketLookup::Empty => TaxResolution::Unavailable(UnavailableReason::EmptyTable),
        BracketLookup::BelowLowest { lowest } => {
            TaxResolution::Unavailable(UnavailableReason::BelowLowestBracket { lowest })
        }
        BracketLookup::NoMatch => TaxResolution::Unavailable(UnavailableReason::NoMatchingBracket),
    }
}

/// Resolves the monthly income tax.
///
/// 1. Clamps the dependent count into `[1, 11]`.
/// 2. Determines the base withholding with [`base_withholding`]; an
///    unavailable base is replaced by zero.
/// 3. Truncates the base to 10 won.
/// 4. Subtracts [`child_tax_credit`]. The result is not clamped and may be
///    negative.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::resolve_income_tax;
/// use payroll_engine::models::{TaxTable, TaxTableState};
/// use rust_decimal::Decimal;
///
/// let empty = TaxTableState::Loaded(TaxTable::new(vec![]).unwrap());
///
/// let resolution = resolve_income_tax(3_000_000, 1, 0, &empty, 1);
/// assert!(resolution.substituted_zero);
/// assert_eq!(resolution.income_tax, Decimal::ZERO);
///
/// let resolution = resolve_income_tax(3_000_000, 1, 1, &empty, 1);
/// assert_eq!(resolution.income_tax, Decimal::from(-12_500));
/// ```
pub fn resolve_income_tax(
    monthly_taxable: i64,
    dependent_count: u32,
    children_8_to_20: u32,
    table: &TaxTableState,
    step_number: u32,
) -> IncomeTaxResolution {
    let dependent_count = clamp_dependents(dependent_count) as u32;
    let base = base_withholding(monthly_taxable, dependent_count, table);

    let (base_amount, substituted_zero) = match &base {
        TaxResolution::Resolved { amount } => (*amount, false),
        TaxResolution::Unavailable(_) => (Decimal::ZERO, true),
    };

    let truncated_base = truncate_to_step(base_amount, Decimal::TEN);
    let child_credit = child_tax_credit(children_8_to_20);
    let income_tax = truncated_base - child_credit;

    let source = match &base {
        TaxResolution::Resolved { .. } if monthly_taxable >= HIGH_INCOME_THRESHOLD => {
            "high-income formula".to_string()
        }
        TaxResolution::Resolved { .. } => "withholding table".to_string(),
        TaxResolution::Unavailable(reason) => {
            format!("unavailable ({}), zero substituted", describe_unavailable(reason))
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax_resolution".to_string(),
        rule_name: "Income Tax Resolution".to_string(),
        input: serde_json::json!({
            "monthly_taxable": monthly_taxable,
            "dependent_count": dependent_count,
            "children_8_to_20": children_8_to_20
        }),
        output: serde_json::json!({
            "base": base_amount.normalize().to_string(),
            "truncated_base": truncated_base.normalize().to_string(),
            "child_credit": child_credit.normalize().to_string(),
            "income_tax": income_tax.normalize().to_string(),
            "substituted_zero": substituted_zero
        }),
        reasoning: format!(
            "Base withholding {} from {}, truncated to {}, less child credit {} = {}",
            base_amount.normalize(),
            source,
            truncated_base.normalize(),
            child_credit.normalize(),
            income_tax.normalize()
        ),
    };

    IncomeTaxResolution {
        monthly_taxable,
        dependent_count,
        children_8_to_20,
        base,
        substituted_zero,
        truncated_base,
        child_credit,
        income_tax,
        audit_step,
    }
}

fn describe_unavailable(reason: &UnavailableReason) -> String {
    match reason {
        UnavailableReason::TableNotLoaded { message } => format!("table not loaded: {}", message),
        UnavailableReason::EmptyTable => "table is empty".to_string(),
        UnavailableReason::BelowLowestBracket { lowest } => {
            format!("below lowest bracket {}", lowest)
        }
        UnavailableReason::NoMatchingBracket => "no bracket contains the amount".to_string(),
    }
}
