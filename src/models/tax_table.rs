//! Simplified withholding table models.
//!
//! The table maps a monthly taxable income range and a dependent count to a
//! base withholding amount. It is loaded once by the configuration layer and
//! handed to the resolver as an immutable [`TaxTableState`].

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of dependent-count columns in every bracket row.
pub const DEPENDENT_COLUMNS: usize = 11;

/// One income bracket of the withholding table.
///
/// A taxable amount `t` falls into the row when `lower_bound <= t < upper_bound`;
/// `columns[k - 1]` is the base withholding for `k` dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketRow {
    /// Inclusive lower bound in won.
    pub lower_bound: i64,
    /// Exclusive upper bound in won.
    pub upper_bound: i64,
    /// Base withholding for 1 through 11 dependents.
    pub columns: [i64; DEPENDENT_COLUMNS],
}

impl BracketRow {
    /// Returns true if `taxable` lies in `[lower_bound, upper_bound)`.
    pub fn contains(&self, taxable: i64) -> bool {
        self.lower_bound <= taxable && taxable < self.upper_bound
    }

    /// Returns the amount for a dependent count, clamping it into `[1, 11]`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::BracketRow;
    ///
    /// let row = BracketRow {
    ///     lower_bound: 3_000_000,
    ///     upper_bound: 3_100_000,
    ///     columns: [110, 100, 90, 80, 70, 60, 50, 40, 30, 20, 10],
    /// };
    /// assert_eq!(row.amount_for(0), 110);
    /// assert_eq!(row.amount_for(3), 90);
    /// assert_eq!(row.amount_for(42), 10);
    /// ```
    pub fn amount_for(&self, dependent_count: u32) -> i64 {
        self.columns[clamp_dependents(dependent_count) - 1]
    }
}

/// Clamps a dependent count into the table's column range `[1, 11]`.
pub fn clamp_dependents(dependent_count: u32) -> usize {
    (dependent_count as usize).clamp(1, DEPENDENT_COLUMNS)
}

/// Outcome of locating the bracket for a taxable amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketLookup<'a> {
    /// The bracket containing the amount.
    Found(&'a BracketRow),
    /// The table has no rows.
    Empty,
    /// The amount is below the lowest bracket's lower bound.
    BelowLowest {
        /// The lowest lower bound in the table.
        lowest: i64,
    },
    /// The amount falls between two brackets or above the last one.
    NoMatch,
}

/// A validated withholding table: rows sorted ascending, non-overlapping,
/// each with `lower_bound < upper_bound` and non-negative amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaxTable {
    rows: Vec<BracketRow>,
}

impl TaxTable {
    /// Builds a table from rows, rejecting malformed or overlapping rows.
    ///
    /// An empty row list is accepted; lookups in an empty table report
    /// [`BracketLookup::Empty`].
    pub fn new(rows: Vec<BracketRow>) -> EngineResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.lower_bound >= row.upper_bound {
                return Err(EngineError::InvalidTaxTable {
                    row: index,
                    message: format!(
                        "lower bound {} is not below upper bound {}",
                        row.lower_bound, row.upper_bound
                    ),
                });
            }

            if let Some(amount) = row.columns.iter().find(|amount| **amount < 0) {
                return Err(EngineError::InvalidTaxTable {
                    row: index,
                    message: format!("negative withholding amount {}", amount),
                });
            }

            if index > 0 && row.lower_bound < rows[index - 1].upper_bound {
                return Err(EngineError::InvalidTaxTable {
                    row: index,
                    message: format!(
                        "lower bound {} overlaps or precedes previous upper bound {}",
                        row.lower_bound,
                        rows[index - 1].upper_bound
                    ),
                });
            }
        }

        Ok(Self { rows })
    }

    /// Returns the rows in ascending order.
    pub fn rows(&self) -> &[BracketRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locates the bracket containing `taxable` by binary search over lower bounds.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{BracketLookup, BracketRow, TaxTable};
    ///
    /// let row = |lower, upper| BracketRow {
    ///     lower_bound: lower,
    ///     upper_bound: upper,
    ///     columns: [0; 11],
    /// };
    /// let table = TaxTable::new(vec![row(1_000, 2_000), row(2_000, 3_000)]).unwrap();
    ///
    /// assert!(matches!(table.find(2_500), BracketLookup::Found(r) if r.lower_bound == 2_000));
    /// assert_eq!(table.find(999), BracketLookup::BelowLowest { lowest: 1_000 });
    /// assert_eq!(table.find(3_000), BracketLookup::NoMatch);
    /// ```
    pub fn find(&self, taxable: i64) -> BracketLookup<'_> {
        let Some(first) = self.rows.first() else {
            return BracketLookup::Empty;
        };

        let index = self.rows.partition_point(|row| row.lower_bound <= taxable);
        if index == 0 {
            return BracketLookup::BelowLowest {
                lowest: first.lower_bound,
            };
        }

        let row = &self.rows[index - 1];
        if row.contains(taxable) {
            BracketLookup::Found(row)
        } else {
            BracketLookup::NoMatch
        }
    }
}

/// Structured status reported by the table loader instead of an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLoadStatus {
    /// Whether the table was read successfully.
    pub ok: bool,
    /// Human-readable description of the outcome.
    pub message: String,
    /// The rows read, empty on failure.
    pub rows: Vec<BracketRow>,
}

impl TableLoadStatus {
    /// A successful load.
    pub fn loaded(rows: Vec<BracketRow>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
            rows,
        }
    }

    /// A failed load.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            rows: Vec::new(),
        }
    }
}

/// The table as seen by the resolver: either usable or unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TaxTableState {
    /// A validated table.
    Loaded(TaxTable),
    /// No usable table; income tax lookups resolve to zero.
    Unavailable {
        /// Why the table is unavailable.
        message: String,
    },
}

impl TaxTableState {
    /// Returns the table if one is loaded.
    pub fn table(&self) -> Option<&TaxTable> {
        match self {
            TaxTableState::Loaded(table) => Some(table),
            TaxTableState::Unavailable { .. } => None,
        }
    }
}

impl From<TaxTable> for TaxTableState {
    fn from(table: TaxTable) -> Self {
        TaxTableState::Loaded(table)
    }
}

impl From<TableLoadStatus> for TaxTableState {
    fn from(status: TableLoadStatus) -> Self {
        if !status.ok {
            return TaxTableState::Unavailable {
                message: status.message,
            };
        }

        match TaxTable::new(status.rows) {
            Ok(table) => TaxTableState::Loaded(table),
            Err(err) => TaxTableState::Unavailable {
                message: err.to_string(),
            },
        }
    }
}
