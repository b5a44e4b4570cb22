//! Withholding table loading.
//!
//! The simplified withholding table is read from a CSV export with one
//! header row and the columns `lower_bound, upper_bound, d1 .. d11`. Lines
//! starting with `#` are comments. Amounts may carry thousands separators
//! (`"1,060,000"`) as spreadsheet exports often do.
//!
//! Loading never fails. Every problem is reported through
//! [`TableLoadStatus`] with `ok = false`.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::models::{BracketRow, DEPENDENT_COLUMNS, TableLoadStatus};

/// Number of columns in every data row.
pub const TABLE_COLUMNS: usize = 2 + DEPENDENT_COLUMNS;

/// Loads the withholding table from a CSV file.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::load_tax_table;
///
/// let status = load_tax_table("./config/kr2025/tax_table.csv");
/// if status.ok {
///     println!("{} rows", status.rows.len());
/// } else {
///     println!("table unavailable: {}", status.message);
/// }
/// ```
pub fn load_tax_table<P: AsRef<Path>>(path: P) -> TableLoadStatus {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let mut reader = match reader_builder().from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            warn!(path = %path_str, error = %e, "withholding table could not be opened");
            return TableLoadStatus::failed(format!("cannot open {}: {}", path_str, e));
        }
    };

    let status = parse_records(reader.records().map(|r| r.map_err(|e| e.to_string())));
    if status.ok {
        debug!(path = %path_str, rows = status.rows.len(), "withholding table loaded");
    } else {
        warn!(path = %path_str, message = %status.message, "withholding table unavailable");
    }
    status
}

/// Loads the withholding table from CSV text.
pub fn parse_tax_table(data: &str) -> TableLoadStatus {
    let mut reader = reader_builder().from_reader(data.as_bytes());

    parse_records(reader.records().map(|r| r.map_err(|e| e.to_string())))
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder.comment(Some(b'#')).trim(Trim::All).flexible(true);
    builder
}

fn parse_records<I>(records: I) -> TableLoadStatus
where
    I: Iterator<Item = Result<StringRecord, String>>,
{
    let mut rows = Vec::new();

    for (index, record) in records.enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(message) => {
                return TableLoadStatus::failed(format!("malformed record: {}", message));
            }
        };

        match parse_row(&record) {
            Ok(row) => rows.push(row),
            Err(message) => {
                return TableLoadStatus::failed(format!("data row {}: {}", index + 1, message));
            }
        }
    }

    if rows.is_empty() {
        return TableLoadStatus::failed("withholding table has no data rows");
    }

    let message = format!("loaded {} withholding brackets", rows.len());
    TableLoadStatus::loaded(rows, message)
}

fn parse_row(record: &StringRecord) -> Result<BracketRow, String> {
    if record.len() != TABLE_COLUMNS {
        return Err(format!(
            "expected {} columns, found {}",
            TABLE_COLUMNS,
            record.len()
        ));
    }

    let mut values = [0i64; TABLE_COLUMNS];
    for (value, field) in values.iter_mut().zip(record.iter()) {
        *value = parse_amount(field)?;
    }

    let mut columns = [0i64; DEPENDENT_COLUMNS];
    columns.copy_from_slice(&values[2..]);

    Ok(BracketRow {
        lower_bound: values[0],
        upper_bound: values[1],
        columns,
    })
}

/// Parses a whole-won amount, ignoring thousands separators. An empty cell
/// or a dash is zero, as in the published sheet.
fn parse_amount(field: &str) -> Result<i64, String> {
    let cleaned: String = field.chars().filter(|c| *c != ',').collect();
    match cleaned.as_str() {
        "" | "-" => Ok(0),
        value => value
            .parse::<i64>()
            .map_err(|_| format!("'{}' is not a whole amount", field)),
    }
}
