use std::collections::BTreeSet;

use crate::column_resolver::{Column, ColumnMap};
use crate::match_engine::MatchedRows;
use crate::result::{MatchKey, Status, ValidationResult};
use crate::row_sanitizer::DataRow;

/// Verdict for one image column across the matched rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnVerdict {
    /// Blank on every row; acceptable, nothing to report
    Blank,
    /// The same non-blank value on every row
    Consistent(String),
    /// Differing values, or blanks mixed with values
    Inconsistent,
}

impl ColumnVerdict {
    pub fn is_inconsistent(&self) -> bool {
        matches!(self, ColumnVerdict::Inconsistent)
    }

    /// The agreed value, only for a consistent column
    pub fn representative(&self) -> Option<String> {
        match self {
            ColumnVerdict::Consistent(value) => Some(value.clone()),
            ColumnVerdict::Blank | ColumnVerdict::Inconsistent => None,
        }
    }
}

/// Judge one column over the matched rows. Values are compared trimmed and
/// case-sensitively; a cell missing from a short row counts as blank.
pub fn column_verdict(rows: &[&DataRow], column: &Column) -> ColumnVerdict {
    let mut blanks = 0usize;
    let mut distinct: BTreeSet<&str> = BTreeSet::new();

    for row in rows {
        match row.cell(column.index).as_text() {
            Some(value) => {
                distinct.insert(value);
            }
            None => blanks += 1,
        }
    }

    let mut values = distinct.into_iter();
    match (values.next(), values.next()) {
        (None, _) => ColumnVerdict::Blank,
        (Some(value), None) if blanks == 0 => ColumnVerdict::Consistent(value.to_string()),
        _ => ColumnVerdict::Inconsistent,
    }
}

/// Distinct non-blank values of a column in first-seen row order
pub fn distinct_values(rows: &[&DataRow], column: &Column) -> Vec<String> {
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    rows.iter()
        .filter_map(|row| row.cell(column.index).as_text())
        .filter(|value| seen.insert(value))
        .map(str::to_string)
        .collect()
}

/// Derive the status and representative images for a non-empty matched set.
///
/// Main or any additional column inconsistent gives `SomethingIsWrong`; otherwise an
/// inconsistent swatch gives `SwatchIsWrong`; otherwise `Same`. Inconsistent columns
/// never report a value.
pub fn validate(key: MatchKey, matched: &MatchedRows<'_>, columns: &ColumnMap) -> ValidationResult {
    let rows = matched.rows.as_slice();

    let main = column_verdict(rows, &columns.main);
    let additional: Vec<ColumnVerdict> = columns
        .additional
        .iter()
        .map(|column| column_verdict(rows, column))
        .collect();
    let swatch = columns
        .swatch
        .as_ref()
        .map(|column| column_verdict(rows, column))
        .unwrap_or(ColumnVerdict::Blank);

    let status = if main.is_inconsistent() || additional.iter().any(ColumnVerdict::is_inconsistent)
    {
        Status::SomethingIsWrong
    } else if swatch.is_inconsistent() {
        Status::SwatchIsWrong
    } else {
        Status::Same
    };

    ValidationResult {
        product: matched.product.clone(),
        color: matched.color.clone(),
        main: main.representative(),
        swatch: swatch.representative(),
        additional: additional.iter().map(ColumnVerdict::representative).collect(),
        rows: rows.iter().map(|row| row.sheet_row).collect(),
        main_values: distinct_values(rows, &columns.main),
        ..ValidationResult::new(key, status)
    }
}
