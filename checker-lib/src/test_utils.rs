// Test utilities available to both unit and integration tests
// Only compiled when testing

use crate::checker::{ImageChecker, ImageCheckerBuilder};
use crate::column_resolver::{ColumnMap, resolve_columns};
use crate::config::{CheckerConfig, RoleSpec};
use crate::row_sanitizer::{DataRow, sanitize_rows};
use crate::sheet::{Cell, Sheet};

/// Header row used by most tests: display labels, one swatch, two additional images
pub const STANDARD_HEADER: &[&str] = &[
    "Sellable GTIN",
    "Product Name",
    "Color",
    "Main Image URL",
    "Swatch Image URL",
    "Additional Image URL",
    "Additional Image URL.1",
];

/// Convert string literals to cells; empty or whitespace-only strings become blanks
pub fn cells(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|value| Cell::from_text(value)).collect()
}

/// Build an in-memory sheet named "Test" from string rows
pub fn sheet_from_rows(rows: &[&[&str]]) -> Sheet {
    Sheet::new("Test", rows.iter().map(|row| cells(row)).collect())
}

/// Resolve columns from the first row and sanitize the rest, with default config
pub fn prepared_rows(rows: &[&[&str]]) -> (ColumnMap, Vec<DataRow>) {
    let sheet = sheet_from_rows(rows);
    let config = CheckerConfig::default();
    let names = RoleSpec::default().name_table().unwrap();
    let columns = resolve_columns(&sheet.rows()[0], &names).unwrap();
    let data_rows = sanitize_rows(&sheet, 0, &columns, &names, &config.doc_markers);
    (columns, data_rows)
}

/// Factory function building a checker with the default configuration
pub fn create_checker_with_defaults(rows: &[&[&str]]) -> ImageChecker {
    create_checker(CheckerConfig::default(), rows)
}

pub fn create_checker(config: CheckerConfig, rows: &[&[&str]]) -> ImageChecker {
    ImageCheckerBuilder::new(config)
        .build(sheet_from_rows(rows))
        .unwrap()
}
