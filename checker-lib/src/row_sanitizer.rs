use crate::column_resolver::ColumnMap;
use crate::config::{NameTable, Role};
use crate::sheet::{Cell, Sheet, cell_at};
use crate::utils::fold_key;

/// A row below the header that carries product data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow {
    /// 1-based spreadsheet row number, for reporting
    pub sheet_row: usize,
    pub cells: Vec<Cell>,
}

impl DataRow {
    pub fn cell(&self, col: usize) -> &Cell {
        cell_at(&self.cells, col)
    }
}

/// Keep only the data rows below the header row, in sheet order.
///
/// Dropped: rows repeating the header (verbatim, or an alternate label row where a
/// mapped cell names its own role), template documentation rows starting with one
/// of `doc_markers`, and rows blank in every mapped column.
pub fn sanitize_rows(
    sheet: &Sheet,
    header_index: usize,
    columns: &ColumnMap,
    names: &NameTable,
    doc_markers: &[String],
) -> Vec<DataRow> {
    let header = sheet.rows().get(header_index).map(Vec::as_slice).unwrap_or(&[]);
    let markers: Vec<String> = doc_markers
        .iter()
        .map(|marker| fold_key(marker))
        .filter(|marker| !marker.is_empty())
        .collect();
    let mapped = columns.mapped_indices();

    let mut data_rows = Vec::new();
    let (mut headers, mut docs, mut blanks) = (0usize, 0usize, 0usize);

    for (index, row) in sheet.rows().iter().enumerate().skip(header_index + 1) {
        if same_content(row, header) || names_own_role(row, columns, names) {
            headers += 1;
            continue;
        }
        if is_documentation(row, &markers) {
            docs += 1;
            continue;
        }
        if mapped.iter().all(|&col| cell_at(row, col).is_blank()) {
            blanks += 1;
            continue;
        }

        data_rows.push(DataRow {
            sheet_row: sheet.row_number(index),
            cells: row.clone(),
        });
    }

    tracing::debug!(
        kept = data_rows.len(),
        repeated_headers = headers,
        documentation = docs,
        blank = blanks,
        "rows sanitized"
    );

    data_rows
}

/// Cell-by-cell equality, treating cells past the end of either row as blank
fn same_content(row: &[Cell], header: &[Cell]) -> bool {
    let width = row.len().max(header.len());
    (0..width).all(|col| cell_at(row, col) == cell_at(header, col))
}

fn names_own_role(row: &[Cell], columns: &ColumnMap, names: &NameTable) -> bool {
    [
        Role::Product,
        Role::Color,
        Role::Identifier,
        Role::Main,
        Role::Swatch,
    ]
    .into_iter()
    .filter_map(|role| columns.single(role).map(|column| (role, column.index)))
    .any(|(role, col)| {
        cell_at(row, col)
            .as_text()
            .is_some_and(|text| names.names_role(text, role))
    })
}

fn is_documentation(row: &[Cell], markers: &[String]) -> bool {
    if markers.is_empty() {
        return false;
    }
    row.iter().filter_map(Cell::folded).any(|text| {
        markers
            .iter()
            .any(|marker| text.starts_with(marker.as_str()))
    })
}
