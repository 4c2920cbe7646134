use calamine::{Data, ExcelDateTime, Range};
use chrono::{DurationRound, TimeDelta};

use crate::utils::{fold_key, format_cell_datetime};

/// A decoded spreadsheet cell. Numbers, booleans and dates are rendered to text so
/// every comparison downstream works on one representation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Blank,
    Text(String),
}

static BLANK: Cell = Cell::Blank;

impl Cell {
    /// Trimmed text, or `Blank` when nothing but whitespace remains
    pub fn from_text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Cell::Blank
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Blank,
            Data::String(s) => Cell::from_text(s),
            Data::Int(i) => Cell::Text(i.to_string()),
            Data::Float(f) => float_to_cell(*f),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => match excel_datetime_to_text(dt) {
                Some(text) => Cell::Text(text),
                None => float_to_cell(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::from_text(s),
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Cell::Blank)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Blank => None,
            Cell::Text(s) => Some(s),
        }
    }

    /// Case-folded, whitespace-normalized form used for key comparisons
    pub fn folded(&self) -> Option<String> {
        self.as_text().map(fold_key)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_text(value)
    }
}

/// Spreadsheet numbers are floats; GTINs and similar codes must not pick up a `.0`
fn float_to_cell(f: f64) -> Cell {
    if f.is_nan() || f.is_infinite() {
        return Cell::Blank;
    }
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Cell::Text((f as i64).to_string())
    } else {
        Cell::Text(f.to_string())
    }
}

/// Date cells as ISO text. calamine applies the workbook's 1900 or 1904 epoch;
/// durations are left to the numeric rendering.
fn excel_datetime_to_text(dt: &ExcelDateTime) -> Option<String> {
    if !dt.is_datetime() {
        return None;
    }
    let value = dt
        .as_datetime()?
        .duration_round(TimeDelta::try_seconds(1)?)
        .ok()?;
    Some(format_cell_datetime(value))
}

/// One worksheet as ordered rows of cells. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    /// Zero-based spreadsheet row of `rows[0]`
    first_row: usize,
    rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Sheet {
            name: name.into(),
            first_row: 0,
            rows,
        }
    }

    /// Build from a calamine range. Calamine trims leading empty rows and columns,
    /// so the range origin is kept for row numbers and leading columns are padded
    /// back in as blanks.
    pub fn from_range(name: impl Into<String>, range: &Range<Data>) -> Self {
        let (first_row, first_col) = range
            .start()
            .map(|(row, col)| (row as usize, col as usize))
            .unwrap_or((0, 0));

        let rows = range
            .rows()
            .map(|row| {
                std::iter::repeat_n(Cell::Blank, first_col)
                    .chain(row.iter().map(Cell::from_data))
                    .collect()
            })
            .collect();

        Sheet {
            name: name.into(),
            first_row,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Cell at `(row, col)`; cells past the end of a ragged row read as blank
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&BLANK)
    }

    /// 1-based spreadsheet row number of a sheet row index
    pub fn row_number(&self, index: usize) -> usize {
        self.first_row + index + 1
    }
}

/// Cell of a row slice, blank past the end of a ragged row
pub(crate) fn cell_at(cells: &[Cell], col: usize) -> &Cell {
    cells.get(col).unwrap_or(&BLANK)
}
