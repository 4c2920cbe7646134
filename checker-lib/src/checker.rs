use std::path::Path;

use crate::column_resolver::{ColumnMap, resolve_columns};
use crate::config::{CheckerConfig, Role};
use crate::consistency::validate;
use crate::error::{CheckError, KeyError, Result};
use crate::header_locator::{HeaderLocation, locate_header};
use crate::match_engine::{MatchOutcome, match_rows};
use crate::result::{MatchKey, ValidationResult};
use crate::row_sanitizer::{DataRow, sanitize_rows};
use crate::sheet::Sheet;
use crate::utils::write_error_to_log;
use crate::workbook::load_sheet;

/// Image consistency checker bound to one sheet.
///
/// Header location, column resolution and row sanitizing happen once, in
/// [`ImageCheckerBuilder::build`]; every key checked afterwards reads the same
/// immutable state.
#[derive(Debug, Clone)]
pub struct ImageChecker {
    config: CheckerConfig,
    sheet: Sheet,
    header: HeaderLocation,
    columns: ColumnMap,
    rows: Vec<DataRow>,
}

pub struct ImageCheckerBuilder {
    config: CheckerConfig,
}

impl ImageCheckerBuilder {
    /// Create a new ImageCheckerBuilder
    ///
    /// # Arguments
    /// * `config` - Accepted column names, documentation markers, default sheet, ...
    pub fn new(config: CheckerConfig) -> Self {
        ImageCheckerBuilder { config }
    }

    /// Build the ImageChecker from an already decoded sheet
    ///
    /// Locates the header row, resolves the column roles and sanitizes the data rows.
    /// Any failure here is structural: nothing about the sheet can be checked.
    pub fn build(self, sheet: Sheet) -> Result<ImageChecker> {
        let config = self.config;
        match Self::prepare(&config, &sheet) {
            Ok((header, columns, rows)) => Ok(ImageChecker {
                config,
                sheet,
                header,
                columns,
                rows,
            }),
            Err(e) => Err(log_structural(&config, e)),
        }
    }

    /// Read the named sheet (or the configured default) from a workbook and build
    pub fn build_from_path(
        self,
        excel_path: impl AsRef<Path>,
        sheet_name: Option<&str>,
    ) -> Result<ImageChecker> {
        let name = self.config.sheet_name(sheet_name).to_string();
        match load_sheet(excel_path, &name) {
            Ok(sheet) => self.build(sheet),
            Err(e) => Err(log_structural(&self.config, e)),
        }
    }

    fn prepare(
        config: &CheckerConfig,
        sheet: &Sheet,
    ) -> Result<(HeaderLocation, ColumnMap, Vec<DataRow>)> {
        let names = config.roles.name_table()?;
        let header = locate_header(sheet, &names, &Role::REQUIRED, config.anchor)?;
        let header_cells = sheet.rows().get(header.index).map(Vec::as_slice).unwrap_or(&[]);
        let columns = resolve_columns(header_cells, &names)?;
        let rows = sanitize_rows(sheet, header.index, &columns, &names, &config.doc_markers);
        Ok((header, columns, rows))
    }
}

impl ImageChecker {
    //////////////////////////////////////////////////////////////
    ///  Public API
    //////////////////////////////////////////////////////////////

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    pub fn header(&self) -> HeaderLocation {
        self.header
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    /// Data rows left after sanitizing, in sheet order
    pub fn rows(&self) -> &[DataRow] {
        &self.rows
    }

    /// Check one key. Never fails: a key that cannot be processed comes back as an
    /// `ERROR` record.
    pub fn check(&self, key: &MatchKey) -> ValidationResult {
        match self.try_check(key) {
            Ok(result) => {
                tracing::debug!(%key, status = %result.status, rows = ?result.rows, "key checked");
                result
            }
            Err(e) => {
                tracing::warn!(%key, "key could not be checked: {e}");
                ValidationResult::error(key.clone(), e.to_string())
            }
        }
    }

    /// Check keys in order; the output is index-aligned with `keys`, duplicates
    /// included.
    ///
    /// Identifier keys need an identifier column. Its absence fails the whole batch
    /// before any key is checked.
    pub fn check_batch(&self, keys: &[MatchKey]) -> Result<Vec<ValidationResult>> {
        if keys.iter().any(MatchKey::is_identifier) {
            if let Err(e) = self.columns.require_identifier() {
                return Err(log_structural(&self.config, e));
            }
        }
        Ok(keys.iter().map(|key| self.check(key)).collect())
    }

    //////////////////////////////////////////////////////////////
    ///  Private methods
    //////////////////////////////////////////////////////////////

    fn try_check(&self, key: &MatchKey) -> Result<ValidationResult, KeyError> {
        let outcome = match_rows(&self.rows, &self.columns, key, self.config.identifier_scope)?;
        Ok(match outcome {
            MatchOutcome::Matched(matched) => validate(key.clone(), &matched, &self.columns),
            MatchOutcome::NotFound {
                status,
                product,
                color,
            } => ValidationResult::not_found(key.clone(), status, product, color),
        })
    }
}

/// Load a workbook sheet and check every key against it
pub fn check_workbook(
    config: CheckerConfig,
    excel_path: impl AsRef<Path>,
    sheet_name: Option<&str>,
    keys: &[MatchKey],
) -> Result<Vec<ValidationResult>> {
    ImageCheckerBuilder::new(config)
        .build_from_path(excel_path, sheet_name)?
        .check_batch(keys)
}

/// Record a structural failure in the configured error log and hand it back
fn log_structural(config: &CheckerConfig, error: CheckError) -> CheckError {
    tracing::error!("{error}");
    if let Some(log_file) = &config.error_log_file {
        write_error_to_log(log_file, error.category(), &error.to_string());
    }
    error
}
