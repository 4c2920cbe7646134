use calamine::{Reader, open_workbook_auto};
use std::path::Path;

use crate::error::{CheckError, Result};
use crate::sheet::Sheet;
use crate::utils::fold_key;

/// Read one worksheet of an xlsx/xls/ods workbook into a [`Sheet`].
///
/// The sheet name is matched exactly first, then ignoring case and surrounding
/// whitespace.
pub fn load_sheet(path: impl AsRef<Path>, sheet_name: &str) -> Result<Sheet> {
    let path = path.as_ref();
    let workbook_error = |message: String| CheckError::Workbook {
        path: path.display().to_string(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;

    let name = select_sheet(workbook.sheet_names(), sheet_name)?;

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| workbook_error(format!("Error reading sheet '{}': {}", name, e)))?;

    tracing::debug!(sheet = %name, rows = range.height(), "sheet loaded");
    Ok(Sheet::from_range(name, &range))
}

/// Pick the requested sheet from the workbook's sheet names: exact match first,
/// then ignoring case and surrounding whitespace.
fn select_sheet(available: Vec<String>, requested: &str) -> Result<String> {
    if available.iter().any(|name| name == requested) {
        return Ok(requested.to_string());
    }
    let wanted = fold_key(requested);
    match available.iter().find(|name| fold_key(name) == wanted) {
        Some(name) => Ok(name.clone()),
        None => Err(CheckError::SheetNotFound {
            sheet: requested.to_string(),
            available,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_workbook_error() {
        let err = load_sheet("does/not/exist.xlsx", "Sheet1").unwrap_err();
        assert!(matches!(err, CheckError::Workbook { .. }));
        assert!(err.to_string().contains("does/not/exist.xlsx"));
    }

    fn sheet_names() -> Vec<String> {
        vec![
            "Instructions".to_string(),
            "Product Content And Site Exp".to_string(),
            "product content and site exp".to_string(),
        ]
    }

    #[test]
    fn test_select_sheet_prefers_exact_name() {
        let name = select_sheet(sheet_names(), "product content and site exp").unwrap();
        assert_eq!(name, "product content and site exp");
    }

    #[test]
    fn test_select_sheet_falls_back_to_folded_name() {
        let name = select_sheet(sheet_names(), " PRODUCT content and  site exp ").unwrap();
        assert_eq!(name, "Product Content And Site Exp");
    }

    #[test]
    fn test_select_sheet_miss_lists_available_sheets() {
        let err = select_sheet(sheet_names(), "Variants").unwrap_err();
        match err {
            CheckError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "Variants");
                assert_eq!(available, sheet_names());
            }
            other => panic!("expected SheetNotFound, got {other:?}"),
        }
    }
}
