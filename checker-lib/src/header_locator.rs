use std::collections::HashSet;

use crate::config::{NameTable, Role};
use crate::error::{CheckError, Result};
use crate::sheet::{Cell, Sheet};

/// Which scan identified the header row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPass {
    /// The row names every required role
    FullCoverage,
    /// No row named every required role; the row names the anchor role
    Anchor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderLocation {
    /// Zero-based index into the sheet's rows
    pub index: usize,
    pub pass: HeaderPass,
}

/// Find the header row, wherever it sits in the sheet.
///
/// The first row (top to bottom, whole sheet) whose cells name every role in
/// `required` wins. When no row qualifies, the first row naming `anchor` is used
/// instead. Neither found is a `HeaderNotFound` error.
pub fn locate_header(
    sheet: &Sheet,
    names: &NameTable,
    required: &[Role],
    anchor: Role,
) -> Result<HeaderLocation> {
    let full = sheet.rows().iter().position(|row| {
        let roles = roles_named(row, names);
        required.iter().all(|role| roles.contains(role))
    });
    if let Some(index) = full {
        tracing::debug!(sheet = sheet.name(), row = sheet.row_number(index), "header row found");
        return Ok(HeaderLocation {
            index,
            pass: HeaderPass::FullCoverage,
        });
    }

    let fallback = sheet
        .rows()
        .iter()
        .position(|row| row.iter().any(|cell| cell_names(cell, names, anchor)));
    if let Some(index) = fallback {
        tracing::debug!(
            sheet = sheet.name(),
            row = sheet.row_number(index),
            %anchor,
            "header row found by anchor column only"
        );
        return Ok(HeaderLocation {
            index,
            pass: HeaderPass::Anchor,
        });
    }

    Err(CheckError::HeaderNotFound {
        required: required.to_vec(),
        anchor,
    })
}

fn roles_named(row: &[Cell], names: &NameTable) -> HashSet<Role> {
    row.iter()
        .filter_map(Cell::as_text)
        .filter_map(|text| names.lookup(text))
        .collect()
}

fn cell_names(cell: &Cell, names: &NameTable, role: Role) -> bool {
    cell.as_text().is_some_and(|text| names.names_role(text, role))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoleSpec;
    use crate::test_utils::sheet_from_rows;

    fn names() -> NameTable {
        RoleSpec::default().name_table().unwrap()
    }

    #[test]
    fn test_header_at_first_row() {
        let sheet = sheet_from_rows(&[
            &["Product Name", "Color", "Main Image URL"],
            &["Product A", "Blue", "a.jpg"],
        ]);

        let location = locate_header(&sheet, &names(), &Role::REQUIRED, Role::Main).unwrap();
        assert_eq!(location.index, 0);
        assert_eq!(location.pass, HeaderPass::FullCoverage);
    }

    #[test]
    fn test_header_below_boilerplate() {
        let sheet = sheet_from_rows(&[
            &["Version 5.0", "", ""],
            &["Fill in the rows below", "", ""],
            &["", "", ""],
            &["  product name ", "COLOR", "mainImageUrl"],
            &["Product A", "Blue", "a.jpg"],
        ]);

        let location = locate_header(&sheet, &names(), &Role::REQUIRED, Role::Main).unwrap();
        assert_eq!(location.index, 3);
    }

    #[test]
    fn test_partial_row_does_not_beat_later_full_row() {
        let sheet = sheet_from_rows(&[
            &["Main Image URL", "", ""],
            &["Product Name", "Color", "Main Image URL"],
        ]);

        let location = locate_header(&sheet, &names(), &Role::REQUIRED, Role::Main).unwrap();
        assert_eq!(location.index, 1);
        assert_eq!(location.pass, HeaderPass::FullCoverage);
    }

    #[test]
    fn test_falls_back_to_anchor() {
        let sheet = sheet_from_rows(&[
            &["Notes", ""],
            &["Item", "mainImageUrl"],
            &["Product A", "a.jpg"],
        ]);

        let location = locate_header(&sheet, &names(), &Role::REQUIRED, Role::Main).unwrap();
        assert_eq!(location.index, 1);
        assert_eq!(location.pass, HeaderPass::Anchor);
    }

    #[test]
    fn test_header_not_found() {
        let sheet = sheet_from_rows(&[&["a", "b"], &["c", "d"]]);

        let err = locate_header(&sheet, &names(), &Role::REQUIRED, Role::Main).unwrap_err();
        assert!(matches!(err, CheckError::HeaderNotFound { anchor: Role::Main, .. }));
    }
}
