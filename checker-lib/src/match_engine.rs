use crate::column_resolver::{Column, ColumnMap};
use crate::config::IdentifierScope;
use crate::error::KeyError;
use crate::result::{MatchKey, Status};
use crate::row_sanitizer::DataRow;
use crate::utils::fold_key;

/// Rows describing one key, plus the product/color they resolve to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRows<'a> {
    /// Never empty, in sheet order
    pub rows: Vec<&'a DataRow>,
    pub product: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome<'a> {
    Matched(MatchedRows<'a>),
    /// Terminal; `status` is one of the not-found statuses
    NotFound {
        status: Status,
        product: Option<String>,
        color: Option<String>,
    },
}

/// Select the data rows a key refers to.
///
/// Product/color keys filter by product, then by color, reporting whichever step
/// came up empty. Identifier keys filter by the identifier column; with
/// [`IdentifierScope::ProductColor`] the identifier only names a product/color and
/// that whole group is selected. Reported product/color come from the earliest
/// matched row.
pub fn match_rows<'a>(
    rows: &'a [DataRow],
    columns: &ColumnMap,
    key: &MatchKey,
    scope: IdentifierScope,
) -> Result<MatchOutcome<'a>, KeyError> {
    match key {
        MatchKey::ProductColor { product, color } => {
            if product.trim().is_empty() {
                return Err(KeyError::BlankKey("product name"));
            }
            if color.trim().is_empty() {
                return Err(KeyError::BlankKey("color"));
            }
            Ok(match_product_color(rows, columns, product, color))
        }
        MatchKey::Identifier { identifier } => {
            if identifier.trim().is_empty() {
                return Err(KeyError::BlankKey("identifier"));
            }
            let id_column = columns.require_identifier()?;
            Ok(match_identifier(rows, columns, id_column, identifier, scope))
        }
    }
}

fn match_product_color<'a>(
    rows: &'a [DataRow],
    columns: &ColumnMap,
    product: &str,
    color: &str,
) -> MatchOutcome<'a> {
    let by_product = filter_rows(rows.iter(), &columns.product, product);
    if by_product.is_empty() {
        return MatchOutcome::NotFound {
            status: Status::ProductNotFound,
            product: Some(product.trim().to_string()),
            color: Some(color.trim().to_string()),
        };
    }

    let by_color = filter_rows(by_product.into_iter(), &columns.color, color);
    if by_color.is_empty() {
        return MatchOutcome::NotFound {
            status: Status::ColorNotFound,
            product: Some(product.trim().to_string()),
            color: Some(color.trim().to_string()),
        };
    }

    matched(by_color, columns)
}

fn match_identifier<'a>(
    rows: &'a [DataRow],
    columns: &ColumnMap,
    id_column: &Column,
    identifier: &str,
    scope: IdentifierScope,
) -> MatchOutcome<'a> {
    let by_id = filter_rows(rows.iter(), id_column, identifier);
    let Some(first) = by_id.first() else {
        return MatchOutcome::NotFound {
            status: Status::IdentifierNotFound,
            product: None,
            color: None,
        };
    };

    match scope {
        IdentifierScope::Rows => matched(by_id, columns),
        IdentifierScope::ProductColor => {
            let product = text_of(first, &columns.product);
            let color = text_of(first, &columns.color);
            match (product, color) {
                (Some(product), Some(color)) => {
                    match_product_color(rows, columns, &product, &color)
                }
                (None, color) => MatchOutcome::NotFound {
                    status: Status::ProductNotFound,
                    product: None,
                    color,
                },
                (product, None) => MatchOutcome::NotFound {
                    status: Status::ColorNotFound,
                    product,
                    color: None,
                },
            }
        }
    }
}

fn filter_rows<'a>(
    rows: impl Iterator<Item = &'a DataRow>,
    column: &Column,
    wanted: &str,
) -> Vec<&'a DataRow> {
    let wanted = fold_key(wanted);
    rows.filter(|row| row.cell(column.index).folded().as_deref() == Some(wanted.as_str()))
        .collect()
}

fn matched<'a>(rows: Vec<&'a DataRow>, columns: &ColumnMap) -> MatchOutcome<'a> {
    let (product, color) = match rows.first() {
        Some(first) => (
            text_of(first, &columns.product),
            text_of(first, &columns.color),
        ),
        None => (None, None),
    };
    MatchOutcome::Matched(MatchedRows {
        rows,
        product,
        color,
    })
}

fn text_of(row: &DataRow, column: &Column) -> Option<String> {
    row.cell(column.index).as_text().map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::prepared_rows;

    const HEADER: &[&str] = &["Sellable GTIN", "Product Name", "Color", "Main Image URL"];

    #[test]
    fn test_product_color_match_is_case_and_space_insensitive() {
        let (columns, rows) = prepared_rows(&[
            HEADER,
            &["1", "Product A", "Blue", "a.jpg"],
            &["2", " product a ", "BLUE", "a.jpg"],
            &["3", "Product A", "Red", "r.jpg"],
        ]);

        let key = MatchKey::product_color("PRODUCT A", " blue");
        let outcome = match_rows(&rows, &columns, &key, IdentifierScope::Rows).unwrap();

        let MatchOutcome::Matched(matched) = outcome else {
            panic!("expected a match");
        };
        assert_eq!(matched.rows.len(), 2);
        assert_eq!(matched.product.as_deref(), Some("Product A"));
        assert_eq!(matched.color.as_deref(), Some("Blue"));
    }

    #[test]
    fn test_product_then_color_not_found() {
        let (columns, rows) = prepared_rows(&[HEADER, &["1", "Product A", "Red", "a.jpg"]]);

        let missing_product = MatchKey::product_color("NonExistent", "Blue");
        let outcome = match_rows(&rows, &columns, &missing_product, IdentifierScope::Rows);
        assert!(matches!(
            outcome.unwrap(),
            MatchOutcome::NotFound { status: Status::ProductNotFound, .. }
        ));

        let missing_color = MatchKey::product_color("Product A", "Purple");
        let outcome = match_rows(&rows, &columns, &missing_color, IdentifierScope::Rows);
        assert!(matches!(
            outcome.unwrap(),
            MatchOutcome::NotFound { status: Status::ColorNotFound, .. }
        ));
    }

    #[test]
    fn test_identifier_reports_earliest_row() {
        let (columns, rows) = prepared_rows(&[
            HEADER,
            &["7", "Product B", "Green", "g.jpg"],
            &["9", "Product A", "Blue", "a.jpg"],
            &["9", "Product A2", "Navy", "a.jpg"],
        ]);

        let key = MatchKey::identifier(" 9 ");
        let MatchOutcome::Matched(matched) =
            match_rows(&rows, &columns, &key, IdentifierScope::Rows).unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(matched.rows.len(), 2);
        assert_eq!(matched.rows[0].sheet_row, 3);
        assert_eq!(matched.product.as_deref(), Some("Product A"));
        assert_eq!(matched.color.as_deref(), Some("Blue"));

        let unknown = MatchKey::identifier("404");
        assert!(matches!(
            match_rows(&rows, &columns, &unknown, IdentifierScope::Rows).unwrap(),
            MatchOutcome::NotFound { status: Status::IdentifierNotFound, product: None, color: None }
        ));
    }

    #[test]
    fn test_identifier_expands_to_product_color_group() {
        let (columns, rows) = prepared_rows(&[
            HEADER,
            &["1", "Product A", "Blue", "a.jpg"],
            &["2", "Product A", "Blue", "a.jpg"],
            &["3", "Product A", "Red", "r.jpg"],
        ]);

        let key = MatchKey::identifier("2");
        let MatchOutcome::Matched(matched) =
            match_rows(&rows, &columns, &key, IdentifierScope::ProductColor).unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(
            matched.rows.iter().map(|r| r.sheet_row).collect::<Vec<_>>(),
            vec![2, 3]
        );
    }

    #[test]
    fn test_blank_keys_are_key_errors() {
        let (columns, rows) = prepared_rows(&[HEADER, &["1", "Product A", "Blue", "a.jpg"]]);

        let err = match_rows(&rows, &columns, &MatchKey::identifier("  "), IdentifierScope::Rows)
            .unwrap_err();
        assert!(matches!(err, KeyError::BlankKey("identifier")));

        let err = match_rows(
            &rows,
            &columns,
            &MatchKey::product_color("Product A", ""),
            IdentifierScope::Rows,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "color is blank");
    }
}
