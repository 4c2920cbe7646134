use std::collections::HashMap;

use crate::config::{NameTable, Role};
use crate::error::{CheckError, Result};
use crate::sheet::Cell;

/// A resolved column: its position and the header text as written in the sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub index: usize,
    pub name: String,
}

/// Role to column assignment for one header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    pub product: Column,
    pub color: Column,
    pub main: Column,
    pub identifier: Option<Column>,
    pub swatch: Option<Column>,
    /// Left-to-right spreadsheet order
    pub additional: Vec<Column>,
    /// Non-fatal notes, e.g. a single-valued role matched by several columns
    pub anomalies: Vec<String>,
    /// Every non-blank header name, in column order
    headers: Vec<String>,
}

impl ColumnMap {
    /// Column of a single-valued role, if mapped
    pub fn single(&self, role: Role) -> Option<&Column> {
        match role {
            Role::Product => Some(&self.product),
            Role::Color => Some(&self.color),
            Role::Main => Some(&self.main),
            Role::Identifier => self.identifier.as_ref(),
            Role::Swatch => self.swatch.as_ref(),
            Role::Additional => None,
        }
    }

    /// Identifier column, required only when matching by identifier
    pub fn require_identifier(&self) -> Result<&Column> {
        self.identifier
            .as_ref()
            .ok_or_else(|| CheckError::MissingRequiredColumn {
                role: Role::Identifier,
                available: self.headers.clone(),
            })
    }

    /// Positions of every mapped column, all roles together
    pub fn mapped_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = [
            Some(&self.product),
            Some(&self.color),
            Some(&self.main),
            self.identifier.as_ref(),
            self.swatch.as_ref(),
        ]
        .into_iter()
        .flatten()
        .chain(self.additional.iter())
        .map(|column| column.index)
        .collect();
        indices.sort_unstable();
        indices
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

/// Map each header cell to the role its name belongs to.
///
/// Names are compared whitespace-normalized and case-folded, with duplicate suffixes
/// (`.1`, ` 2`, ...) ignored. Additional image columns are all kept, in column order.
/// A single-valued role matched more than once keeps its leftmost column and records
/// an anomaly. Product, color and main image must resolve.
pub fn resolve_columns(header: &[Cell], names: &NameTable) -> Result<ColumnMap> {
    let mut headers: Vec<String> = Vec::new();
    let mut matches: HashMap<Role, Vec<Column>> = HashMap::new();

    for (index, cell) in header.iter().enumerate() {
        let Some(text) = cell.as_text() else {
            continue;
        };
        headers.push(text.to_string());

        if let Some(role) = names.lookup(text) {
            matches.entry(role).or_default().push(Column {
                index,
                name: text.to_string(),
            });
        }
    }

    let mut anomalies = Vec::new();
    let mut take_single = |role: Role| -> Option<Column> {
        let mut columns = matches.remove(&role)?.into_iter();
        let leftmost = columns.next()?;
        let ignored: Vec<String> = columns.map(|c| format!("'{}'", c.name)).collect();
        if !ignored.is_empty() {
            let note = format!(
                "{} matched by several columns; using '{}' and ignoring {}",
                role,
                leftmost.name,
                ignored.join(", ")
            );
            tracing::warn!("{note}");
            anomalies.push(note);
        }
        Some(leftmost)
    };

    let product = take_single(Role::Product);
    let color = take_single(Role::Color);
    let main = take_single(Role::Main);
    let identifier = take_single(Role::Identifier);
    let swatch = take_single(Role::Swatch);
    let additional = matches.remove(&Role::Additional).unwrap_or_default();

    let missing = |role: Role| CheckError::MissingRequiredColumn {
        role,
        available: headers.clone(),
    };
    let product = product.ok_or_else(|| missing(Role::Product))?;
    let color = color.ok_or_else(|| missing(Role::Color))?;
    let main = main.ok_or_else(|| missing(Role::Main))?;

    tracing::debug!(
        product = %product.name,
        color = %color.name,
        main = %main.name,
        additional = additional.len(),
        "columns resolved"
    );

    Ok(ColumnMap {
        product,
        color,
        main,
        identifier,
        swatch,
        additional,
        anomalies,
        headers,
    })
}
