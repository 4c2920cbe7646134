use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{CheckError, Result};
use crate::utils::{fold_key, strip_duplicate_suffix};

/// Sheet used when the caller does not name one
pub const DEFAULT_SHEET: &str = "Product Content And Site Exp";

/// Documentation rows found in marketplace templates below the header row
pub const DOC_PHRASE_IMAGE: &str = "URL, 2500 characters - Main image of the item";
pub const DOC_PHRASE_COLOR: &str = "Alphanumeric, 600 characters - Color refers";

/// Logical column roles the checker understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Product,
    Color,
    Identifier,
    Main,
    Swatch,
    Additional,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Product,
        Role::Color,
        Role::Identifier,
        Role::Main,
        Role::Swatch,
        Role::Additional,
    ];

    /// Roles that must resolve for any sheet to be checked
    pub const REQUIRED: [Role; 3] = [Role::Product, Role::Color, Role::Main];

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Additional images may span several columns; every other role is single-valued
    pub fn is_multi_column(self) -> bool {
        self == Role::Additional
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Product => "product name",
            Role::Color => "color",
            Role::Identifier => "identifier",
            Role::Main => "main image",
            Role::Swatch => "swatch image",
            Role::Additional => "additional image",
        };
        f.write_str(label)
    }
}

/// Accepted header names per role, display labels and machine labels alike
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSpec {
    pub product: Vec<String>,
    pub color: Vec<String>,
    pub identifier: Vec<String>,
    pub main: Vec<String>,
    pub swatch: Vec<String>,
    pub additional: Vec<String>,
}

impl Default for RoleSpec {
    fn default() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        RoleSpec {
            product: names(&["Product Name", "productName"]),
            color: names(&["Color", "color"]),
            identifier: names(&["Sellable GTIN", "sellableGtin", "GTIN"]),
            main: names(&["Main Image URL", "mainImageUrl"]),
            swatch: names(&["Swatch Image URL", "swatchImageUrl"]),
            additional: names(&["Additional Image URL", "productSecondaryImageURL"]),
        }
    }
}

impl RoleSpec {
    pub fn names(&self, role: Role) -> &[String] {
        match role {
            Role::Product => &self.product,
            Role::Color => &self.color,
            Role::Identifier => &self.identifier,
            Role::Main => &self.main,
            Role::Swatch => &self.swatch,
            Role::Additional => &self.additional,
        }
    }

    /// Build the folded-name lookup table shared by header location, column
    /// resolution and row sanitizing.
    ///
    /// Fails when one header name is claimed by two different roles.
    pub fn name_table(&self) -> Result<NameTable> {
        let mut by_name: HashMap<String, Role> = HashMap::new();

        for role in Role::ALL {
            for name in self.names(role) {
                let key = fold_key(name);
                if key.is_empty() {
                    continue;
                }
                if let Some(existing) = by_name.insert(key, role) {
                    if existing != role {
                        return Err(CheckError::InvalidConfig(format!(
                            "header name '{}' is accepted by both the {} and the {} role",
                            name, existing, role
                        )));
                    }
                }
            }
        }

        Ok(NameTable { by_name })
    }
}

/// Folded header name to role lookup, built once per [`RoleSpec`]
#[derive(Debug, Clone)]
pub struct NameTable {
    by_name: HashMap<String, Role>,
}

impl NameTable {
    /// Role named by a raw cell or header text, if any.
    ///
    /// Exact folded names win; otherwise a trailing duplicate suffix (`.1`, ` 2`, ...)
    /// is removed and the lookup retried.
    pub fn lookup(&self, raw: &str) -> Option<Role> {
        let folded = fold_key(raw);
        if folded.is_empty() {
            return None;
        }
        if let Some(role) = self.by_name.get(&folded) {
            return Some(*role);
        }
        self.by_name.get(strip_duplicate_suffix(&folded)).copied()
    }

    pub fn names_role(&self, raw: &str, role: Role) -> bool {
        self.lookup(raw) == Some(role)
    }
}

/// How identifier keys select the rows that get validated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierScope {
    /// Only the rows carrying the identifier
    #[default]
    Rows,
    /// Every row of the product/color the identifier belongs to
    ProductColor,
}

/// Immutable configuration handed to the pipeline entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub default_sheet: String,
    pub roles: RoleSpec,
    /// Role whose header alone identifies the header row when no row names every
    /// required role
    pub anchor: Role,
    /// Case-insensitive prefixes marking template documentation rows
    pub doc_markers: Vec<String>,
    pub identifier_scope: IdentifierScope,
    /// Structural failures are appended here when set
    pub error_log_file: Option<PathBuf>,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        CheckerConfig {
            default_sheet: DEFAULT_SHEET.to_string(),
            roles: RoleSpec::default(),
            anchor: Role::Main,
            doc_markers: vec![DOC_PHRASE_IMAGE.to_string(), DOC_PHRASE_COLOR.to_string()],
            identifier_scope: IdentifierScope::Rows,
            error_log_file: None,
        }
    }
}

impl CheckerConfig {
    /// Load a JSON configuration file; omitted fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration file {}", path.display()))?;
        let config: CheckerConfig = serde_json::from_str(&content)
            .with_context(|| format!("parsing configuration file {}", path.display()))?;

        // Surface overlapping role names at load time rather than at first use
        config
            .roles
            .name_table()
            .with_context(|| format!("validating configuration file {}", path.display()))?;

        Ok(config)
    }

    /// Sheet to read: the override when given and non-blank, else the configured default
    pub fn sheet_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        match requested.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.default_sheet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_table_accepts_display_and_machine_labels() {
        let table = RoleSpec::default().name_table().unwrap();

        assert_eq!(table.lookup("Main Image URL"), Some(Role::Main));
        assert_eq!(table.lookup("  mainimageurl "), Some(Role::Main));
        assert_eq!(table.lookup("Sellable GTIN"), Some(Role::Identifier));
        assert_eq!(table.lookup("productSecondaryImageURL.3"), Some(Role::Additional));
        assert_eq!(table.lookup("Shipping Weight"), None);
        assert_eq!(table.lookup(""), None);
    }

    #[test]
    fn test_name_table_rejects_name_shared_by_two_roles() {
        let mut roles = RoleSpec::default();
        roles.swatch.push("main image url".to_string());

        let err = roles.name_table().unwrap_err();
        assert!(matches!(err, CheckError::InvalidConfig(_)));
        assert!(err.to_string().contains("main image url"));
    }

    #[test]
    fn test_partial_json_config_keeps_defaults() {
        let config: CheckerConfig = serde_json::from_str(
            r#"{ "default_sheet": "Items", "roles": { "color": ["Colour"] }, "identifier_scope": "product_color" }"#,
        )
        .unwrap();

        assert_eq!(config.default_sheet, "Items");
        assert_eq!(config.roles.color, vec!["Colour".to_string()]);
        assert_eq!(config.roles.main, RoleSpec::default().main);
        assert_eq!(config.identifier_scope, IdentifierScope::ProductColor);
        assert_eq!(config.anchor, Role::Main);
        assert_eq!(config.doc_markers.len(), 2);
    }

    #[test]
    fn test_sheet_name_override() {
        let config = CheckerConfig::default();
        assert_eq!(config.sheet_name(None), DEFAULT_SHEET);
        assert_eq!(config.sheet_name(Some("  ")), DEFAULT_SHEET);
        assert_eq!(config.sheet_name(Some(" Sheet1 ")), "Sheet1");
    }
}
