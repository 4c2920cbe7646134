use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of checking one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Same,
    SomethingIsWrong,
    SwatchIsWrong,
    ProductNotFound,
    ColorNotFound,
    IdentifierNotFound,
    Error,
}

impl Status {
    /// HTTP-style classifier: 200 when the rows were found and checked, 404 when the
    /// key matched nothing, 500 when the key could not be processed
    pub fn code(self) -> u16 {
        match self {
            Status::Same | Status::SomethingIsWrong | Status::SwatchIsWrong => 200,
            Status::ProductNotFound | Status::ColorNotFound | Status::IdentifierNotFound => 404,
            Status::Error => 500,
        }
    }

    pub fn is_not_found(self) -> bool {
        self.code() == 404
    }

    /// Short human phrase for reports
    pub fn describe(self) -> &'static str {
        match self {
            Status::Same => "same",
            Status::SomethingIsWrong => "something is wrong",
            Status::SwatchIsWrong => "swatch is wrong",
            Status::ProductNotFound => "product not found",
            Status::ColorNotFound => "color not there",
            Status::IdentifierNotFound => "identifier not found",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Status::Same => "SAME",
            Status::SomethingIsWrong => "SOMETHING_IS_WRONG",
            Status::SwatchIsWrong => "SWATCH_IS_WRONG",
            Status::ProductNotFound => "PRODUCT_NOT_FOUND",
            Status::ColorNotFound => "COLOR_NOT_FOUND",
            Status::IdentifierNotFound => "IDENTIFIER_NOT_FOUND",
            Status::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// What to look up: a product/color pair or a single identifier (GTIN).
///
/// Stored as given; comparisons fold case and whitespace without touching it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchKey {
    ProductColor { product: String, color: String },
    Identifier { identifier: String },
}

impl MatchKey {
    pub fn product_color(product: impl Into<String>, color: impl Into<String>) -> Self {
        MatchKey::ProductColor {
            product: product.into(),
            color: color.into(),
        }
    }

    pub fn identifier(identifier: impl Into<String>) -> Self {
        MatchKey::Identifier {
            identifier: identifier.into(),
        }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, MatchKey::Identifier { .. })
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKey::ProductColor { product, color } => write!(f, "{product} / {color}"),
            MatchKey::Identifier { identifier } => write!(f, "{identifier}"),
        }
    }
}

/// Result record for one key. Image values are only ever the single agreed value of
/// a consistent column; anything else is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub key: MatchKey,
    pub status: Status,
    pub status_code: u16,
    pub product: Option<String>,
    pub color: Option<String>,
    pub main: Option<String>,
    pub swatch: Option<String>,
    /// One slot per additional image column, in column order
    pub additional: Vec<Option<String>>,
    /// 1-based spreadsheet rows that matched the key
    pub rows: Vec<usize>,
    /// Every distinct non-blank main image among the matched rows, in row order.
    /// Diagnostic only; `main` stays the single agreed value.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub main_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub(crate) fn new(key: MatchKey, status: Status) -> Self {
        ValidationResult {
            key,
            status,
            status_code: status.code(),
            product: None,
            color: None,
            main: None,
            swatch: None,
            additional: Vec::new(),
            rows: Vec::new(),
            main_values: Vec::new(),
            error: None,
        }
    }

    /// A key that matched nothing; product/color echo whatever is known
    pub(crate) fn not_found(
        key: MatchKey,
        status: Status,
        product: Option<String>,
        color: Option<String>,
    ) -> Self {
        ValidationResult {
            product,
            color,
            ..ValidationResult::new(key, status)
        }
    }

    /// A key that could not be processed
    pub fn error(key: MatchKey, message: impl Into<String>) -> Self {
        ValidationResult {
            error: Some(message.into()),
            ..ValidationResult::new(key, Status::Error)
        }
    }

    /// Additional image values that resolved, in column order
    pub fn additional_values(&self) -> impl Iterator<Item = &str> {
        self.additional.iter().filter_map(|value| value.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Same.code(), 200);
        assert_eq!(Status::SwatchIsWrong.code(), 200);
        assert_eq!(Status::SomethingIsWrong.code(), 200);
        assert_eq!(Status::ColorNotFound.code(), 404);
        assert_eq!(Status::IdentifierNotFound.code(), 404);
        assert_eq!(Status::Error.code(), 500);
    }

    #[test]
    fn test_status_serializes_as_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::SomethingIsWrong).unwrap(),
            "\"SOMETHING_IS_WRONG\""
        );
        assert_eq!(Status::ProductNotFound.to_string(), "PRODUCT_NOT_FOUND");
    }

    #[test]
    fn test_error_record_shape() {
        let result = ValidationResult::error(MatchKey::identifier("123"), "boom");
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["status"], "ERROR");
        assert_eq!(json["status_code"], 500);
        assert_eq!(json["key"]["mode"], "identifier");
        assert_eq!(json["key"]["identifier"], "123");
        assert_eq!(json["error"], "boom");
        assert!(json["main"].is_null());
    }
}
