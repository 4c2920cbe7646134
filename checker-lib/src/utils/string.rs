/// Normalize text by replacing control characters with spaces and normalizing whitespace
/// Replaces newlines and control characters with spaces, collapses runs of whitespace
/// and trims both ends
pub fn normalize_string(value: &str) -> String {
    value
        .chars() // Process character by character
        .map(|c| {
            if c.is_control() {
                ' ' // Replace control characters (newlines, tabs, etc.) with spaces
            } else {
                c
            }
        })
        .collect::<String>()
        .split_whitespace() // Split on whitespace to normalize multiple spaces
        .collect::<Vec<&str>>()
        .join(" ") // Join back with single spaces
}

/// Comparison form of a header name or lookup key: whitespace-normalized and case-folded.
///
/// The original text is never replaced by this form; it is only used as a lookup key.
pub fn fold_key(value: &str) -> String {
    normalize_string(value).to_lowercase()
}

/// Remove the numeric suffix that spreadsheet tools append to repeated column names.
///
/// Handles `Name.1`, `Name 2`, `Name_3`, `Name-4`, `Name#5`, `Name (6)` and `Name7`.
/// A name that is nothing but digits is returned unchanged, as is a name without a
/// numeric suffix.
pub fn strip_duplicate_suffix(name: &str) -> &str {
    let trimmed = name.trim_end();
    let (body, parenthesized) = match trimmed.strip_suffix(')') {
        Some(body) => (body, true),
        None => (trimmed, false),
    };

    let without_digits = body.trim_end_matches(|c: char| c.is_ascii_digit());
    if without_digits.len() == body.len() || without_digits.trim().is_empty() {
        return name;
    }

    let without_separator = if parenthesized {
        match without_digits.strip_suffix('(') {
            Some(rest) => rest,
            None => return name,
        }
    } else {
        without_digits.trim_end_matches(['.', '_', '-', '#'])
    };

    let stripped = without_separator.trim_end();
    if stripped.is_empty() { name } else { stripped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_string_collapses_whitespace() {
        assert_eq!(normalize_string("  Main \t Image\nURL  "), "Main Image URL");
        assert_eq!(normalize_string("   "), "");
    }

    #[test]
    fn test_fold_key_is_case_insensitive() {
        assert_eq!(fold_key(" Product  Name "), "product name");
        assert_eq!(fold_key("productName"), fold_key("PRODUCTNAME"));
    }

    #[test]
    fn test_strip_duplicate_suffix_variants() {
        assert_eq!(strip_duplicate_suffix("additional image url.1"), "additional image url");
        assert_eq!(strip_duplicate_suffix("additional image url 12"), "additional image url");
        assert_eq!(strip_duplicate_suffix("productsecondaryimageurl_2"), "productsecondaryimageurl");
        assert_eq!(strip_duplicate_suffix("productsecondaryimageurl3"), "productsecondaryimageurl");
        assert_eq!(strip_duplicate_suffix("swatch image url (2)"), "swatch image url");
    }

    #[test]
    fn test_strip_duplicate_suffix_leaves_plain_names_alone() {
        assert_eq!(strip_duplicate_suffix("main image url"), "main image url");
        assert_eq!(strip_duplicate_suffix("2024"), "2024");
        assert_eq!(strip_duplicate_suffix(""), "");
        assert_eq!(strip_duplicate_suffix("color (x)"), "color (x)");
    }
}
