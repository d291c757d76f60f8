//! Text sanitization applied to every raw cell before validation.

use crate::utils::{is_missing_marker, is_null_marker};

/// Trim a cell and strip quoting artifacts; blank cells and null markers
/// become `None`.
pub(crate) fn normalize_text(value: Option<&str>) -> Option<String> {
    let cleaned = deep_clean_quotes(value?);
    if cleaned.is_empty() || is_null_marker(&cleaned) {
        None
    } else {
        Some(cleaned)
    }
}

/// Like [`normalize_text`], but also treats numeric placeholders such as
/// `unknown` or `-` as missing.
pub(crate) fn normalize_numeric_text(value: Option<&str>) -> Option<String> {
    normalize_text(value).filter(|cleaned| !is_missing_marker(cleaned))
}

/// Remove wrapping quotes until none are left.
///
/// Spreadsheet exports sometimes double or triple quote a field
/// (`"""Crown"""`); each pass strips one matching pair and re-trims.
/// Every pass shortens the string, so the loop terminates.
pub(crate) fn deep_clean_quotes(value: &str) -> String {
    let mut cleaned = value.trim();

    while let Some(inner) = strip_pair(cleaned, '"').or_else(|| strip_pair(cleaned, '\'')) {
        cleaned = inner.trim();
    }

    cleaned.to_string()
}

fn strip_pair(value: &str, quote: char) -> Option<&str> {
    if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
        Some(&value[quote.len_utf8()..value.len() - quote.len_utf8()])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  Red Lion ")), Some("Red Lion".to_string()));
        assert_eq!(normalize_text(Some("   ")), None);
        assert_eq!(normalize_text(Some("\\N")), None);
        assert_eq!(normalize_text(Some("NULL")), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_deep_clean_quotes() {
        assert_eq!(deep_clean_quotes("\"\"\"Crown\"\"\""), "Crown");
        assert_eq!(deep_clean_quotes("'King's Head'"), "King's Head");
        assert_eq!(deep_clean_quotes("\" Swan \""), "Swan");
        assert_eq!(deep_clean_quotes("\""), "\"");
        assert_eq!(deep_clean_quotes("\"\""), "");
    }

    #[test]
    fn test_deeply_nested_quotes_fully_stripped() {
        let nested = format!("{}Crown{}", "\"".repeat(14), "\"".repeat(14));
        let once = deep_clean_quotes(&nested);
        assert_eq!(once, "Crown");
        assert_eq!(deep_clean_quotes(&once), once);
    }

    #[test]
    fn test_placeholder_words_kept_as_text() {
        assert_eq!(normalize_text(Some("Unknown")), Some("Unknown".to_string()));
        assert_eq!(normalize_text(Some("None")), Some("None".to_string()));
        assert_eq!(normalize_numeric_text(Some("Unknown")), None);
        assert_eq!(normalize_numeric_text(Some("-")), None);
        assert_eq!(normalize_numeric_text(Some("\\N")), None);
        assert_eq!(normalize_numeric_text(Some(" 51.5 ")), Some("51.5".to_string()));
    }

    #[test]
    fn test_inner_apostrophe_kept() {
        assert_eq!(deep_clean_quotes("King's Arms"), "King's Arms");
    }
}
