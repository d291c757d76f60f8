//! Shared helpers used by the cleaner and the CLI.

// =============================================================================
// Missing Value Markers
// =============================================================================

/// Cell contents treated as "no value" in any column. `\N` is how the open
/// pubs export writes a missing coordinate.
pub const NULL_MARKERS: [&str; 4] = ["null", "n/a", "#n/a", "\\n"];

/// Extra placeholders that only mean "no value" in numeric columns. Words
/// like "Unknown" or "None" can be real venue or area names.
pub const NUMERIC_MISSING_MARKERS: [&str; 6] = ["na", "none", "nan", "missing", "unknown", "-"];

/// Check if a string is a null marker (case-insensitive).
pub fn is_null_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    NULL_MARKERS.iter().any(|&marker| lower == marker)
}

/// Check if a string is a missing-value marker for a numeric column
/// (case-insensitive). Covers every [`NULL_MARKERS`] entry as well.
///
/// # Example
///
/// ```rust,ignore
/// use venue_explorer::utils::is_missing_marker;
///
/// assert!(is_missing_marker("\\N"));
/// assert!(is_missing_marker(" NULL "));
/// assert!(!is_missing_marker("51.5"));
/// ```
pub fn is_missing_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    NULL_MARKERS
        .iter()
        .chain(NUMERIC_MISSING_MARKERS.iter())
        .any(|&marker| lower == marker)
}

// =============================================================================
// Display Helpers
// =============================================================================

/// Truncate a string to `max_len` characters, ending with an ellipsis.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
