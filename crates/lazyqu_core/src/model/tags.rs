//! Tag normalization shared by the comma-separated and incremental entry modes.
//!
//! # Invariants
//! - Normalized tags are trimmed and never empty.
//! - Order of first appearance is preserved; case is kept as typed.

/// Normalizes one tag value, returning `None` for blank input.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Splits comma-separated tag input into trimmed, non-empty tags.
pub fn parse_tag_input(input: &str) -> Vec<String> {
    input.split(',').filter_map(normalize_tag).collect()
}

/// Trims every tag and drops blank ones.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    tags.iter().filter_map(|tag| normalize_tag(tag)).collect()
}

/// Renders tags back into comma-separated input form.
pub fn format_tag_input(tags: &[String]) -> String {
    tags.join(", ")
}

/// Sum of tag lengths in characters, as counted by the form validator.
pub fn total_tag_len(tags: &[String]) -> usize {
    tags.iter().map(|tag| tag.chars().count()).sum()
}
