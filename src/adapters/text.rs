/// Maximum characters kept in a post title
pub const TITLE_MAX_CHARS: usize = 100;

/// Maximum characters kept in a post excerpt
pub const EXCERPT_MAX_CHARS: usize = 150;

const ELLIPSIS: &str = "...";

/// Truncates `text` to `max_chars` characters, appending an ellipsis when cut
///
/// Counts Unicode scalar values so multi-byte text is never split mid-character.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// Up to two uppercase initials from the first two words of a name
pub fn initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}

/// Lowercase alphanumeric slug, e.g. "Elena Voss" -> "elenavoss"
pub fn slugify(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Parses a decimal count string, defaulting to 0
pub fn parse_count(value: &str) -> u64 {
    value.trim().parse().unwrap_or(0)
}
