const QUOTE_CHARS: [char; 3] = ['\'', '"', '`'];

/// Parses the free-text identify reply into labels.
///
/// The reply is expected to be a comma-separated list, but the model is not
/// always disciplined about it: quotes are stripped, tokens trimmed and empty
/// tokens dropped. Order is preserved and duplicates are kept.
pub fn parse_labels(text: &str) -> Vec<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let cleaned: String = trimmed.chars().filter(|c| !QUOTE_CHARS.contains(c)).collect();

    cleaned
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Render key for the label at `index`; unique even when labels repeat.
pub fn label_key(index: usize, label: &str) -> String {
    format!("{index}-{label}")
}
