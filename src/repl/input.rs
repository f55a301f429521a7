//! Input cleaning for the command prompt.

/// Splits a line into lowercase words, dropping any empty ones.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}
