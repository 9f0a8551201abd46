//! Word boundaries for Ctrl+Left / Ctrl+Right navigation
//!
//! A word is a run of characters that are not separators. Separators are
//! whitespace-like and punctuation characters commonly found between command
//! arguments and expressions.

/// Characters that separate words
pub const WORD_SEPARATORS: &[char] = &[
    ' ', ',', '.', ';', ':', '!', '+', '-', '*', '/', '\\', '=', '(', ')', '{', '}', '[', ']', '^',
    '&', '|', '>', '<',
];

pub fn is_separator(ch: char) -> bool {
    WORD_SEPARATORS.contains(&ch)
}

/// Start of the word before `index`
///
/// Skips separators backward, then the word itself. Stops at 0.
pub fn previous_word_start(text: &[char], index: usize) -> usize {
    let mut index = index.min(text.len());

    while index > 0 && is_separator(text[index - 1]) {
        index -= 1;
    }
    while index > 0 && !is_separator(text[index - 1]) {
        index -= 1;
    }
    index
}

/// End of the word after `index`
///
/// Skips separators forward, then the word itself. Stops at the text length.
pub fn next_word_end(text: &[char], index: usize) -> usize {
    let mut index = index.min(text.len());

    while index < text.len() && is_separator(text[index]) {
        index += 1;
    }
    while index < text.len() && !is_separator(text[index]) {
        index += 1;
    }
    index
}
