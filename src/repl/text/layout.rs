//! # Text Layout
//!
//! Pure layout helpers for shell output: paragraph wrapping with a left
//! gutter and optional justification, and column layout for completion
//! candidates. Widths are measured in terminal columns.

use unicode_width::UnicodeWidthStr;

/// How a message is laid out by [`wrap_message`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStyle {
    /// Text printed in the gutter of a paragraph's first line
    pub left_text: String,
    /// Gutter width
    pub lpad: usize,
    /// Cut words at the line width instead of breaking at spaces
    pub break_words: bool,
    /// Stretch word gaps so inner lines fill the width
    pub justify: bool,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            left_text: String::new(),
            lpad: 0,
            break_words: false,
            justify: true,
        }
    }
}

impl PrintStyle {
    /// Indented style without gutter text
    pub fn indented(lpad: usize) -> Self {
        Self {
            lpad,
            ..Self::default()
        }
    }

    /// Gutter text padded to `lpad`
    pub fn with_left_text(left_text: impl Into<String>, lpad: usize) -> Self {
        Self {
            left_text: left_text.into(),
            lpad,
            ..Self::default()
        }
    }
}

/// Lay `message` out in lines of at most `width` columns
pub fn wrap_message(message: &str, width: usize, style: &PrintStyle) -> Vec<String> {
    let line_length = width.saturating_sub(style.lpad).max(1);
    let mut lines = Vec::new();

    for paragraph in message.split('\n') {
        let chars: Vec<char> = paragraph.chars().collect();
        if chars.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut start = 0;
        while start < chars.len() {
            let gutter = if start == 0 { style.left_text.as_str() } else { "" };

            let mut length = line_length.min(chars.len() - start);
            if !style.break_words && start + length < chars.len() {
                while length > 0 && chars[start + length] != ' ' {
                    length -= 1;
                }
                // No space to break at, cut the word
                if length == 0 {
                    length = line_length;
                }
            }

            let chunk: String = chars[start..start + length].iter().collect();
            let mut line = chunk.trim().to_string();
            start += length;

            if style.justify && start < chars.len() {
                line = justify(&line, line_length);
            }

            lines.push(format!("{}{}", pad_right(gutter, style.lpad), line));
        }
    }

    lines
}

/// Stretch the gaps of `line` so it spans `width` columns
///
/// Extra spaces are spread evenly; the remainder goes to gaps that follow
/// `,` or `.` first, then to the remaining gaps from the left.
pub fn justify(line: &str, width: usize) -> String {
    let words: Vec<&str> = line.split_whitespace().collect();
    let gaps = words.len().saturating_sub(1);
    let used: usize = words.iter().map(|word| word.width()).sum::<usize>() + gaps;

    if gaps == 0 || used >= width {
        return line.to_string();
    }

    let extra = width - used;
    let mut widths = vec![1 + extra / gaps; gaps];
    let mut remainder = extra % gaps;

    let punctuated = (0..gaps).filter(|&i| words[i].ends_with([',', '.']));
    let plain = (0..gaps).filter(|&i| !words[i].ends_with([',', '.']));
    for gap in punctuated.chain(plain) {
        if remainder == 0 {
            break;
        }
        widths[gap] += 1;
        remainder -= 1;
    }

    let mut result = String::with_capacity(width);
    for (i, word) in words.iter().enumerate() {
        result.push_str(word);
        if let Some(gap) = widths.get(i) {
            result.extend(std::iter::repeat(' ').take(*gap));
        }
    }
    result
}

/// Left-justify `text` in a field of `width` columns
pub fn pad_right(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

/// Rows of candidates in left-justified columns
///
/// Every column is as wide as the longest candidate plus two spaces; a row is
/// wrapped before it would exceed `width`.
pub fn format_columns(candidates: &[String], width: usize) -> Vec<String> {
    let column_width = candidates
        .iter()
        .map(|candidate| candidate.width())
        .max()
        .unwrap_or(0)
        + 2;

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for candidate in candidates {
        if row_width > 0 && row_width + column_width > width {
            rows.push(row.trim_end().to_string());
            row.clear();
            row_width = 0;
        }
        row.push_str(&pad_right(candidate, column_width));
        row_width += column_width;
    }

    if row_width > 0 {
        rows.push(row.trim_end().to_string());
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_message_should_keep_short_lines() {
        let lines = wrap_message("Hello", 79, &PrintStyle::default());

        assert_eq!(lines, vec!["Hello".to_string()]);
    }

    #[test]
    fn wrap_message_should_print_empty_paragraphs() {
        let lines = wrap_message("a\n\nb", 79, &PrintStyle::default());

        assert_eq!(lines, vec!["a", "", "b"]);
    }

    #[test]
    fn wrap_message_should_break_at_spaces_without_justify() {
        let style = PrintStyle {
            justify: false,
            ..PrintStyle::default()
        };

        let lines = wrap_message("the quick brown fox jumps", 10, &style);

        assert_eq!(lines, vec!["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn wrap_message_should_justify_inner_lines_only() {
        let lines = wrap_message("aa bb cc dd ee", 9, &PrintStyle::default());

        assert_eq!(lines, vec!["aa  bb cc", "dd ee"]);
        assert_eq!(lines[0].len(), 9);
    }

    #[test]
    fn wrap_message_should_cut_words_longer_than_the_line() {
        let style = PrintStyle {
            justify: false,
            ..PrintStyle::default()
        };

        let lines = wrap_message("abcdefghij", 4, &style);

        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_message_should_print_left_text_on_first_line_only() {
        let style = PrintStyle {
            justify: false,
            ..PrintStyle::with_left_text(" help", 10)
        };

        let lines = wrap_message("one two three", 18, &style);

        assert_eq!(lines, vec![" help     one two", "          three"]);
    }

    #[test]
    fn wrap_message_should_survive_gutter_wider_than_width() {
        let lines = wrap_message("ab", 4, &PrintStyle::indented(10));

        assert_eq!(lines, vec!["          a", "          b"]);
    }

    #[test]
    fn justify_should_favour_gaps_after_punctuation() {
        assert_eq!(justify("malt, hop and", 15), "malt,  hop  and");
        assert_eq!(justify("a, b c", 7), "a,  b c");
    }

    #[test]
    fn justify_should_leave_single_words_alone() {
        assert_eq!(justify("word", 10), "word");
    }

    #[test]
    fn format_columns_should_wrap_rows_at_width() {
        let candidates: Vec<String> = ["hop", "hopinfo", "help", "exit", "quit"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = format_columns(&candidates, 30);

        assert_eq!(rows, vec!["hop      hopinfo  help", "exit     quit"]);
    }

    #[test]
    fn format_columns_should_keep_one_candidate_per_row_when_narrow() {
        let candidates = vec!["cascade".to_string(), "centennial".to_string()];

        let rows = format_columns(&candidates, 5);

        assert_eq!(rows, vec!["cascade", "centennial"]);
    }

    #[test]
    fn pad_right_should_measure_display_width() {
        assert_eq!(pad_right("ab", 4), "ab  ");
        assert_eq!(pad_right("abcdef", 4), "abcdef");
    }
}
