//! Character classification and scanning helpers for line text

use std::path::Path;

/// Check if a character is a punctuation/symbol boundary (not whitespace)
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '/' | ':'
            | ','
            | '.'
            | '-'
            | '('
            | ')'
            | '{'
            | '}'
            | '['
            | ']'
            | ';'
            | '"'
            | '\''
            | '<'
            | '>'
            | '='
            | '+'
            | '*'
            | '&'
            | '|'
            | '!'
            | '@'
            | '#'
            | '$'
            | '%'
            | '^'
            | '~'
            | '`'
            | '\\'
            | '?'
    )
}

/// Check if a character breaks a word (whitespace or punctuation)
///
/// Word motion skips a run of break characters, then the run of
/// non-break characters that follows.
pub fn is_break_char(ch: char) -> bool {
    ch.is_whitespace() || is_punctuation(ch)
}

/// Compare two characters ignoring case
#[inline]
pub fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Find `needle` in `haystack` at or after `from`, ignoring case.
///
/// Returns the character offset of the first match. Matching is done
/// character by character so a match always spans `needle.len()` chars.
pub fn find_ignore_case(haystack: &[char], needle: &[char], from: usize) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    let last_start = haystack.len() - needle.len();
    (from..=last_start).find(|&start| {
        haystack[start..start + needle.len()]
            .iter()
            .zip(needle)
            .all(|(&a, &b)| chars_eq_ignore_case(a, b))
    })
}

/// How a document indents when Tab is pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IndentStyle {
    /// Insert a literal tab character
    Tabs,
    /// Insert `tab_width` spaces
    #[default]
    Spaces,
}

impl IndentStyle {
    /// Infer the indent style from file content: any line starting with a
    /// tab means the file indents with tabs.
    pub fn detect<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        if lines.into_iter().any(|line| line.starts_with('\t')) {
            IndentStyle::Tabs
        } else {
            IndentStyle::Spaces
        }
    }
}

/// Split file content into lines the way the loader expects:
/// `\n` separates lines, a `\r` before it is dropped, and the empty line
/// produced by a final newline is trimmed.
pub fn split_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() > 1 && content.ends_with('\n') {
        lines.pop();
    }
    lines
}

/// Buffer name for a path: its final component, or the path itself when it
/// has none
pub fn buffer_name_for_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string())
}
