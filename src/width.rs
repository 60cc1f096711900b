//! Terminal display width measurement
//!
//! Widths follow the `wcwidth` convention: East Asian wide characters take two
//! columns, combining marks and other zero-width characters take none, and
//! control characters have no defined width at all. NUL is the one control
//! character that prints as nothing, so it takes zero columns.

use unicode_width::UnicodeWidthChar;

/// Columns occupied by a single character, `None` for control characters other than NUL
pub fn char_width(c: char) -> Option<usize> {
    match c {
        '\0' => Some(0),
        c => c.width(),
    }
}

/// Columns occupied by a whole string, `None` if any character has no defined width
pub fn display_width(text: &str) -> Option<usize> {
    let mut width = 0;
    for c in text.chars() {
        width += char_width(c)?;
    }
    Some(width)
}

/// Like [`display_width`], but characters without a defined width count as zero
pub fn display_width_lossy(text: &str) -> usize {
    text.chars().map(|c| char_width(c).unwrap_or(0)).sum()
}
