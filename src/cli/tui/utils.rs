//! Text fitting for list rows

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: char = '…';

/// Fits note text into `max_width` terminal columns
///
/// Widths are measured in display columns, so wide (CJK, emoji) characters
/// count double. Line breaks are shown as spaces to keep each row on one line.
/// Text that does not fit is cut and ends with an ellipsis.
pub fn fit_to_width(text: &str, max_width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.width() <= max_width {
        return flat;
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut out = String::new();
    let mut used = 0;
    for c in flat.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_note_is_unchanged() {
        assert_eq!(fit_to_width("Go shopping", 20), "Go shopping");
    }

    #[test]
    fn exact_fit_is_unchanged() {
        assert_eq!(fit_to_width("Go shopping", 11), "Go shopping");
    }

    #[test]
    fn long_note_ends_with_ellipsis() {
        let fitted = fit_to_width("Make an appointment with a doctor", 10);
        assert_eq!(fitted, "Make an a…");
        assert_eq!(fitted.width(), 10);
    }

    #[test]
    fn wide_characters_count_double() {
        // Each of these takes two columns
        let fitted = fit_to_width("買い物に行く", 7);
        assert_eq!(fitted, "買い物…");
        assert!(fitted.width() <= 7);
    }

    #[test]
    fn never_exceeds_width() {
        for width in 0..12 {
            assert!(fit_to_width("日本語 and ascii mixed", width).width() <= width);
        }
    }

    #[test]
    fn newlines_become_spaces() {
        assert_eq!(fit_to_width("first\nsecond", 40), "first second");
    }
}
