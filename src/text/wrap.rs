//! Greedy word wrap into a bounded number of lines.
//!
//! Words are packed left to right while the measured line stays within
//! `max_width`. When the line cap is reached, every remaining word is
//! appended to the last line even if it overflows: text is never dropped.

/// Wrap `text` into at most `max_lines` lines no wider than `max_width`
/// (except the last line, which absorbs overflow, and single words longer
/// than the width).
///
/// `measure` returns the advance width of a string in pixels.
///
/// ## Example
///
/// ```
/// use stampsheet::text::{fixed_width, wrap};
///
/// let lines = wrap("Sony MiniDisc Walkman", 80.0, 2, fixed_width(6.0));
/// assert_eq!(lines, vec!["Sony MiniDisc", "Walkman"]);
/// ```
pub fn wrap<M>(text: &str, max_width: f32, max_lines: usize, measure: M) -> Vec<String>
where
    M: Fn(&str) -> f32,
{
    let mut lines: Vec<String> = Vec::new();
    if max_lines == 0 {
        return lines;
    }

    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure(&candidate) <= max_width || lines.len() + 1 >= max_lines {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Measure function for monospaced text.
pub fn fixed_width(char_width: f32) -> impl Fn(&str) -> f32 {
    move |s: &str| s.chars().count() as f32 * char_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_title_fits_one_line() {
        let lines = wrap("Motorola RAZR V3", 9999.0, 2, fixed_width(8.0));
        assert_eq!(lines, vec!["Motorola RAZR V3"]);
    }

    #[test]
    fn test_overflow_goes_to_last_line() {
        let text = "Extremely Long Device Name That Cannot Possibly Fit";
        let lines = wrap(text, 50.0, 2, fixed_width(6.0));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Extremely");
        assert_eq!(lines[1], "Long Device Name That Cannot Possibly Fit");
        // Nothing is dropped.
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_three_line_reason_block() {
        let text = "Replaced by streaming services and smartphones with more storage";
        let lines = wrap(text, 120.0, 3, fixed_width(6.0));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].chars().count() * 6 <= 120);
        assert!(lines[1].chars().count() * 6 <= 120);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(wrap("", 100.0, 3, fixed_width(6.0)).is_empty());
        assert!(wrap("   \t ", 100.0, 3, fixed_width(6.0)).is_empty());
    }

    #[test]
    fn test_zero_line_cap() {
        assert!(wrap("anything", 100.0, 0, fixed_width(6.0)).is_empty());
    }

    #[test]
    fn test_collapses_internal_whitespace() {
        let lines = wrap("Palm   Pilot\n5000", 999.0, 2, fixed_width(6.0));
        assert_eq!(lines, vec!["Palm Pilot 5000"]);
    }
}
