//! Greedy word wrapping.

use crate::font::{FontSpec, TextMeasurer};

/// Wrap `text` into lines narrower than `max_width`.
///
/// Words are separated by single spaces. A word joins the current line
/// while the measured width of `line + " " + word` stays strictly below
/// `max_width`; otherwise it starts a new line. Words are never broken, so
/// a word wider than `max_width` sits alone on its own line.
///
/// Always returns at least one line.
pub fn wrap_text<M: TextMeasurer + ?Sized>(
    text: &str,
    max_width: f32,
    font: FontSpec,
    measurer: &M,
) -> Vec<String> {
    let mut words = text.split(' ');
    let mut current = words.next().unwrap_or("").to_string();
    let mut lines = Vec::new();

    for word in words {
        let candidate = format!("{} {}", current, word);
        if measurer.measure(&candidate, font) < max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::tests::FixedAdvance;

    const FONT: FontSpec = FontSpec {
        size: 20.0,
        weight: crate::font::FontWeight::Medium,
    };

    #[test]
    fn test_single_word() {
        assert_eq!(wrap_text("hello", 100.0, FONT, &FixedAdvance), vec!["hello"]);
    }

    #[test]
    fn test_greedy_fill() {
        // 10px per char at size 20
        let lines = wrap_text("aaaa bbbb cccc", 100.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);
    }

    #[test]
    fn test_width_must_be_strictly_below_max() {
        // "aaaa bbbb" is exactly 90px
        let lines = wrap_text("aaaa bbbb cccc", 90.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn test_greedy_packs_earliest_lines() {
        // Each line takes as many words as fit before moving on.
        let lines = wrap_text("aa bb cccccc", 70.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["aa bb", "cccccc"]);
        let lines = wrap_text("aa bb cc dddddd", 90.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["aa bb cc", "dddddd"]);
    }

    #[test]
    fn test_long_word_alone_on_line() {
        let lines = wrap_text("a supercalifragilistic b", 100.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["a", "supercalifragilistic", "b"]);
    }

    #[test]
    fn test_consecutive_spaces_keep_empty_words() {
        let lines = wrap_text("a  b", 1000.0, FONT, &FixedAdvance);
        assert_eq!(lines, vec!["a  b"]);
    }

    #[test]
    fn test_no_line_exceeds_max_when_words_fit() {
        let text = "the quick brown fox jumps over the lazy dog again and again";
        let max = 120.0;
        let lines = wrap_text(text, max, FONT, &FixedAdvance);
        for line in &lines {
            assert!(FixedAdvance.measure(line, FONT) < max, "line too wide: {:?}", line);
        }
        assert_eq!(lines.join(" "), text);
    }
}
