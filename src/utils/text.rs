//! Word and character counting

/// Whitespace-delimited token count; blank text counts as zero
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Character count as a user perceives it (Unicode scalar values)
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count() {
        let cases = [
            ("", 0),
            ("   ", 0),
            ("\n\t ", 0),
            ("hello", 1),
            ("hello world", 2),
            ("  hello   world  ", 2),
            ("line one\nline two\ttab", 5),
            ("naïve café", 2),
        ];
        for (text, expected) in cases {
            assert_eq!(word_count(text), expected, "input: {:?}", text);
        }
    }

    #[test]
    fn test_word_count_zero_iff_trimmed_empty() {
        for text in ["", " ", "a", " a ", "\u{3000}", "x\ny"] {
            assert_eq!(word_count(text) == 0, text.trim().is_empty(), "input: {:?}", text);
        }
    }

    #[test]
    fn test_word_count_ignores_surrounding_whitespace() {
        for text in ["one", "one two", "a b c d"] {
            let padded = format!(" \n\t{}  \r\n", text);
            assert_eq!(word_count(&padded), word_count(text));
        }
    }

    #[test]
    fn test_char_count() {
        assert_eq!(char_count(""), 0);
        assert_eq!(char_count("abc "), 4);
        assert_eq!(char_count("héllo"), 5);
    }
}
