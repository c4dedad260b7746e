//! Single-space tokenization and word validation.
//!
//! Splitting follows a strict scan: the text is cut at every single space,
//! consecutive spaces produce empty tokens, and the final remainder is always
//! emitted — including an empty string when the text ends at a space or is
//! empty. Callers decide what to do with empty tokens: ingestion drops them,
//! query parsing rejects them.

/// Split `text` on single spaces.
///
/// # Examples
///
/// ```
/// use lancea::analysis::split_words;
///
/// let words: Vec<&str> = split_words("white cat  hat ").collect();
/// assert_eq!(words, vec!["white", "cat", "", "hat", ""]);
/// ```
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ')
}

/// A word is valid unless it contains an ASCII control character
/// (any code point below space, including NUL).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| c < ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let words: Vec<&str> = split_words("curly nasty cat").collect();
        assert_eq!(words, vec!["curly", "nasty", "cat"]);
    }

    #[test]
    fn test_split_emits_empty_tokens() {
        let words: Vec<&str> = split_words("a  b").collect();
        assert_eq!(words, vec!["a", "", "b"]);

        let words: Vec<&str> = split_words(" a").collect();
        assert_eq!(words, vec!["", "a"]);
    }

    #[test]
    fn test_split_always_emits_final_remainder() {
        let words: Vec<&str> = split_words("cat ").collect();
        assert_eq!(words, vec!["cat", ""]);

        let words: Vec<&str> = split_words("").collect();
        assert_eq!(words, vec![""]);
    }

    #[test]
    fn test_valid_word() {
        assert!(is_valid_word("cat"));
        assert!(is_valid_word(""));
        assert!(is_valid_word("непонятно")); // non-ASCII is fine
        assert!(!is_valid_word("ca\u{0}t"));
        assert!(!is_valid_word("cat\u{1f}"));
        assert!(!is_valid_word("tab\tseparated"));
    }
}
