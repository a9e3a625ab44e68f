//! Phrase tokenizer: whitespace-delimited chunks with ASCII letters uppercased.

use serde::{Deserialize, Serialize};

/// A maximal run of non-whitespace characters from the phrase.
///
/// Letters are uppercased; punctuation, digits and any non-ASCII character
/// stay attached verbatim. Never empty, never contains whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
}

impl Chunk {
    /// Visible length in grid cells (one per `char`, not per byte).
    pub(crate) fn len(&self) -> usize {
        self.text.chars().count()
    }
}

/// Splits `phrase` on runs of whitespace. Punctuation never splits a chunk.
pub fn tokenize(phrase: &str) -> Vec<Chunk> {
    phrase
        .split_whitespace()
        .map(|word| Chunk {
            text: word.chars().map(|c| c.to_ascii_uppercase()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(chunks: &[Chunk]) -> Vec<&str> {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_tokenize_uppercases_and_keeps_punctuation() {
        let chunks = tokenize("don't stop-me now!");
        assert_eq!(texts(&chunks), vec!["DON'T", "STOP-ME", "NOW!"]);
    }

    #[test]
    fn test_tokenize_collapses_mixed_whitespace() {
        let chunks = tokenize("  a\tb\n\nc  ");
        assert_eq!(texts(&chunks), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_tokenize_whitespace_only_is_empty() {
        assert!(tokenize(" \t\n ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_tokenize_leaves_non_ascii_untouched() {
        let chunks = tokenize("café 123");
        assert_eq!(texts(&chunks), vec!["CAFé", "123"]);
        assert_eq!(chunks[0].len(), 4, "length counts chars, not bytes");
    }
}
