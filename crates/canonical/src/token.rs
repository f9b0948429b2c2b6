use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// A token with its UTF-8 byte offsets in the text it was taken from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive).
    pub start: usize,
    /// Byte offset (exclusive).
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Splits text into word tokens and produces byte offsets.
///
/// Boundaries follow Unicode word segmentation (UAX #29): whitespace
/// separates tokens, and symbols that are not part of a word (`…`, `¿`,
/// emoji) become tokens of their own. Whitespace is never part of a token.
///
/// ```rust
/// use canonical::tokenize;
///
/// let tokens = tokenize("where…is it");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
/// assert_eq!(texts, vec!["where", "…", "is", "it"]);
/// ```
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for (offset, segment) in text.split_word_bound_indices() {
        // A bound can glue combining marks onto a leading space; keep only
        // the visible part.
        let trimmed = segment.trim_start();
        let lead = segment.len() - trimmed.len();
        let trimmed = trimmed.trim_end();
        if trimmed.is_empty() {
            continue;
        }
        let start = offset + lead;
        tokens.push(Token {
            text: trimmed.to_string(),
            start,
            end: start + trimmed.len(),
        });
    }

    tokens
}
