//! Output type of the normalization pipeline.
//!
//! # Examples
//!
//! ```rust
//! use canonical::{Normalizer, NormalizeConfig};
//!
//! let normalizer = Normalizer::new(NormalizeConfig::default()).unwrap();
//! let doc = normalizer.normalize_document("What's your name?");
//!
//! assert_eq!(doc.text, "what your name");
//! assert_eq!(doc.tokens.len(), 3);
//! assert_eq!(doc.tokens[1].text, "your");
//! assert_eq!(doc.config_version, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// Normalized form of a question.
///
/// `text` is the tokens joined with single ASCII spaces; token offsets point
/// into `text`, not into the raw input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedText {
    /// Space-joined stemmed tokens. Empty when the input had no words.
    pub text: String,
    /// Tokens with byte offsets into `text`.
    pub tokens: Vec<Token>,
    /// Version of the [`NormalizeConfig`](crate::NormalizeConfig) that produced this.
    pub config_version: u32,
}

impl NormalizedText {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}
