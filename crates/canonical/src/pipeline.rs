use std::borrow::Cow;

use crate::config::NormalizeConfig;
use crate::document::NormalizedText;
use crate::error::CanonicalError;
use crate::filter::{strip_ascii_digits, strip_ascii_punctuation};
use crate::porter::stem_stable;
use crate::token::{tokenize, Token};

/// Normalizes text with the default configuration.
///
/// Total over all inputs: empty or symbol-only text yields an empty string.
/// The same input always produces the same output, and
/// `normalize(&normalize(s)) == normalize(s)`.
///
/// ```rust
/// use canonical::normalize;
///
/// assert_eq!(normalize("What's your name?"), "what your name");
/// assert_eq!(normalize("  Running 2 DOGS!! "), "run dog");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(text: &str) -> String {
    Normalizer::default().normalize(text)
}

/// A validated normalization pipeline.
///
/// Construction checks the configuration once; every call afterwards is
/// infallible, pure and free of I/O.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Normalizer {
    cfg: NormalizeConfig,
}

impl Normalizer {
    pub fn new(cfg: NormalizeConfig) -> Result<Self, CanonicalError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &NormalizeConfig {
        &self.cfg
    }

    /// Returns only the normalized text.
    pub fn normalize(&self, text: &str) -> String {
        self.normalize_document(text).text
    }

    /// Runs the pipeline and keeps the tokens.
    ///
    /// Steps, in order: drop ASCII digits, drop ASCII punctuation, lowercase
    /// and trim, split on word boundaries, stem, rejoin with single spaces.
    pub fn normalize_document(&self, text: &str) -> NormalizedText {
        let cfg = &self.cfg;

        let without_digits: Cow<str> = if cfg.strip_digits {
            Cow::Owned(strip_ascii_digits(text))
        } else {
            Cow::Borrowed(text)
        };
        let without_punct: Cow<str> = if cfg.strip_punctuation {
            Cow::Owned(strip_ascii_punctuation(&without_digits))
        } else {
            without_digits
        };
        let cased: Cow<str> = if cfg.lowercase {
            Cow::Owned(without_punct.to_lowercase())
        } else {
            without_punct
        };

        let mut words: Vec<String> = Vec::new();
        for raw in tokenize(cased.trim()) {
            if cfg.stem {
                push_stemmed(&raw.text, &mut words);
            } else {
                words.push(raw.text);
            }
        }

        let mut joined = String::with_capacity(cased.len());
        let mut tokens: Vec<Token> = Vec::with_capacity(words.len());
        for word in words {
            if !joined.is_empty() {
                joined.push(' ');
            }
            let start = joined.len();
            joined.push_str(&word);
            tokens.push(Token {
                text: word,
                start,
                end: joined.len(),
            });
        }

        NormalizedText {
            text: joined,
            tokens,
            config_version: cfg.version,
        }
    }
}

/// Stems `word` and pushes the result, split again on word boundaries.
///
/// Stemming can remove the letter that kept a mid-word mark inside the word
/// (`what’s` becomes `what’`), and the tokenizer would then split `’` off.
/// Each piece is stemmed in turn until every pushed word is a single stable
/// token, so normalizing the output again changes nothing.
fn push_stemmed(word: &str, out: &mut Vec<String>) {
    let stemmed = stem_stable(word);
    let pieces = tokenize(&stemmed);
    match pieces.as_slice() {
        [] => {}
        [only] if only.text == stemmed => out.push(stemmed),
        _ => {
            for piece in pieces {
                push_stemmed(&piece.text, out);
            }
        }
    }
}
