//! Question normalization for knowledge-base lookups.
//!
//! Turns free text into a canonical, space-separated sequence of stemmed
//! tokens so that "What's your name?" and "what is your name" land close to
//! each other under character-level similarity.
//!
//! ## What we do
//!
//! - Remove ASCII digits and ASCII punctuation
//! - Lowercase (locale-free Unicode) and trim
//! - Split into tokens on Unicode word boundaries
//! - Porter-stem every token until it is stable
//! - Rejoin with single spaces
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. Same text and config give the same output on
//! any machine, and normalizing an already normalized string is a no-op.
//! Lookups rely on this: the stored question is normalized again when its
//! answer is fetched instead of being cached.

mod config;
mod document;
mod error;
mod filter;
mod pipeline;
mod porter;
mod token;

pub use crate::config::NormalizeConfig;
pub use crate::document::NormalizedText;
pub use crate::error::CanonicalError;
pub use crate::filter::{strip_ascii_digits, strip_ascii_punctuation, ASCII_PUNCTUATION};
pub use crate::pipeline::{normalize, Normalizer};
pub use crate::porter::{stem, stem_stable};
pub use crate::token::{tokenize, Token};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_normalize_default() {
        let out = normalize("  What is your NAME?  ");
        assert_eq!(out, "what is your name");
    }

    #[test]
    fn digits_and_punctuation_are_dropped() {
        assert_eq!(normalize("Top-10 movies of 2023!"), "top movi of");
        assert_eq!(normalize("e-mail: a@b.com"), "email abcom");
    }

    #[test]
    fn contraction_collapses_after_punctuation_strip() {
        assert_eq!(normalize("what's your name"), "what your name");
    }

    #[test]
    fn empty_and_symbol_only_input_yield_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
        assert_eq!(normalize("?!... 42"), "");
    }

    #[test]
    fn non_ascii_symbols_split_into_tokens() {
        let normalizer = Normalizer::default();
        let doc = normalizer.normalize_document("¿Dónde está?");
        let texts: Vec<&str> = doc.tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["¿", "dónde", "está"]);
        assert_eq!(doc.text, "¿ dónde está");
    }

    #[test]
    fn token_offsets_index_into_normalized_text() {
        let doc = Normalizer::default().normalize_document("Cats  chasing\tmice");
        assert_eq!(doc.text, "cat chase mice");
        for token in &doc.tokens {
            assert_eq!(&doc.text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn idempotent_on_varied_inputs() {
        let inputs = [
            "What is your favorite color?",
            "The agreed-upon generalizations were RELATIONAL!!",
            "Caf\u{00E9} au lait, s'il vous plaît",
            "hopping hoping happily",
            "東京 is big… really",
            "a \u{0301}b",
            "What’s your name?",
            "abc’s",
            "l·ls",
            "the dog’s bowls… and cat’s toys",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn deterministic_across_instances() {
        let a = Normalizer::new(NormalizeConfig::default()).expect("valid config");
        let b = Normalizer::default();
        let text = "Which planets have rings?";
        assert_eq!(a.normalize(text), b.normalize(text));
        assert_eq!(a.normalize(text), a.normalize(text));
    }

    #[test]
    fn stages_can_be_disabled() {
        let cfg = NormalizeConfig {
            stem: false,
            strip_digits: false,
            ..Default::default()
        };
        let normalizer = Normalizer::new(cfg).expect("valid config");
        assert_eq!(normalizer.normalize("Running 2 dogs!"), "running 2 dogs");
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = NormalizeConfig {
            version: 0,
            ..Default::default()
        };
        assert!(matches!(
            Normalizer::new(cfg),
            Err(CanonicalError::InvalidConfig(_))
        ));
    }
}
