//! # Question matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` sits on top of the normalization layer (`canonical`). It turns a
//! free-text query and a list of stored questions into a ranking of close
//! matches, applying a similarity cutoff and a result limit.
//!
//! ## Core Types
//!
//! - [`SequenceMatcher`]: Ratcliff/Obershelp block matching with the
//!   `ratio`, `quick_ratio` and `real_quick_ratio` scores.
//! - [`MatchConfig`]: cutoff (inclusive, default 0.5) and the maximum number
//!   of ranked candidates (default 3).
//! - [`MatchHit`]: normalized candidate, its position in the input and its score.
//! - [`Matcher`]: normalizes both sides and ranks; equal scores keep input order.
//!
//! ## Example Usage
//!
//! ```
//! use canonical::Normalizer;
//! use matcher::{MatchConfig, Matcher};
//!
//! let matcher = Matcher::new(Normalizer::default(), MatchConfig::default()).unwrap();
//! let stored = ["What is your name?", "How old are you?"];
//!
//! let hits = matcher.close_matches("what's your name", &stored);
//! assert_eq!(hits[0].candidate, "what is your name");
//! assert_eq!(hits[0].index, 0);
//! assert!(hits[0].score >= 0.5);
//! ```

pub mod engine;
pub mod sequence;
pub mod types;

pub use crate::engine::{find_best_match, Matcher};
pub use crate::sequence::{similarity, Block, SequenceMatcher};
pub use crate::types::{MatchConfig, MatchError, MatchHit};
