use canonical::CanonicalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for ranking candidate questions.
///
/// `MatchConfig` is cheap to clone and serde-friendly so it can be embedded
/// in higher-level configs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Minimum similarity a candidate needs to be returned. Inclusive.
    #[serde(default = "MatchConfig::default_cutoff")]
    pub cutoff: f64,
    /// Maximum number of ranked candidates kept.
    #[serde(default = "MatchConfig::default_max_candidates")]
    pub max_candidates: usize,
}

impl MatchConfig {
    pub(crate) fn default_cutoff() -> f64 {
        0.5
    }

    pub(crate) fn default_max_candidates() -> usize {
        3
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(0.0..=1.0).contains(&self.cutoff) {
            return Err(MatchError::InvalidConfig(format!(
                "cutoff must be within [0.0, 1.0], got {}",
                self.cutoff
            )));
        }
        if self.max_candidates == 0 {
            return Err(MatchError::InvalidConfig(
                "max_candidates must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cutoff: Self::default_cutoff(),
            max_candidates: Self::default_max_candidates(),
        }
    }
}

/// A single ranked candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchHit {
    /// Normalized form of the candidate question.
    pub candidate: String,
    /// Position of the candidate in the list it was ranked from.
    pub index: usize,
    /// Similarity to the normalized query, in `[0, 1]`.
    pub score: f64,
}

/// Errors produced by the matching layer.
///
/// Finding nothing is not an error; it is an empty ranking.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("canonical error: {0}")]
    Canonical(#[from] CanonicalError),
}
