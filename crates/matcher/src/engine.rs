use canonical::{NormalizeConfig, Normalizer};

use crate::sequence::SequenceMatcher;
use crate::types::{MatchConfig, MatchError, MatchHit};


/// Ranks stored questions against a free-text query.
///
/// Both sides are normalized on every call; nothing is cached between
/// calls, so the candidate list may change freely in between.
#[derive(Debug, Clone, Default)]
pub struct Matcher {
    normalizer: Normalizer,
    cfg: MatchConfig,
}

impl Matcher {
    /// Construct a matcher from a validated normalizer and a match config.
    pub fn new(normalizer: Normalizer, cfg: MatchConfig) -> Result<Self, MatchError> {
        cfg.validate()?;
        Ok(Self { normalizer, cfg })
    }

    /// Construct a matcher from raw configs for both stages.
    pub fn from_configs(
        normalize_cfg: NormalizeConfig,
        match_cfg: MatchConfig,
    ) -> Result<Self, MatchError> {
        let normalizer = Normalizer::new(normalize_cfg)?;
        Self::new(normalizer, match_cfg)
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Normalize the query and every candidate, then rank.
    ///
    /// Hits are sorted by descending score; equal scores keep candidate
    /// order. At most `max_candidates` hits are returned, all scoring at
    /// least `cutoff`.
    pub fn close_matches<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<MatchHit> {
        let query = self.normalizer.normalize(query);
        let normalized: Vec<String> = candidates
            .iter()
            .map(|c| self.normalizer.normalize(c.as_ref()))
            .collect();
        self.rank_normalized(&query, &normalized)
    }

    /// Best candidate in normalized form, or `None` when nothing clears the
    /// cutoff.
    pub fn find_best_match<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Option<String> {
        self.close_matches(query, candidates)
            .into_iter()
            .next()
            .map(|hit| hit.candidate)
    }

    /// Rank already-normalized candidates against an already-normalized query.
    pub fn rank_normalized<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Vec<MatchHit> {
        let cutoff = self.cfg.cutoff;
        let mut sm = SequenceMatcher::new("", query);
        let mut hits: Vec<MatchHit> = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let candidate = candidate.as_ref();
            sm.set_seq1(candidate);
            // Cheap upper bounds first; the full ratio is quadratic.
            if sm.real_quick_ratio() < cutoff || sm.quick_ratio() < cutoff {
                continue;
            }
            let score = sm.ratio();
            if score >= cutoff {
                hits.push(MatchHit {
                    candidate: candidate.to_string(),
                    index,
                    score,
                });
            }
        }

        // `sort_by` is stable: ties stay in candidate order.
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        hits.truncate(self.cfg.max_candidates);
        hits
    }
}

/// Best matching candidate under the default normalization and a 0.5 cutoff.
///
/// ```rust
/// use matcher::find_best_match;
///
/// let stored = ["What is your name?", "How old are you?"];
/// assert_eq!(
///     find_best_match("what's your name", &stored).as_deref(),
///     Some("what is your name"),
/// );
/// assert_eq!(find_best_match("xyzzy plugh", &stored), None);
/// ```
pub fn find_best_match<S: AsRef<str>>(query: &str, candidates: &[S]) -> Option<String> {
    Matcher::default().find_best_match(query, candidates)
}
