//! Explicit per-user session driving the question/teach turn cycle.
//!
//! ```text
//! AwaitingInput ── ask ──▶ normalize ─▶ match ─┬─ found ─────▶ answer ─▶ AwaitingInput
//!                                              └─ not found ─▶ Teaching
//! Teaching ── teach(answer) ─┬─ learned (append + save) ─▶ AwaitingInput
//!                            └─ skipped (no mutation) ───▶ AwaitingInput
//! ```
//!
//! A session owns its knowledge base and the store behind it; nothing is
//! shared between sessions.

use std::sync::Arc;

use canonical::CanonicalError;
use matcher::{MatchError, Matcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigLoadError, KbqaConfig};
use crate::knowledge::{get_answer_with, KnowledgeBase, KnowledgeEntry};
use crate::metrics::{MetricsSpan, SessionMetrics};
use crate::store::{JsonFileStore, KnowledgeStore, StoreError};

/// Assistant reply when no stored question is close enough.
pub const TEACH_PROMPT: &str = "I don't know the answer. Would you like to teach me?";

/// Answer that declines to teach, compared case-insensitively.
pub const DEFAULT_SKIP_TOKEN: &str = "skip";

/// Errors surfaced by a session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("match error: {0}")]
    Match(#[from] MatchError),
    #[error("canonical error: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("config error: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("no question is waiting for an answer")]
    NotTeaching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One line of the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Where the session stands between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnState {
    AwaitingInput,
    /// The raw question that found no answer and is waiting to be taught.
    Teaching { question: String },
}

/// Result of [`Session::ask`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Answered { matched: String, answer: String },
    NeedsTeaching { question: String },
}

/// Result of [`Session::teach`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeachOutcome {
    /// The entry was appended and persisted.
    Learned(KnowledgeEntry),
    /// Nothing changed.
    Skipped,
}

/// Session behavior knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub skip_token: String,
    /// Maximum transcript length; 0 keeps everything.
    pub history_limit: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            skip_token: DEFAULT_SKIP_TOKEN.to_string(),
            history_limit: 200,
        }
    }
}

pub struct Session {
    kb: KnowledgeBase,
    store: Box<dyn KnowledgeStore>,
    matcher: Matcher,
    options: SessionOptions,
    state: TurnState,
    history: Vec<ChatMessage>,
    metrics: Option<Arc<dyn SessionMetrics>>,
}

impl Session {
    /// Load the knowledge base from `store` and start awaiting input.
    pub fn open(
        store: Box<dyn KnowledgeStore>,
        matcher: Matcher,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        let kb = store.load()?;
        info!(entries = kb.len(), "session opened");
        Ok(Self {
            kb,
            store,
            matcher,
            options,
            state: TurnState::AwaitingInput,
            history: Vec::new(),
            metrics: None,
        })
    }

    /// Open a session backed by the JSON file named in `cfg`.
    pub fn from_config(cfg: &KbqaConfig) -> Result<Self, SessionError> {
        let store = JsonFileStore::new(&cfg.store.path).create_if_missing(cfg.store.create_if_missing);
        let matcher = Matcher::from_configs(
            cfg.canonical.to_normalize_config(),
            cfg.matcher.to_match_config(),
        )?;
        Self::open(Box::new(store), matcher, cfg.session.to_session_options())
    }

    pub fn with_metrics(mut self, recorder: Arc<dyn SessionMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn state(&self) -> &TurnState {
        &self.state
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Matched normalized question and its answer, without touching session
    /// state. An empty stored answer counts as no answer.
    pub fn lookup(&self, question: &str) -> Option<(String, String)> {
        let questions = self.kb.questions();
        debug!(candidates = questions.len(), "matching question");
        let matched = self.matcher.find_best_match(question, &questions)?;
        match get_answer_with(self.matcher.normalizer(), &matched, &self.kb) {
            Some(answer) if answer.is_empty() => {
                debug!(matched = %matched, "matched question has an empty answer");
                None
            }
            Some(answer) => Some((matched, answer)),
            None => {
                warn!(matched = %matched, "matched question has no stored answer");
                None
            }
        }
    }

    /// Handle one user question.
    ///
    /// A question asked while another is waiting to be taught drops the
    /// pending one unanswered.
    pub fn ask(&mut self, question: &str) -> TurnOutcome {
        if let TurnState::Teaching { question: pending } = &self.state {
            debug!(pending = %pending, "new question replaces pending teach");
        }
        self.push_message(ChatMessage::new(Role::User, question));

        let span = MetricsSpan::start(self.metrics.as_ref());
        let found = self.lookup(question);
        if let Some(span) = span {
            span.record_lookup(found.is_some());
        }

        match found {
            Some((matched, answer)) => {
                debug!(matched = %matched, "answer found");
                self.state = TurnState::AwaitingInput;
                self.push_message(ChatMessage::new(Role::Assistant, answer.as_str()));
                TurnOutcome::Answered { matched, answer }
            }
            None => {
                debug!("no close match; waiting to be taught");
                self.state = TurnState::Teaching {
                    question: question.to_string(),
                };
                self.push_message(ChatMessage::new(Role::Assistant, TEACH_PROMPT));
                TurnOutcome::NeedsTeaching {
                    question: question.to_string(),
                }
            }
        }
    }

    /// Resolve the pending question with `answer`.
    ///
    /// An empty answer or the skip token leaves the knowledge base untouched.
    /// Otherwise the entry is appended and the whole knowledge base saved; if
    /// saving fails nothing changes and the question stays pending.
    pub fn teach(&mut self, answer: &str) -> Result<TeachOutcome, SessionError> {
        let TurnState::Teaching { question } = &self.state else {
            return Err(SessionError::NotTeaching);
        };

        let trimmed = answer.trim();
        if trimmed.is_empty() || trimmed.to_lowercase() == self.options.skip_token.to_lowercase() {
            debug!(question = %question, "teach skipped");
            self.state = TurnState::AwaitingInput;
            self.record_teach(false);
            return Ok(TeachOutcome::Skipped);
        }

        let entry = KnowledgeEntry::new(question.clone(), answer);
        let mut next = self.kb.clone();
        next.push(entry.clone());
        self.store.save(&next)?;
        self.kb = next;

        info!(question = %entry.question, entries = self.kb.len(), "learned new answer");
        self.state = TurnState::AwaitingInput;
        self.push_message(ChatMessage::new(Role::Assistant, entry.answer.as_str()));
        self.record_teach(true);
        Ok(TeachOutcome::Learned(entry))
    }

    /// Drop the pending question without teaching. Returns whether one was pending.
    pub fn cancel_teaching(&mut self) -> bool {
        let was_teaching = matches!(self.state, TurnState::Teaching { .. });
        self.state = TurnState::AwaitingInput;
        was_teaching
    }

    fn record_teach(&self, learned: bool) {
        if let Some(recorder) = &self.metrics {
            recorder.record_teach(learned);
        }
    }

    fn push_message(&mut self, message: ChatMessage) {
        self.history.push(message);
        let limit = self.options.history_limit;
        if limit > 0 && self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }
}
