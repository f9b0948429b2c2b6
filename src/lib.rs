//! Knowledge-base question answering.
//!
//! This crate stitches together question normalization ([`canonical`]) and
//! fuzzy question matching ([`matcher`]) with a persisted knowledge base and
//! a per-user [`Session`] that runs the ask/teach cycle:
//!
//! ```rust
//! use kbqa::{InMemoryStore, Matcher, Session, SessionOptions, TeachOutcome, TurnOutcome};
//!
//! let mut session = Session::open(
//!     Box::new(InMemoryStore::default()),
//!     Matcher::default(),
//!     SessionOptions::default(),
//! )?;
//!
//! assert!(matches!(
//!     session.ask("What is your favorite color?"),
//!     TurnOutcome::NeedsTeaching { .. }
//! ));
//! assert!(matches!(session.teach("Blue")?, TeachOutcome::Learned(_)));
//!
//! match session.ask("what's your favourite colour") {
//!     TurnOutcome::Answered { answer, .. } => assert_eq!(answer, "Blue"),
//!     other => panic!("expected an answer, got {other:?}"),
//! }
//! # Ok::<(), kbqa::SessionError>(())
//! ```

pub mod config;
mod knowledge;
mod metrics;
mod session;
mod store;

pub use canonical::{
    CanonicalError, NormalizeConfig, NormalizedText, Normalizer, Token, normalize, stem,
    tokenize,
};
pub use matcher::{MatchConfig, MatchError, MatchHit, Matcher, find_best_match, similarity};

pub use crate::config::{ConfigLoadError, KbqaConfig};
pub use knowledge::{KnowledgeBase, KnowledgeEntry, get_answer, get_answer_with};
pub use metrics::SessionMetrics;
pub use session::{
    ChatMessage, DEFAULT_SKIP_TOKEN, Role, Session, SessionError, SessionOptions, TEACH_PROMPT,
    TeachOutcome, TurnOutcome, TurnState,
};
pub use store::{
    InMemoryStore, JsonFileStore, KnowledgeStore, StoreError, load_knowledge_base,
    save_knowledge_base,
};
