//! Knowledge base data model and answer retrieval.

use canonical::Normalizer;
use serde::{Deserialize, Serialize};

/// One stored question and its answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
}

impl KnowledgeEntry {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Ordered collection of entries, serialized as `{"questions": [...]}`.
///
/// Entries are only ever appended. Duplicate questions are allowed; lookups
/// return the earliest one.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeBase {
    questions: Vec<KnowledgeEntry>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> Self {
        Self { questions: entries }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Stored question texts in insertion order.
    pub fn questions(&self) -> Vec<&str> {
        self.questions.iter().map(|e| e.question.as_str()).collect()
    }

    pub fn push(&mut self, entry: KnowledgeEntry) {
        self.questions.push(entry);
    }
}

impl FromIterator<KnowledgeEntry> for KnowledgeBase {
    fn from_iter<I: IntoIterator<Item = KnowledgeEntry>>(iter: I) -> Self {
        Self::from_entries(iter.into_iter().collect())
    }
}

/// Answer of the first entry whose normalized question equals `matched`.
///
/// `matched` is expected to come out of the matcher run over this same
/// knowledge base, but the base may have changed since, so a miss is a
/// normal `None`.
pub fn get_answer(matched: &str, kb: &KnowledgeBase) -> Option<String> {
    get_answer_with(&Normalizer::default(), matched, kb)
}

/// [`get_answer`] with an explicit normalizer; it must be the one the
/// matcher used.
pub fn get_answer_with(normalizer: &Normalizer, matched: &str, kb: &KnowledgeBase) -> Option<String> {
    kb.entries()
        .iter()
        .find(|entry| normalizer.normalize(&entry.question) == matched)
        .map(|entry| entry.answer.clone())
}
