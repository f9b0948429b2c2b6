//! Knowledge base persistence.
//!
//! The on-disk format is a single JSON document:
//!
//! ```json
//! {
//!   "questions": [
//!     { "question": "What is your name?", "answer": "I am an assistant." }
//!   ]
//! }
//! ```
//!
//! Every save rewrites the whole document. There is exactly one writer per
//! store: the [`Session`](crate::Session) that owns it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use thiserror::Error;
use tracing::{debug, info};

use crate::knowledge::KnowledgeBase;

/// Errors raised while reading or writing a knowledge base.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be read or written. Not retried.
    #[error("knowledge base I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The document is not JSON, lacks `questions`, or has an entry without
    /// `question`/`answer`.
    #[error("malformed knowledge base {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Parse a knowledge base document from disk.
pub fn load_knowledge_base(path: impl AsRef<Path>) -> Result<KnowledgeBase, StoreError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| StoreError::io(path, source))?;
    let kb: KnowledgeBase =
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), entries = kb.len(), "knowledge base loaded");
    Ok(kb)
}

/// Serialize the whole knowledge base, replacing whatever the file held.
pub fn save_knowledge_base(path: impl AsRef<Path>, kb: &KnowledgeBase) -> Result<(), StoreError> {
    let path = path.as_ref();
    let bytes = serde_json::to_vec_pretty(kb).map_err(|err| StoreError::io(path, err.into()))?;
    fs::write(path, bytes).map_err(|source| StoreError::io(path, source))?;
    debug!(path = %path.display(), entries = kb.len(), "knowledge base saved");
    Ok(())
}

/// Durable backing for a knowledge base.
pub trait KnowledgeStore: Send + Sync {
    /// Read the full knowledge base.
    fn load(&self) -> Result<KnowledgeBase, StoreError>;
    /// Replace the stored knowledge base with `kb`.
    fn save(&self, kb: &KnowledgeBase) -> Result<(), StoreError>;
}

/// JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    create_if_missing: bool,
}

impl JsonFileStore {
    /// A store that fails to load when the file does not exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_if_missing: false,
        }
    }

    /// Write an empty knowledge base on first load when the file is absent.
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KnowledgeStore for JsonFileStore {
    fn load(&self) -> Result<KnowledgeBase, StoreError> {
        if self.create_if_missing && !self.path.exists() {
            let kb = KnowledgeBase::new();
            save_knowledge_base(&self.path, &kb)?;
            info!(path = %self.path.display(), "created empty knowledge base");
            return Ok(kb);
        }
        load_knowledge_base(&self.path)
    }

    fn save(&self, kb: &KnowledgeBase) -> Result<(), StoreError> {
        save_knowledge_base(&self.path, kb)
    }
}

/// An in-memory store, for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    kb: RwLock<KnowledgeBase>,
}

impl InMemoryStore {
    pub fn new(kb: KnowledgeBase) -> Self {
        Self { kb: RwLock::new(kb) }
    }

    /// Copy of what was last saved.
    pub fn snapshot(&self) -> KnowledgeBase {
        self.kb
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl KnowledgeStore for InMemoryStore {
    fn load(&self) -> Result<KnowledgeBase, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, kb: &KnowledgeBase) -> Result<(), StoreError> {
        let mut guard = self
            .kb
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = kb.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeEntry;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn sample() -> KnowledgeBase {
        KnowledgeBase::from_entries(vec![
            KnowledgeEntry::new("What is your name?", "I am an assistant."),
            KnowledgeEntry::new("Où est la gare ?", "À gauche."),
        ])
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        let kb = sample();

        save_knowledge_base(&path, &kb).unwrap();
        assert_eq!(load_knowledge_base(&path).unwrap(), kb);
    }

    #[test]
    fn saved_document_has_questions_key_and_indentation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        save_knowledge_base(&path, &sample()).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"questions\": ["));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["questions"][0]["answer"], "I am an assistant.");
    }

    #[test]
    fn save_overwrites_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kb.json");
        save_knowledge_base(&path, &sample()).unwrap();
        save_knowledge_base(&path, &KnowledgeBase::new()).unwrap();
        assert!(load_knowledge_base(&path).unwrap().is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"version": 3, "questions": [{"question": "q", "answer": "a", "tags": []}]}"#)
            .unwrap();
        let kb = load_knowledge_base(file.path()).unwrap();
        assert_eq!(kb.entries(), &[KnowledgeEntry::new("q", "a")]);
    }

    #[test]
    fn missing_questions_key_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"entries": []}"#).unwrap();
        let err = load_knowledge_base(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
        assert!(err.to_string().contains("questions"));
    }

    #[test]
    fn entry_without_answer_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"questions": [{"question": "q"}]}"#).unwrap();
        assert!(matches!(
            load_knowledge_base(file.path()),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn invalid_json_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"questions: - nope").unwrap();
        assert!(matches!(
            load_knowledge_base(file.path()),
            Err(StoreError::Malformed { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = load_knowledge_base(dir.path().join("absent.json")).unwrap_err();
        match err {
            StoreError::Io { source, .. } => assert_eq!(source.kind(), io::ErrorKind::NotFound),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("kb.json");
        assert!(matches!(
            save_knowledge_base(&path, &sample()),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn json_store_creates_missing_file_on_request() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh.json");

        let strict = JsonFileStore::new(&path);
        assert!(matches!(strict.load(), Err(StoreError::Io { .. })));

        let lenient = JsonFileStore::new(&path).create_if_missing(true);
        assert!(lenient.load().unwrap().is_empty());
        assert!(path.exists());
        assert!(strict.load().unwrap().is_empty());
    }

    #[test]
    fn in_memory_store_keeps_last_save() {
        let store = InMemoryStore::default();
        assert!(store.load().unwrap().is_empty());
        store.save(&sample()).unwrap();
        assert_eq!(store.snapshot(), sample());
        assert_eq!(store.load().unwrap().len(), 2);
    }
}
