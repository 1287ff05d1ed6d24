//! Topic registry: an ordered, read-only map from topic name to notes.
//!
//! Keys are unique and every record's `topic` equals its key. Both are
//! checked while the registry is built, so a bad content document fails
//! loudly instead of silently overwriting an earlier topic.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, error};

use super::topic::TopicNotes;

/// Content document shipped inside the binary
const BUILTIN_CONTENT: &str = include_str!("../../content/a_level_chemistry.yaml");

/// Newest content document version this build understands
pub const CONTENT_VERSION: u32 = 1;

/// Decoded built-in registry (stores Result to keep the decode error around)
static BUILTIN: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// Errors raised while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to parse content document: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to read content document {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate topic: {0}")]
    DuplicateTopic(String),

    #[error("Registry key {key:?} does not match record topic {topic:?}")]
    TopicMismatch { key: String, topic: String },

    #[error("Unsupported content document version: {0}")]
    UnsupportedVersion(u32),
}

/// On-disk layout of a content document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentDocument {
    /// Document format version
    pub version: u32,

    /// Topics in declaration order
    #[serde(default)]
    pub topics: Vec<TopicNotes>,
}

/// Ordered topic registry
#[derive(Debug, Clone, Default)]
pub struct Registry {
    topics: Vec<TopicNotes>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry keyed by each record's own `topic`
    pub fn from_notes(notes: impl IntoIterator<Item = TopicNotes>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for note in notes {
            registry.insert(note)?;
        }
        Ok(registry)
    }

    /// Build a registry from explicit `(key, notes)` pairs.
    ///
    /// Rejects any pair whose key differs from the record's `topic`.
    pub fn from_entries<K>(
        entries: impl IntoIterator<Item = (K, TopicNotes)>,
    ) -> Result<Self, RegistryError>
    where
        K: Into<String>,
    {
        let mut registry = Self::new();
        for (key, note) in entries {
            let key = key.into();
            if key != note.topic {
                return Err(RegistryError::TopicMismatch {
                    key,
                    topic: note.topic,
                });
            }
            registry.insert(note)?;
        }
        Ok(registry)
    }

    /// Decode a YAML content document
    pub fn from_yaml(content: &str) -> Result<Self, RegistryError> {
        let document: ContentDocument = serde_yaml::from_str(content)?;
        Self::from_document(document)
    }

    /// Build a registry from an already decoded document
    pub fn from_document(document: ContentDocument) -> Result<Self, RegistryError> {
        if document.version > CONTENT_VERSION || document.version == 0 {
            return Err(RegistryError::UnsupportedVersion(document.version));
        }

        let registry = Self::from_notes(document.topics)?;
        debug!(topics = registry.len(), "Built topic registry");
        Ok(registry)
    }

    /// Load a content document from disk
    pub async fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        Self::from_yaml(&content)
    }

    /// Decode the built-in content, once per process
    pub fn try_builtin() -> Result<&'static Registry, &'static RegistryError> {
        Self::init_once(&BUILTIN, BUILTIN_CONTENT)
    }

    /// The process-wide built-in registry.
    ///
    /// Never fails: a broken embedded document is logged (once) and an
    /// empty registry is served instead.
    pub fn builtin() -> &'static Registry {
        Self::try_builtin().unwrap_or_else(|_| Self::empty())
    }

    fn init_once(
        cell: &'static OnceLock<Result<Registry, RegistryError>>,
        content: &str,
    ) -> Result<&'static Registry, &'static RegistryError> {
        cell.get_or_init(|| {
            let result = Self::from_yaml(content);
            if let Err(e) = &result {
                error!(error = %e, "Built-in content failed to decode");
            }
            result
        })
        .as_ref()
    }

    fn empty() -> &'static Registry {
        static EMPTY: OnceLock<Registry> = OnceLock::new();
        EMPTY.get_or_init(Registry::new)
    }

    fn insert(&mut self, note: TopicNotes) -> Result<(), RegistryError> {
        if self.index.contains_key(&note.topic) {
            return Err(RegistryError::DuplicateTopic(note.topic));
        }
        self.index.insert(note.topic.clone(), self.topics.len());
        self.topics.push(note);
        Ok(())
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, topic: &str) -> Option<&TopicNotes> {
        self.index.get(topic).map(|&i| &self.topics[i])
    }

    /// Check whether a topic exists
    pub fn contains(&self, topic: &str) -> bool {
        self.index.contains_key(topic)
    }

    /// All topic names in declaration order
    pub fn topic_names(&self) -> Vec<&str> {
        self.topics.iter().map(|t| t.topic.as_str()).collect()
    }

    /// Iterate over notes in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &TopicNotes> {
        self.topics.iter()
    }

    /// Search topics (case-insensitive substring match), in declaration order
    pub fn search(&self, query: &str) -> Vec<&TopicNotes> {
        let query_lower = query.to_lowercase();

        self.topics
            .iter()
            .filter(|t| t.matches(&query_lower))
            .collect()
    }

    /// Topics belonging to a subject (exact match)
    pub fn by_subject(&self, subject: &str) -> Vec<&TopicNotes> {
        self.topics.iter().filter(|t| t.subject == subject).collect()
    }

    /// Serialize all notes as an ordered JSON array
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.topics)
    }

    /// Number of topics
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::topic::Section;

    fn sample(topic: &str) -> TopicNotes {
        TopicNotes::new(topic, "A Level Chemistry", format!("Notes on {}", topic))
    }

    #[test]
    fn test_builtin_content_decodes() {
        let registry = Registry::from_yaml(BUILTIN_CONTENT).unwrap();
        assert!(!registry.is_empty());
        assert!(Registry::try_builtin().is_ok());
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_broken_content_logged_once() {
        static BROKEN: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            for _ in 0..3 {
                assert!(Registry::init_once(&BROKEN, "version: [").is_err());
            }
        });

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert_eq!(output.matches("Built-in content failed to decode").count(), 1);
    }

    #[test]
    fn test_builtin_is_shared() {
        let a = Registry::builtin();
        let b = Registry::builtin();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_from_notes_preserves_order() {
        let registry =
            Registry::from_notes(vec![sample("Redox"), sample("Bonding"), sample("Kinetics")])
                .unwrap();

        assert_eq!(registry.topic_names(), vec!["Redox", "Bonding", "Kinetics"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_topic_rejected() {
        let err = Registry::from_notes(vec![sample("Redox"), sample("Bonding"), sample("Redox")])
            .unwrap_err();

        assert!(matches!(err, RegistryError::DuplicateTopic(ref t) if t == "Redox"));
    }

    #[test]
    fn test_entry_key_mismatch_rejected() {
        let err = Registry::from_entries(vec![("Redox", sample("Redox")), ("Bonds", sample("Bonding"))])
            .unwrap_err();

        match err {
            RegistryError::TopicMismatch { key, topic } => {
                assert_eq!(key, "Bonds");
                assert_eq!(topic, "Bonding");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lookup_is_exact() {
        let registry = Registry::from_notes(vec![sample("Atomic Structure")]).unwrap();

        assert!(registry.get("Atomic Structure").is_some());
        assert!(registry.get("atomic structure").is_none());
        assert!(registry.get(" Atomic Structure").is_none());
        assert!(registry.get("").is_none());
        assert!(registry.contains("Atomic Structure"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.topic_names().is_empty());
        assert_eq!(registry.to_json_pretty().unwrap(), "[]");
    }

    #[test]
    fn test_search_and_subject_filter() {
        let registry = Registry::from_notes(vec![
            sample("Alkenes").with_key_point("Electrophilic addition"),
            sample("Arenes").with_key_point("Electrophilic substitution"),
            TopicNotes::new("Cells", "A Level Biology", "Organelles"),
        ])
        .unwrap();

        let found: Vec<_> = registry.search("ELECTROPHILIC").iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(found, vec!["Alkenes", "Arenes"]);
        assert!(registry.search("nucleophile").is_empty());

        assert_eq!(registry.by_subject("A Level Chemistry").len(), 2);
        assert_eq!(registry.by_subject("A Level Biology").len(), 1);
    }

    #[test]
    fn test_unsupported_version() {
        let err = Registry::from_yaml("version: 2\ntopics: []\n").unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedVersion(2)));

        let err = Registry::from_yaml("version: 0\n").unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedVersion(0)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = Registry::from_yaml("version: [").unwrap_err();
        assert!(matches!(err, RegistryError::Parse(_)));
    }

    #[test]
    fn test_json_export_keeps_order() {
        let registry = Registry::from_notes(vec![
            sample("Kinetics").with_section(Section::new("Rate", "How fast")),
            sample("Energetics"),
        ])
        .unwrap();

        let json = registry.to_json_pretty().unwrap();
        let parsed: Vec<TopicNotes> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0].topic, "Kinetics");
        assert_eq!(parsed[1].topic, "Energetics");
        assert_eq!(parsed[0].sections[0].title, "Rate");
    }
}
