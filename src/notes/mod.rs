//! Revision notes and the topic registry that serves them.
//!
//! The built-in notes are compiled into the binary from
//! `content/a_level_chemistry.yaml` and decoded once on first access.
//!
//! # Content Layout
//!
//! ```text
//! version: 1
//! topics:
//!   - topic: Atomic Structure      # registry key
//!     subject: A Level Chemistry
//!     summary: ...
//!     audioUrl: https://...        # optional
//!     videoUrl: https://...        # optional
//!     sections:
//!       - title: ...
//!         content: ...
//!     key_points: [...]
//!     exam_tips: [...]
//! ```

pub mod registry;
pub mod topic;

pub use registry::{ContentDocument, Registry, RegistryError, CONTENT_VERSION};
pub use topic::{Section, TopicNotes};

/// Look up the built-in notes for a topic.
///
/// Exact, case-sensitive match on the topic name; unknown names give `None`.
pub fn get_topic_notes(topic_name: &str) -> Option<&'static TopicNotes> {
    Registry::builtin().get(topic_name)
}

/// Names of every built-in topic, in declaration order.
pub fn all_topic_names() -> Vec<&'static str> {
    Registry::builtin().topic_names()
}
