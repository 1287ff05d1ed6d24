//! chemnotes - Structured A-Level Chemistry revision notes
//!
//! Serves topic notes (summary, sections, key points, exam tips and media
//! links) from a read-only registry that is compiled into the crate.
//!
//! # Modules
//!
//! - `notes`: Note records, the topic registry and its accessors
//! - `config`: Content source and output settings for the CLI
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```rust
//! use chemnotes::{all_topic_names, get_topic_notes};
//!
//! let first = all_topic_names()[0];
//! let notes = get_topic_notes(first).expect("listed topics resolve");
//! assert_eq!(notes.topic, first);
//!
//! assert!(get_topic_notes("atomic structure").is_none());
//! ```

pub mod cli;
pub mod config;
pub mod notes;

// Re-export main types at crate root for convenience
pub use notes::{
    all_topic_names, get_topic_notes, ContentDocument, Registry, RegistryError, Section,
    TopicNotes,
};
