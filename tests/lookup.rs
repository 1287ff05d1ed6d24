//! Topic Lookup Integration Tests
//!
//! Tests for the built-in registry accessors: exact lookup, ordering and
//! consistency of every shipped topic.

use chemnotes::{all_topic_names, get_topic_notes, Registry};

#[test]
fn test_atomic_structure_notes() {
    let notes = get_topic_notes("Atomic Structure").expect("Atomic Structure is shipped");

    assert_eq!(notes.topic, "Atomic Structure");
    assert_eq!(notes.subject, "A Level Chemistry");
    assert_eq!(notes.sections.len(), 7);
}

#[test]
fn test_lookup_is_case_sensitive() {
    assert!(get_topic_notes("atomic structure").is_none());
    assert!(get_topic_notes("ATOMIC STRUCTURE").is_none());
}

#[test]
fn test_lookup_does_not_trim() {
    assert!(get_topic_notes(" Atomic Structure").is_none());
    assert!(get_topic_notes("Atomic Structure ").is_none());
}

#[test]
fn test_unknown_and_empty_names_are_absent() {
    // Every input has a defined result
    for name in ["", " ", "\t\n", "Organic Synthesis", "Equilibria", "🧪"] {
        assert!(get_topic_notes(name).is_none(), "{name:?} should be absent");
    }
}

#[test]
fn test_declaration_order() {
    let names = all_topic_names();

    assert_eq!(names.first(), Some(&"Atomic Structure"));
    assert_eq!(names.last(), Some(&"Equilibria (Advanced)"));
    assert!(names.contains(&"Nitrogen Compounds"));
}

#[test]
fn test_enumeration_is_stable() {
    assert_eq!(all_topic_names(), all_topic_names());
}

#[test]
fn test_every_listed_topic_resolves_to_itself() {
    for name in all_topic_names() {
        let notes = get_topic_notes(name).unwrap_or_else(|| panic!("{name} missing"));
        assert_eq!(notes.topic, name);
    }
}

#[test]
fn test_found_only_for_listed_names() {
    let names = all_topic_names();

    for name in &names {
        assert!(get_topic_notes(name).is_some());

        let upper = name.to_uppercase();
        if upper != *name {
            assert!(get_topic_notes(&upper).is_none());
        }
    }
    assert!(!names.contains(&"Organic Synthesis"));
}

#[test]
fn test_repeated_lookups_are_equal() {
    let first = get_topic_notes("Kinetics").cloned();
    let second = get_topic_notes("Kinetics").cloned();

    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_keys_are_unique() {
    let names = all_topic_names();
    let mut deduped = names.clone();
    deduped.sort_unstable();
    deduped.dedup();

    assert_eq!(deduped.len(), names.len());
    assert_eq!(Registry::builtin().len(), names.len());
}

#[test]
fn test_nitrogen_compounds_has_key_points() {
    let notes = get_topic_notes("Nitrogen Compounds").unwrap();
    assert!(!notes.key_points.is_empty());
}

#[test]
fn test_shipped_topics_are_complete() {
    for notes in Registry::builtin().iter() {
        assert!(!notes.summary.is_empty(), "{} has no summary", notes.topic);
        assert!(!notes.sections.is_empty(), "{} has no sections", notes.topic);
        assert!(!notes.key_points.is_empty(), "{} has no key points", notes.topic);
        assert!(!notes.exam_tips.is_empty(), "{} has no exam tips", notes.topic);

        for section in &notes.sections {
            assert!(section.diagrams.is_empty());
            assert!(section.subsections.is_empty());
        }
    }
}

#[test]
fn test_concurrent_readers_see_same_order() {
    let expected = all_topic_names();

    let handles: Vec<_> = (0..8)
        .map(|_| std::thread::spawn(all_topic_names))
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
