//! Plain-text rendering of topic notes for the terminal.

use std::fmt::Write;

use crate::notes::{Section, TopicNotes};

const RULE_WIDTH: usize = 64;

/// Render notes as plain text. Section content is printed verbatim.
pub fn render_text(notes: &TopicNotes) -> String {
    let mut out = String::new();
    let rule = "=".repeat(RULE_WIDTH);

    // Writing to a String cannot fail
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "  {}", notes.topic);
    let _ = writeln!(out, "  {}", notes.subject);
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "\n{}", notes.summary.trim_end());

    if let Some(url) = &notes.audio_url {
        let _ = writeln!(out, "\nAudio: {}", url);
    }
    if let Some(url) = &notes.video_url {
        let _ = writeln!(out, "Video: {}", url);
    }

    for section in &notes.sections {
        render_section(&mut out, section, 0);
    }

    if !notes.key_points.is_empty() {
        let _ = writeln!(out, "\n--- KEY POINTS ---\n");
        for point in &notes.key_points {
            let _ = writeln!(out, "  * {}", point);
        }
    }

    if !notes.exam_tips.is_empty() {
        let _ = writeln!(out, "\n--- EXAM TIPS ---\n");
        for tip in &notes.exam_tips {
            let _ = writeln!(out, "  * {}", tip);
        }
    }

    out
}

fn render_section(out: &mut String, section: &Section, depth: usize) {
    let marker = "#".repeat(depth + 2);
    let _ = writeln!(out, "\n{} {}\n", marker, section.title);
    let _ = writeln!(out, "{}", section.content.trim_end());

    for sub in &section.subsections {
        render_section(out, sub, depth + 1);
    }
}
