//! Note records served by the registry.
//!
//! Field names on the wire match what the front end already consumes, so the
//! media URLs keep their camelCase names while the lists stay snake_case.

use serde::{Deserialize, Serialize};

/// Notes for a single topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNotes {
    /// Human-readable title, identical to the registry key
    pub topic: String,

    /// Course the topic belongs to (e.g. "A Level Chemistry")
    pub subject: String,

    /// One-paragraph overview
    pub summary: String,

    /// Pre-signed audio narration URL (opaque)
    #[serde(rename = "audioUrl", default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Pre-signed video URL (opaque)
    #[serde(rename = "videoUrl", default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,

    /// Sections in presentation order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Flattened bullet facts
    #[serde(default)]
    pub key_points: Vec<String>,

    /// Flattened exam advice
    #[serde(default)]
    pub exam_tips: Vec<String>,
}

impl TopicNotes {
    /// Create notes with no sections, key points or exam tips
    pub fn new(
        topic: impl Into<String>,
        subject: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            topic: topic.into(),
            subject: subject.into(),
            summary: summary.into(),
            audio_url: None,
            video_url: None,
            sections: Vec::new(),
            key_points: Vec::new(),
            exam_tips: Vec::new(),
        }
    }

    /// Append a section
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Append a key point
    pub fn with_key_point(mut self, point: impl Into<String>) -> Self {
        self.key_points.push(point.into());
        self
    }

    /// Append an exam tip
    pub fn with_exam_tip(mut self, tip: impl Into<String>) -> Self {
        self.exam_tips.push(tip.into());
        self
    }

    /// Set the audio URL
    pub fn with_audio_url(mut self, url: impl Into<String>) -> Self {
        self.audio_url = Some(url.into());
        self
    }

    /// Set the video URL
    pub fn with_video_url(mut self, url: impl Into<String>) -> Self {
        self.video_url = Some(url.into());
        self
    }

    /// Case-insensitive substring match over topic, summary and key points.
    ///
    /// `query_lower` must already be lowercased.
    pub(crate) fn matches(&self, query_lower: &str) -> bool {
        self.topic.to_lowercase().contains(query_lower)
            || self.summary.to_lowercase().contains(query_lower)
            || self
                .key_points
                .iter()
                .any(|p| p.to_lowercase().contains(query_lower))
    }
}

/// A titled block of topic content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading
    pub title: String,

    /// Body text; may carry lightweight markup which is passed through untouched
    pub content: String,

    /// Reserved for diagram references (always empty in shipped content)
    #[serde(default)]
    pub diagrams: Vec<serde_json::Value>,

    /// Reserved for nested sections (always empty in shipped content)
    #[serde(default)]
    pub subsections: Vec<Section>,
}

impl Section {
    /// Create a section with no diagrams or subsections
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            diagrams: Vec::new(),
            subsections: Vec::new(),
        }
    }
}
