//! Command-line interface for chemnotes.
//!
//! Provides commands for listing topics, showing a topic's notes,
//! searching, exporting for the front end and checking a content document.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::config::{self, ContentSource, OutputFormat};
use crate::notes::{Registry, TopicNotes};

pub mod render;

/// chemnotes - A-Level Chemistry revision notes
#[derive(Parser, Debug)]
#[command(name = "chemnotes")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all topics in declaration order
    List,

    /// Show the notes for a topic (exact, case-sensitive name)
    Show {
        /// Topic name, e.g. "Atomic Structure"
        topic: String,

        /// Output format (defaults to the configured format)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Search topics by name, summary or key points
    Search {
        /// Search query
        query: String,
    },

    /// Export every topic as JSON
    Export {
        /// Output file (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check the configured content document
    Validate,

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::List => list_topics().await,
            Commands::Show { topic, format } => show_topic(&topic, format).await,
            Commands::Search { query } => search_topics(&query).await,
            Commands::Export { output } => export_topics(output).await,
            Commands::Validate => validate_content().await,
            Commands::Config => show_config(),
        }
    }
}

/// Registry for the configured content source
async fn load_registry() -> Result<Cow<'static, Registry>> {
    load_registry_from(&config::config()?.content).await
}

/// Registry for a given content source
async fn load_registry_from(source: &ContentSource) -> Result<Cow<'static, Registry>> {
    match source {
        ContentSource::Builtin => Registry::try_builtin()
            .map(Cow::Borrowed)
            .map_err(|e| anyhow::anyhow!("Built-in content failed to decode: {}", e)),
        ContentSource::File(path) => {
            info!(path = %path.display(), "Loading content document");
            let registry = Registry::load(path)
                .await
                .with_context(|| format!("Failed to load content: {}", path.display()))?;
            Ok(Cow::Owned(registry))
        }
    }
}

/// List all topics
async fn list_topics() -> Result<()> {
    let registry = load_registry().await?;
    print!("{}", format_topic_list(&registry));
    Ok(())
}

/// Numbered topic list in declaration order
fn format_topic_list(registry: &Registry) -> String {
    if registry.is_empty() {
        return "No topics found\n".to_string();
    }

    let mut out = String::new();
    for (i, name) in registry.topic_names().iter().enumerate() {
        out.push_str(&format!("{:>3}. {}\n", i + 1, name));
    }
    out.push_str(&format!("\nTotal: {} topics\n", registry.len()));
    out
}

/// Show a single topic
async fn show_topic(topic: &str, format: Option<OutputFormat>) -> Result<()> {
    let registry = load_registry().await?;
    let format = match format {
        Some(format) => format,
        None => config::config()?.format()?,
    };

    print!("{}", format_topic(&registry, topic, format)?);
    Ok(())
}

/// Render one topic, or fail with "Topic not found"
fn format_topic(registry: &Registry, topic: &str, format: OutputFormat) -> Result<String> {
    let notes = registry.get(topic).ok_or_else(|| {
        let hint = did_you_mean(registry, topic)
            .map(|name| format!(" (did you mean \"{}\"?)", name))
            .unwrap_or_default();
        anyhow::anyhow!("Topic not found: {}{}", topic, hint)
    })?;

    match format {
        OutputFormat::Text => Ok(render::render_text(notes)),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(notes)?)),
    }
}

/// Suggest a topic whose name differs only by case or surrounding whitespace
fn did_you_mean<'a>(registry: &'a Registry, topic: &str) -> Option<&'a str> {
    let wanted = topic.trim().to_lowercase();
    registry
        .topic_names()
        .into_iter()
        .find(|name| name.to_lowercase() == wanted)
}

/// Search topics
async fn search_topics(query: &str) -> Result<()> {
    let registry = load_registry().await?;
    print!("{}", format_search(&registry, query));
    Ok(())
}

fn format_search(registry: &Registry, query: &str) -> String {
    let results = registry.search(query);

    if results.is_empty() {
        return format!("No results found for: {}\n", query);
    }

    let mut out = format!("Found {} result(s) for \"{}\":\n\n", results.len(), query);
    for notes in &results {
        out.push_str(&format!("  {}\n", notes.topic));
    }
    out
}

/// Export all topics as JSON
async fn export_topics(output: Option<PathBuf>) -> Result<()> {
    let registry = load_registry().await?;

    match output {
        Some(path) => {
            write_export(&registry, &path).await?;
            eprintln!("Exported {} topics to {}", registry.len(), path.display());
        }
        None => println!("{}", registry.to_json_pretty()?),
    }

    Ok(())
}

/// Write the JSON export, creating parent directories as needed
async fn write_export(registry: &Registry, path: &Path) -> Result<()> {
    let json = registry.to_json_pretty()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write export: {}", path.display()))?;

    Ok(())
}

/// Topics that are missing one of the list fields
pub fn incomplete_topics(registry: &Registry) -> Vec<(&str, Vec<&'static str>)> {
    registry
        .iter()
        .filter_map(|notes| {
            let missing = missing_fields(notes);
            (!missing.is_empty()).then_some((notes.topic.as_str(), missing))
        })
        .collect()
}

fn missing_fields(notes: &TopicNotes) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if notes.sections.is_empty() {
        missing.push("sections");
    }
    if notes.key_points.is_empty() {
        missing.push("key_points");
    }
    if notes.exam_tips.is_empty() {
        missing.push("exam_tips");
    }
    missing
}

/// Check the configured content document
async fn validate_content() -> Result<()> {
    let cfg = config::config()?;
    let registry = load_registry_from(&cfg.content).await?;

    for (topic, missing) in incomplete_topics(&registry) {
        warn!(%topic, missing = ?missing, "Topic has empty fields");
    }
    print!("{}", validation_report(&registry, &cfg.content));

    Ok(())
}

fn validation_report(registry: &Registry, source: &ContentSource) -> String {
    let mut out = format!("Content: {}\n", source);
    out.push_str(&format!("Topics:  {}\n", registry.len()));
    out.push_str(&format!(
        "Sections: {}\n",
        registry.iter().map(|t| t.sections.len()).sum::<usize>()
    ));

    let incomplete = incomplete_topics(registry);
    if incomplete.is_empty() {
        out.push_str("\nAll topics have sections, key points and exam tips\n");
    } else {
        out.push('\n');
        for (topic, missing) in &incomplete {
            out.push_str(&format!("  {}: no {}\n", topic, missing.join(", ")));
        }
    }
    out
}

/// Show the resolved configuration (for debugging)
fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("chemnotes configuration");
    println!();
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!("Content:     {}", cfg.content);
    match cfg.format() {
        Ok(format) => println!("Format:      {}", format),
        Err(e) => println!("Format:      (invalid: {})", e),
    }

    Ok(())
}
