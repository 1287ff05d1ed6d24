//! Configuration for the chemnotes CLI.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (CHEMNOTES_CONTENT, CHEMNOTES_FORMAT)
//! 2. Config file (.chemnotes/config.yaml)
//! 3. Defaults (built-in content, text output)
//!
//! Config file discovery:
//! - Searches current directory and parents for .chemnotes/config.yaml
//! - Falls back to <user config dir>/chemnotes/config.yaml
//! - Paths in a project config file are relative to the project root
//!   (the parent of .chemnotes/)

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    /// Alternative content document (relative to the project root)
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<String>,
}

/// How the CLI renders a topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,

    /// Pretty-printed JSON
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => anyhow::bail!("Unknown output format: {}", s),
        }
    }
}

/// Where notes are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ContentSource {
    /// Content compiled into the binary
    #[default]
    Builtin,

    /// A content document on disk
    File(PathBuf),
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::Builtin => write!(f, "(built-in)"),
            ContentSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    /// Content document to serve
    pub content: ContentSource,
    /// Configured output format, parsed on use by [`ResolvedConfig::format`]
    pub output_format: Option<String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Default output format.
    ///
    /// Only commands that fall back to the configured format see an invalid
    /// setting as an error.
    pub fn format(&self) -> Result<OutputFormat> {
        match &self.output_format {
            Some(s) => s.parse(),
            None => Ok(OutputFormat::default()),
        }
    }
}

/// Find config file by searching `start` and its parents, then the user config dir
fn find_config_file_from(start: &Path, user_config_dir: Option<&Path>) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".chemnotes").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    let user_config = user_config_dir?.join("chemnotes").join("config.yaml");
    user_config.exists().then_some(user_config)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config file's project root
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge a parsed config file with environment overrides
fn resolve(
    config_path: Option<&Path>,
    file: Option<ConfigFile>,
    env_content: Option<String>,
    env_format: Option<String>,
) -> ResolvedConfig {
    // Base directory is the parent of .chemnotes/ (i.e., grandparent of config.yaml)
    let base_dir = config_path
        .and_then(|p| p.parent())
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));

    let content = if let Some(env_path) = env_content {
        ContentSource::File(PathBuf::from(env_path))
    } else if let Some(path) = file.as_ref().and_then(|f| f.content.path.as_deref()) {
        ContentSource::File(resolve_path(base_dir, path))
    } else {
        ContentSource::Builtin
    };

    let output_format = env_format.or_else(|| {
        file.as_ref()
            .and_then(|f| f.output.as_ref())
            .and_then(|o| o.format.clone())
    });

    ResolvedConfig {
        content,
        output_format,
        config_file: config_path.map(Path::to_path_buf),
    }
}

/// Load configuration, searching for a config file from `start`
fn load_config_from(
    start: &Path,
    user_config_dir: Option<&Path>,
    env_content: Option<String>,
    env_format: Option<String>,
) -> Result<ResolvedConfig> {
    let config_file = find_config_file_from(start, user_config_dir);

    let file = match config_file {
        Some(ref path) => Some(load_config_file(path)?),
        None => None,
    };

    Ok(resolve(config_file.as_deref(), file, env_content, env_format))
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;

    load_config_from(
        &cwd,
        dirs::config_dir().as_deref(),
        std::env::var("CHEMNOTES_CONTENT").ok(),
        std::env::var("CHEMNOTES_FORMAT").ok(),
    )
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}
