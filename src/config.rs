//! TOML configuration.
//!
//! ```toml
//! [corpus]
//! root = "./data/00.raw"
//! include_globs = ["**/*.xml"]
//!
//! [chunking]
//! max_tokens = 512
//!
//! [ingest]
//! on_error = "skip"
//!
//! [export]
//! path = "./out/sections.json"
//! format = "json"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorpusConfig {
    pub root: PathBuf,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.xml".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
        }
    }
}

/// Paragraph budget used when no config file is involved (`parse`, `get`).
pub const DEFAULT_MAX_TOKENS: usize = 512;

fn default_max_tokens() -> usize {
    DEFAULT_MAX_TOKENS
}

/// What a batch run does when one document fails to build.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Log the failure, record it in the summary, and continue.
    #[default]
    Skip,
    /// Stop the run at the first failing document.
    Abort,
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Skip => f.write_str("skip"),
            ErrorPolicy::Abort => f.write_str("abort"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IngestConfig {
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// One pretty-printed JSON document.
    #[default]
    Json,
    /// One record per line.
    Jsonl,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ExportConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub format: ExportFormat,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.chunking.max_tokens == 0 {
        anyhow::bail!("chunking.max_tokens must be > 0");
    }

    if config.corpus.include_globs.is_empty() {
        anyhow::bail!("corpus.include_globs must not be empty");
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let file = write_config("[corpus]\nroot = \"/data\"\n");
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.corpus.root, PathBuf::from("/data"));
        assert_eq!(cfg.corpus.include_globs, vec!["**/*.xml"]);
        assert_eq!(cfg.chunking.max_tokens, 512);
        assert_eq!(cfg.ingest.on_error, ErrorPolicy::Skip);
        assert_eq!(cfg.export.format, ExportFormat::Json);
        assert!(cfg.export.path.is_none());
    }

    #[test]
    fn explicit_policy_and_format() {
        let file = write_config(
            "[corpus]\nroot = \"/data\"\n[ingest]\non_error = \"abort\"\n[export]\npath = \"out.jsonl\"\nformat = \"jsonl\"\n",
        );
        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.ingest.on_error, ErrorPolicy::Abort);
        assert_eq!(cfg.export.format, ExportFormat::Jsonl);
        assert_eq!(cfg.export.path, Some(PathBuf::from("out.jsonl")));
    }

    #[test]
    fn zero_max_tokens_is_rejected() {
        let file = write_config("[corpus]\nroot = \"/data\"\n[chunking]\nmax_tokens = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_tokens"));
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let file = write_config("[corpus]\nroot = \"/data\"\n[ingest]\non_error = \"retry\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn missing_file_has_context() {
        let err = load_config(Path::new("/nonexistent/lawctx.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
