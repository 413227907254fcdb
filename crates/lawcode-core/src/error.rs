//! Error taxonomy for hierarchy construction and lookup.
//!
//! Every failure is fatal to the single document being processed; whether a
//! batch continues past it is decided by the caller (see the harness
//! ingestion pipeline).

use std::path::PathBuf;

/// Errors raised while decoding, building, or addressing a [`Hierarchy`](crate::hierarchy::Hierarchy).
#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    /// The source document does not exist.
    #[error("document not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The document path does not follow the `<state>-<lawtype>/<title>/` convention.
    #[error("invalid document path {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// The document cannot be turned into a hierarchy (no root marker,
    /// unparseable XML, or a section without a derivable title).
    #[error("malformed document {}: {reason}", path.display())]
    MalformedDocument { path: PathBuf, reason: String },

    /// A locator step references a child index that does not exist.
    #[error("locator `{locator}`: index {index} out of range at depth {depth} ({len} children)")]
    IndexOutOfRange {
        locator: String,
        depth: usize,
        index: usize,
        len: usize,
    },

    /// A locator segment is not a non-negative integer.
    #[error("locator `{locator}`: invalid segment `{segment}`")]
    InvalidLocator { locator: String, segment: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl HierarchyError {
    /// Short stable label for the error class, used in ingest summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            HierarchyError::NotFound { .. } => "not_found",
            HierarchyError::InvalidFormat { .. } => "invalid_format",
            HierarchyError::MalformedDocument { .. } => "malformed_document",
            HierarchyError::IndexOutOfRange { .. } => "index_out_of_range",
            HierarchyError::InvalidLocator { .. } => "invalid_locator",
            HierarchyError::Io(_) => "io",
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        HierarchyError::MalformedDocument {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        HierarchyError::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
