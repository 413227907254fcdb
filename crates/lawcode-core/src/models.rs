//! Core data models: sections of a parsed legal code and the records handed
//! to indexing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::source_path::LawType;

/// Position of a [`Section`] inside its [`Hierarchy`](crate::hierarchy::Hierarchy) arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SectionIndex(pub usize);

/// One container or leaf of a parsed legal code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: Uuid,
    pub name: String,
    pub number: String,
    pub version: String,
    pub hierarchical_name: String,
    pub hierarchical_number: String,
    pub hierarchical_title: String,
    /// Concatenated `codetext` of a leaf; empty for containers.
    pub content: String,
    /// Child-index path from the root, e.g. `0/1/2` (empty for the root).
    pub locator: String,
    pub depth: usize,
    /// Back-reference to the owning container; `None` only for the root.
    pub parent: Option<SectionIndex>,
    pub children: Vec<SectionIndex>,
}

impl Section {
    /// Leaves are the retrievable units. The root is never one, even when
    /// the document has no containers.
    pub fn is_leaf(&self) -> bool {
        self.parent.is_some() && self.children.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// A retrieval paragraph cut from a leaf section's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// `<section_id>_<index>`.
    pub paragraph_id: String,
    pub index: usize,
    pub text: String,
    /// SHA-256 of `text`, for embedding staleness detection.
    pub hash: String,
}

/// Flattened leaf section as consumed by an indexing backend, keyed by
/// `section_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub section_id: Uuid,
    pub state: String,
    pub law_type: LawType,
    pub title: String,
    pub name: String,
    pub number: String,
    pub version: String,
    pub hierarchical_name: String,
    pub hierarchical_number: String,
    pub hierarchical_title: String,
    pub locator: String,
    pub source_path: String,
    pub content: String,
    pub content_hash: String,
    pub paragraphs: Vec<Paragraph>,
}
