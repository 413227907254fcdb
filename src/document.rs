//! Loading a single legal-code document from disk into a [`Hierarchy`].
//!
//! Checks run in a fixed order so the reported error is predictable:
//! existence, path convention, XML well-formedness, then hierarchy shape.

use std::path::Path;

use lawcode_core::{Hierarchy, HierarchyError, SourceInfo};
use tracing::debug;

use crate::xml::parse_document;

/// Read, parse, and build the hierarchy of the document at `path`.
///
/// # Errors
///
/// - [`HierarchyError::NotFound`] if `path` does not exist.
/// - [`HierarchyError::InvalidFormat`] if the path does not follow the
///   `<state>-<lawtype>/<title>/` convention.
/// - [`HierarchyError::Io`] if the file cannot be read.
/// - [`HierarchyError::MalformedDocument`] if the XML is not well-formed or
///   has no `type="Root"` element.
pub fn load_hierarchy(path: &Path) -> Result<Hierarchy, HierarchyError> {
    if !path.exists() {
        return Err(HierarchyError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let source = SourceInfo::from_path(path)?;

    let bytes = std::fs::read(path)?;
    let document = parse_document(&bytes).map_err(|e| HierarchyError::MalformedDocument {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "parsed document");
    Hierarchy::build(&document, source)
}
