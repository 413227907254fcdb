//! Label cleaning and deterministic section identifiers.
//!
//! Hierarchical strings are composed from ancestor labels and then cleaned
//! with [`clean_label`]. Identifiers are derived from a stricter
//! normalization ([`normalize_for_id`]) so cosmetic differences in spacing,
//! case, or apostrophes never change a section's id.

use sha2::{Digest, Sha256};
use uuid::{Builder, Uuid};

/// Separator between ancestor and own labels in the title chain.
pub const TITLE_SEPARATOR: &str = " - ";

/// Separator used by the name and number chains.
pub const PATH_SEPARATOR: &str = " -> ";

/// Trim, collapse literal double spaces once, and strip line breaks.
///
/// The collapse is a single left-to-right pass of `"  "` → `" "`, so four
/// spaces become two. Source documents rarely contain more than a doubled
/// space and the output must stay stable across releases.
pub fn clean_label(raw: &str) -> String {
    raw.trim()
        .replace("  ", " ")
        .replace(['\n', '\r'], "")
        .trim()
        .to_string()
}

/// Join an ancestor chain and an own label with `separator`, then clean.
///
/// An empty prefix contributes nothing, so a top-level label is not preceded
/// by a dangling separator.
pub fn compose(prefix: &str, own: &str, separator: &str) -> String {
    if prefix.is_empty() {
        clean_label(own)
    } else {
        clean_label(&format!("{prefix}{separator}{own}"))
    }
}

/// `"<number> <name>"`, cleaned.
pub fn own_title(number: &str, name: &str) -> String {
    clean_label(&format!("{number} {name}"))
}

/// Normalization applied before hashing: trim, lowercase, drop apostrophes,
/// drop every whitespace character.
pub fn normalize_for_id(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| *c != '\'' && !c.is_whitespace())
        .collect()
}

/// Derive the stable id of a section from its hierarchical title and version.
///
/// The first 16 bytes of `sha256(normalize_for_id(title) + "-v" + version)`
/// are laid out as a version-4 UUID.
pub fn section_id(hierarchical_title: &str, version: &str) -> Uuid {
    let key = format!("{}-v{}", normalize_for_id(hierarchical_title), version);
    let digest = Sha256::digest(key.as_bytes());
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&digest[..16]);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Hex-encoded SHA-256 of `text`, used for content change detection.
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}
