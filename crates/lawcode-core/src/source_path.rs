//! Decoding of jurisdiction, law type, and title from a document path.
//!
//! Corpus documents live under a fixed directory convention:
//!
//! ```text
//! <anything>/<state>-<lawtype>/<title_with_underscores>/.../<file>.xml
//! ```
//!
//! e.g. `data/00.raw/ny-laws/abandoned_property/2024/ny/abandoned_property.xml`.
//! Decoding is purely lexical; existence of the file is checked by the loader.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HierarchyError;

/// Whether a document is a statute or an administrative regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LawType {
    Laws,
    Regs,
}

impl LawType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LawType::Laws => "laws",
            LawType::Regs => "regs",
        }
    }
}

impl fmt::Display for LawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LawType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "laws" => Ok(LawType::Laws),
            "regs" => Ok(LawType::Regs),
            other => Err(format!(
                "unknown law type `{other}` (expected `laws` or `regs`)"
            )),
        }
    }
}

/// Where a document came from and what it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub path: PathBuf,
    /// Two-letter jurisdiction code, as written in the path (e.g. `ny`).
    pub state: String,
    pub law_type: LawType,
    /// Raw title directory name (e.g. `abandoned_property`).
    pub title_slug: String,
    /// Human-readable title (e.g. `abandoned property`).
    pub title: String,
}

impl SourceInfo {
    /// Decode a document path.
    ///
    /// # Errors
    ///
    /// [`HierarchyError::InvalidFormat`] when no `<state>-<lawtype>`
    /// segment is present, none of the candidates has a `laws`/`regs` law
    /// type (the one closest to the file is reported), or the title
    /// directory that must follow it is missing.
    pub fn from_path(path: &Path) -> Result<Self, HierarchyError> {
        let segments: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        // Ancestors outside the corpus may look like `my-work`; the first
        // segment whose suffix is a known law type wins.
        let mut rejected: Option<String> = None;
        let mut found = None;
        for (i, seg) in segments.iter().enumerate() {
            let Some((state, raw)) = split_jurisdiction(seg) else {
                continue;
            };
            match raw.parse::<LawType>() {
                Ok(law_type) => {
                    found = Some((i, state, raw, law_type));
                    break;
                }
                Err(reason) => rejected = Some(reason),
            }
        }

        let (pos, state, law_type_raw, law_type) = match (found, rejected) {
            (Some(hit), _) => hit,
            (None, Some(reason)) => return Err(HierarchyError::invalid_format(path, reason)),
            (None, None) => {
                return Err(HierarchyError::invalid_format(
                    path,
                    "missing `<state>-<lawtype>` segment",
                ))
            }
        };

        // The title must be a directory below the jurisdiction segment,
        // never the document file itself.
        let title_slug = match segments.get(pos + 1) {
            Some(slug) if pos + 2 < segments.len() => slug.clone(),
            _ => {
                return Err(HierarchyError::invalid_format(
                    path,
                    format!("missing title directory after `{state}-{law_type_raw}`"),
                ))
            }
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: state.to_string(),
            law_type,
            title: title_slug.replace('_', " "),
            title_slug,
        })
    }

    /// `<state>-<lawtype>` label used in summaries.
    pub fn jurisdiction(&self) -> String {
        format!("{}-{}", self.state, self.law_type)
    }
}

/// Split `ny-laws` into `("ny", "laws")`. Only segments made of exactly two
/// non-empty hyphen-joined parts whose first part is a two-letter
/// alphabetic code qualify; the law type is validated by the caller.
fn split_jurisdiction(segment: &str) -> Option<(&str, &str)> {
    let mut parts = segment.split('-');
    let state = parts.next()?;
    let law_type = parts.next()?;
    if parts.next().is_some() || law_type.is_empty() {
        return None;
    }
    let is_state = state.len() == 2 && state.chars().all(|c| c.is_ascii_alphabetic());
    is_state.then_some((state, law_type))
}
