//! # Lawcode Core
//!
//! I/O-free logic for Lawcode Harness: turning a parsed legal-code document
//! into a hierarchy of addressable sections with stable ids, chunking leaf
//! text for retrieval, and the store trait ingestion writes into.
//!
//! Parsing XML and reading files is the harness crate's job; this crate
//! works on any tree implementing [`element::DocumentNode`].
//!
//! ```rust
//! use std::path::Path;
//! use lawcode_core::element::Element;
//! use lawcode_core::hierarchy::Hierarchy;
//!
//! let doc = Element::new("code")
//!     .with_attr("type", "Root")
//!     .with_child(Element::leaf("name", "NY Code"))
//!     .with_child(
//!         Element::new("code")
//!             .with_child(Element::leaf("number", "1"))
//!             .with_child(Element::leaf("name", "General"))
//!             .with_child(Element::leaf("codetext", "A term means...")),
//!     );
//! let h = Hierarchy::from_document(&doc, Path::new("data/ny-laws/general/general.xml")).unwrap();
//! assert_eq!(h.sections().next().unwrap().hierarchical_title, "1 General");
//! ```

pub mod chunk;
pub mod element;
pub mod error;
pub mod hierarchy;
pub mod models;
pub mod normalize;
pub mod source_path;
pub mod store;

pub use error::HierarchyError;
pub use hierarchy::Hierarchy;
pub use models::{Paragraph, Section, SectionIndex, SectionRecord};
pub use source_path::{LawType, SourceInfo};
