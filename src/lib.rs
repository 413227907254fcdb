//! # Lawcode Harness
//!
//! Turns a corpus of state legal-code XML into addressable,
//! retrieval-ready sections.
//!
//! Each document is parsed into a tree of `code` containers, every section
//! gets a stable content-derived id and its hierarchical title, and the
//! leaf sections are chunked into paragraphs and exported for an indexing
//! backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌──────────────┐   ┌──────────┐
//! │   Corpus    │──▶│  XML parse  │──▶│  Hierarchy   │──▶│  Store   │
//! │ <st>-<type> │   │ (quick-xml) │   │ ids + titles │   │ upsert   │
//! └─────────────┘   └─────────────┘   └──────────────┘   └────┬─────┘
//!                                                             │
//!                                                             ▼
//!                                                       ┌──────────┐
//!                                                       │  Export  │
//!                                                       │json/jsonl│
//!                                                       └──────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! lawctx parse data/ny-laws/general/general.xml   # show the section tree
//! lawctx get data/ny-laws/general/general.xml 0/1 # one section
//! lawctx sources                                  # corpus health
//! lawctx ingest --output out/sections.json        # full run
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`corpus`] | Corpus discovery |
//! | [`xml`] | XML reader producing the element tree |
//! | [`document`] | Load one document into a hierarchy |
//! | [`ingest`] | Corpus ingestion pipeline |
//! | [`export`] | JSON / JSONL export |
//! | [`progress`] | Progress reporting on stderr |
//! | [`stats`] | Ingest summary |
//! | [`sources`] | Corpus health listing |
//! | [`get`] | Single-document inspection |

pub mod config;
pub mod corpus;
pub mod document;
pub mod export;
pub mod get;
pub mod ingest;
pub mod progress;
pub mod sources;
pub mod stats;
pub mod xml;
