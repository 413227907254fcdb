//! Storage abstraction for section records.
//!
//! The [`SectionStore`] trait is the seam between ingestion and whatever
//! index sits downstream (a vector database, a JSON export, tests). Records
//! are keyed by `section_id`, so re-ingesting an unchanged document is an
//! idempotent no-op rather than a source of duplicates.
//!
//! Implementations must be `Send + Sync`; callers may ingest documents from
//! several threads into one store.

pub mod memory;

use anyhow::Result;
use serde::Serialize;
use uuid::Uuid;

use crate::models::SectionRecord;

/// What an upsert did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No record with this id existed.
    Inserted,
    /// A record existed and its content or metadata changed.
    Updated,
    /// An identical record was already stored.
    Unchanged,
}

/// Abstract section store.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`upsert`](SectionStore::upsert) | Insert or replace a record by id |
/// | [`get`](SectionStore::get) | Fetch one record by id |
/// | [`records`](SectionStore::records) | All records, in first-insertion order |
/// | [`len`](SectionStore::len) | Number of distinct records |
pub trait SectionStore: Send + Sync {
    fn upsert(&self, record: SectionRecord) -> Result<UpsertOutcome>;

    fn get(&self, id: &Uuid) -> Result<Option<SectionRecord>>;

    fn records(&self) -> Result<Vec<SectionRecord>>;

    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
