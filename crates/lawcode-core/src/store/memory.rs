//! In-memory [`SectionStore`] used by batch ingestion and tests.
//!
//! Records live in a `Vec` (first-insertion order) with a `HashMap` from id
//! to slot, behind a `RwLock`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{anyhow, Result};
use uuid::Uuid;

use crate::models::SectionRecord;

use super::{SectionStore, UpsertOutcome};

#[derive(Default)]
struct Inner {
    slots: HashMap<Uuid, usize>,
    records: Vec<SectionRecord>,
}

/// Thread-safe in-memory section store.
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| anyhow!("section store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| anyhow!("section store lock poisoned"))
    }
}

impl SectionStore for InMemoryStore {
    fn upsert(&self, record: SectionRecord) -> Result<UpsertOutcome> {
        let mut inner = self.write()?;
        let existing = inner.slots.get(&record.section_id).copied();
        if let Some(slot) = existing {
            if inner.records[slot] == record {
                return Ok(UpsertOutcome::Unchanged);
            }
            inner.records[slot] = record;
            return Ok(UpsertOutcome::Updated);
        }
        let slot = inner.records.len();
        inner.slots.insert(record.section_id, slot);
        inner.records.push(record);
        Ok(UpsertOutcome::Inserted)
    }

    fn get(&self, id: &Uuid) -> Result<Option<SectionRecord>> {
        let inner = self.read()?;
        Ok(inner.slots.get(id).map(|&slot| inner.records[slot].clone()))
    }

    fn records(&self) -> Result<Vec<SectionRecord>> {
        Ok(self.read()?.records.clone())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.read()?.records.len())
    }
}
