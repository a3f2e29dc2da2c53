//! Persistence boundary.
//!
//! [`RecordStore`] is what the create path writes through. Its error type only has to accept a
//! [`StampError`], so a host store keeps its own errors and they reach the caller unchanged.
//!
//! [`MemoryStore`] is a reference implementation holding records in a `Vec`. It behaves like
//! a single SQL table with a unique primary key:
//!
//! - an incrementing record with no key gets the next integer key,
//! - a record that still has no key is rejected,
//! - a key can only be inserted once, comparing keys the way [`Filter`] does (`7` and `"7"`
//!   are the same key).

use crate::query::{values_equal, Filter};
use crate::record::{scalar_text, HasPrimaryKeyField, Record, SupportsCreateHook};
use crate::{StampError, StampResult};
use serde_json::Value;

/// A collection of records that can be written and filtered.
pub trait RecordStore {
    type Error: From<StampError>;

    /// Writes a new record and returns it as stored.
    fn insert(&mut self, record: Record) -> Result<Record, Self::Error>;

    /// Replaces an existing record, matched by primary key, and returns it as stored.
    fn update(&mut self, record: Record) -> Result<Record, Self::Error>;

    /// Returns the first record matching `filter`.
    fn first(&self, filter: &Filter) -> Option<Record>;

    /// Returns every record matching `filter`, in insertion order.
    fn filter(&self, filter: &Filter) -> Vec<Record>;
}

/// In-memory [`RecordStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<Record>,
    last_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All stored records, in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn position_of(&self, key: &Value) -> Option<usize> {
        self.records
            .iter()
            .position(|r| r.key().is_some_and(|k| values_equal(k, key)))
    }

    fn next_id(&mut self) -> StampResult<u64> {
        let id = self
            .last_id
            .checked_add(1)
            .ok_or(StampError::KeySpaceExhausted(self.last_id))?;
        self.last_id = id;
        Ok(id)
    }
}

fn key_text(key: &Value) -> String {
    scalar_text(key).unwrap_or_else(|| key.to_string())
}

impl RecordStore for MemoryStore {
    type Error = StampError;

    fn insert(&mut self, mut record: Record) -> StampResult<Record> {
        if record.key().is_none() && record.incrementing() {
            let id = self.next_id()?;
            let key_name = record.key_name().to_owned();
            record.set(key_name, id);
        }

        let key = record
            .key()
            .cloned()
            .ok_or_else(|| StampError::MissingKey(record.key_name().to_owned()))?;

        if self.position_of(&key).is_some() {
            return Err(StampError::DuplicateKey(key_text(&key)));
        }
        if let Some(n) = key.as_u64() {
            self.last_id = self.last_id.max(n);
        }

        record.mark_exists();
        tracing::debug!(key = %key_text(&key), "inserted record");
        self.records.push(record.clone());
        Ok(record)
    }

    fn update(&mut self, record: Record) -> StampResult<Record> {
        let key = record
            .key()
            .cloned()
            .ok_or_else(|| StampError::MissingKey(record.key_name().to_owned()))?;
        let index = self
            .position_of(&key)
            .ok_or_else(|| StampError::RecordNotFound(key_text(&key)))?;

        tracing::debug!(key = %key_text(&key), "updated record");
        self.records[index] = record.clone();
        Ok(record)
    }

    fn first(&self, filter: &Filter) -> Option<Record> {
        self.records.iter().find(|r| filter.matches(*r)).cloned()
    }

    fn filter(&self, filter: &Filter) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| filter.matches(*r))
            .cloned()
            .collect()
    }
}
