//! The create path.
//!
//! [`ModelRepository`] binds a [`ModelDefinition`] to a [`RecordStore`] and is the only place
//! records are written. Creating a record runs the model's creating hook
//! ([`UuidPolicy::on_before_create`](crate::UuidPolicy::on_before_create)) and then inserts;
//! if the hook fails nothing is inserted.

use crate::model::ModelDefinition;
use crate::query::{filter_by_id_or_uuid, filter_by_uuid};
use crate::record::{Record, SupportsCreateHook};
use crate::store::RecordStore;
use crate::StampError;
use keystamp_uuid::{SystemUuidGenerator, UuidGenerator};
use serde_json::Value;

/// Record operations for one record type.
#[derive(Debug)]
pub struct ModelRepository<S, G = SystemUuidGenerator> {
    model: ModelDefinition,
    store: S,
    generator: G,
}

impl<S: RecordStore> ModelRepository<S> {
    /// Creates a repository generating UUIDs with a [`SystemUuidGenerator`].
    pub fn new(model: ModelDefinition, store: S) -> Self {
        Self::with_generator(model, store, SystemUuidGenerator::new())
    }
}

impl<S: RecordStore, G: UuidGenerator> ModelRepository<S, G> {
    pub fn with_generator(model: ModelDefinition, store: S, generator: G) -> Self {
        Self {
            model,
            store,
            generator,
        }
    }

    pub fn model(&self) -> &ModelDefinition {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Builds an empty record of this repository's type.
    pub fn new_record(&self) -> Record {
        self.model.new_record()
    }

    /// Builds a record of this repository's type from a JSON object.
    pub fn record_from_json(&self, attributes: Value) -> Result<Record, S::Error> {
        Ok(self.model.record_from_json(attributes)?)
    }

    /// Stamps `record` with a UUID and inserts it.
    ///
    /// # Errors
    ///
    /// - [`StampError::UnsupportedVersion`] if the model's version is not supported. The record
    ///   is not inserted.
    /// - [`StampError::InvalidInput`] if `record` has already been persisted.
    /// - Any error from the store, unchanged.
    pub fn create(&mut self, mut record: Record) -> Result<Record, S::Error> {
        if record.exists() {
            return Err(StampError::InvalidInput(format!(
                "{} record already exists, save it instead of creating it",
                self.model.name()
            ))
            .into());
        }

        if let Err(e) = self
            .model
            .policy()
            .on_before_create(&mut record, &self.generator)
        {
            tracing::warn!(model = self.model.name(), error = %e, "create aborted");
            return Err(e.into());
        }

        self.store.insert(record)
    }

    /// Creates `record` if it is new, otherwise updates it without re-stamping.
    pub fn save(&mut self, record: Record) -> Result<Record, S::Error> {
        if record.exists() {
            self.store.update(record)
        } else {
            self.create(record)
        }
    }

    /// Returns the first record whose `uuid` field equals `uuid`.
    pub fn find_by_uuid(&self, uuid: impl Into<Value>) -> Option<Record> {
        self.store.first(&filter_by_uuid(uuid))
    }

    /// Returns the first record whose primary key or `uuid` field equals `id_or_uuid`.
    pub fn find_by_id_or_uuid(&self, id_or_uuid: impl Into<Value>) -> Option<Record> {
        self.store
            .first(&filter_by_id_or_uuid(self.model.key_name(), id_or_uuid))
    }

    /// Returns every record whose `uuid` field equals `uuid`.
    pub fn filter_by_uuid(&self, uuid: impl Into<Value>) -> Vec<Record> {
        self.store.filter(&filter_by_uuid(uuid))
    }

    /// Returns every record whose primary key or `uuid` field equals `id_or_uuid`.
    pub fn filter_by_id_or_uuid(&self, id_or_uuid: impl Into<Value>) -> Vec<Record> {
        self.store
            .filter(&filter_by_id_or_uuid(self.model.key_name(), id_or_uuid))
    }
}
