//! Record capabilities and the reference record type.
//!
//! The UUID policy does not own records. It works against three small capability traits that
//! any host persistence layer can implement for its own model type:
//!
//! - [`HasMutableFields`]: read and write named field values.
//! - [`HasPrimaryKeyField`]: the primary-key field name and the auto-increment flag.
//! - [`SupportsCreateHook`]: whether the record has been persisted yet, so the creating hook
//!   fires only once.
//!
//! [`Record`] is the implementation used by the bundled [`MemoryStore`](crate::MemoryStore)
//! and the CLI: a keyed bag of JSON values.

use crate::{StampError, StampResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read/write access to a record's named fields.
pub trait HasMutableFields {
    /// Returns the value stored under `name`, if any.
    fn get_field(&self, name: &str) -> Option<&Value>;

    /// Stores `value` under `name`, replacing any previous value.
    fn set_field(&mut self, name: &str, value: Value);
}

/// Access to a record type's primary-key configuration.
pub trait HasPrimaryKeyField {
    /// Name of the primary-key field.
    fn key_name(&self) -> &str;

    /// Whether the persistence layer assigns the primary key by auto-increment.
    fn incrementing(&self) -> bool;

    /// Enables or disables auto-increment of the primary key.
    fn set_incrementing(&mut self, incrementing: bool);
}

/// Persistence state needed to fire the creating hook exactly once.
pub trait SupportsCreateHook {
    /// True once the record has been written to storage.
    fn exists(&self) -> bool;

    /// Marks the record as written.
    fn mark_exists(&mut self);
}

/// A mutable keyed bag of field values with a designated primary-key field.
///
/// New records are incrementing and not yet persisted. Prefer
/// [`ModelDefinition::new_record`](crate::ModelDefinition::new_record), which also applies the
/// model's UUID increment policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    key_name: String,
    incrementing: bool,
    #[serde(default)]
    exists: bool,
    #[serde(default)]
    attributes: Map<String, Value>,
}

impl Record {
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            incrementing: true,
            exists: false,
            attributes: Map::new(),
        }
    }

    /// Builds a record from a JSON object of attributes.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::InvalidInput`] if `value` is not a JSON object.
    pub fn from_json(key_name: impl Into<String>, value: Value) -> StampResult<Self> {
        match value {
            Value::Object(attributes) => {
                let mut record = Self::new(key_name);
                record.attributes = attributes;
                Ok(record)
            }
            other => Err(StampError::InvalidInput(format!(
                "record must be a JSON object, got: {}",
                other
            ))),
        }
    }

    /// Sets several attributes at once.
    pub fn fill<K, I>(&mut self, attributes: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        for (name, value) in attributes {
            self.attributes.insert(name.into(), value);
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns the primary-key value, treating JSON `null` as unset.
    pub fn key(&self) -> Option<&Value> {
        self.get(&self.key_name).filter(|v| !v.is_null())
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Returns the attributes as a JSON object.
    pub fn to_json(&self) -> Value {
        Value::Object(self.attributes.clone())
    }
}

impl HasMutableFields for Record {
    fn get_field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }

    fn set_field(&mut self, name: &str, value: Value) {
        self.attributes.insert(name.to_owned(), value);
    }
}

impl HasPrimaryKeyField for Record {
    fn key_name(&self) -> &str {
        &self.key_name
    }

    fn incrementing(&self) -> bool {
        self.incrementing
    }

    fn set_incrementing(&mut self, incrementing: bool) {
        self.incrementing = incrementing;
    }
}

impl SupportsCreateHook for Record {
    fn exists(&self) -> bool {
        self.exists
    }

    fn mark_exists(&mut self) {
        self.exists = true;
    }
}

/// Renders a scalar field value as text: strings unquoted, numbers and booleans as written.
///
/// Returns `None` for `null`, arrays and objects.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
