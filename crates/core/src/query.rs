//! Query helpers for looking records up by UUID or primary key.
//!
//! These only build [`Filter`] values; evaluating them is the store's job. Equality between a
//! JSON number and a JSON string holds when their text matches, so `"7"` finds a record keyed
//! by `7`. A missing or `null` field never matches.

use crate::constants::DEFAULT_UUID_FIELD;
use crate::record::{scalar_text, HasMutableFields, Record};
use crate::store::RecordStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A predicate over a record's fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// The field equals the value.
    Eq { field: String, value: Value },
    /// Either side matches.
    Or(Box<Filter>, Box<Filter>),
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn or(self, other: Filter) -> Self {
        Filter::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the filter against `record`.
    pub fn matches<R>(&self, record: &R) -> bool
    where
        R: HasMutableFields + ?Sized,
    {
        match self {
            Filter::Eq { field, value } => record
                .get_field(field)
                .is_some_and(|actual| values_equal(actual, value)),
            Filter::Or(left, right) => left.matches(record) || right.matches(record),
        }
    }
}

pub(crate) fn values_equal(actual: &Value, expected: &Value) -> bool {
    if actual.is_null() || expected.is_null() {
        return false;
    }
    if actual == expected {
        return true;
    }
    match (actual, expected) {
        (Value::Number(_), Value::String(_)) | (Value::String(_), Value::Number(_)) => {
            scalar_text(actual) == scalar_text(expected)
        }
        _ => false,
    }
}

/// Matches records whose default UUID field equals `uuid`.
pub fn filter_by_uuid(uuid: impl Into<Value>) -> Filter {
    Filter::eq(DEFAULT_UUID_FIELD, uuid)
}

/// Matches records whose primary key `key_name` or default UUID field equals `id_or_uuid`.
pub fn filter_by_id_or_uuid(key_name: &str, id_or_uuid: impl Into<Value>) -> Filter {
    let value = id_or_uuid.into();
    Filter::eq(key_name, value.clone()).or(filter_by_uuid(value))
}

/// Returns the first record in `store` whose default UUID field equals `uuid`.
pub fn find_by_uuid<S>(store: &S, uuid: impl Into<Value>) -> Option<Record>
where
    S: RecordStore + ?Sized,
{
    store.first(&filter_by_uuid(uuid))
}
