//! Record type definitions.

use crate::constants::DEFAULT_KEY_NAME;
use crate::policy::UuidPolicy;
use crate::record::{HasPrimaryKeyField, Record};
use crate::StampResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Static configuration of one record type.
///
/// Set once when the type is defined and shared by every record of that type. Records built
/// through [`ModelDefinition::new_record`] already have the policy's increment rule applied, so
/// a primary-key UUID never meets an auto-increment key at write time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDefinition {
    name: String,
    key_name: String,
    incrementing: bool,
    #[serde(default)]
    policy: UuidPolicy,
}

impl ModelDefinition {
    /// Defines a record type keyed by `id`, auto-incrementing, with the default policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key_name: DEFAULT_KEY_NAME.to_owned(),
            incrementing: true,
            policy: UuidPolicy::default(),
        }
    }

    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    pub fn with_incrementing(mut self, incrementing: bool) -> Self {
        self.incrementing = incrementing;
        self
    }

    pub fn with_policy(mut self, policy: UuidPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn policy(&self) -> &UuidPolicy {
        &self.policy
    }

    /// Whether records of this type auto-increment their key once the policy is applied.
    pub fn incrementing(&self) -> bool {
        self.incrementing && !self.policy.stamps_primary_key(&self.key_name)
    }

    /// The field new records are stamped into.
    pub fn uuid_field(&self) -> &str {
        self.policy.uuid_field_for(&self.key_name)
    }

    /// Builds an empty record of this type.
    pub fn new_record(&self) -> Record {
        let mut record = Record::new(self.key_name.clone());
        record.set_incrementing(self.incrementing);
        self.policy.apply_increment_policy(&mut record);
        record
    }

    /// Builds a record of this type from a JSON object of attributes.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::InvalidInput`](crate::StampError::InvalidInput) if `attributes` is
    /// not a JSON object.
    pub fn record_from_json(&self, attributes: Value) -> StampResult<Record> {
        let mut record = Record::from_json(self.key_name.clone(), attributes)?;
        record.set_incrementing(self.incrementing);
        self.policy.apply_increment_policy(&mut record);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_definition_stamps_primary_key() {
        let model = ModelDefinition::new("users");
        let record = model.new_record();

        assert_eq!(model.uuid_field(), "id");
        assert!(!model.incrementing());
        assert!(!record.incrementing());
    }

    #[test]
    fn test_custom_field_keeps_incrementing() {
        let model =
            ModelDefinition::new("users").with_policy(UuidPolicy::new().with_uuid_field("uuid"));
        let record = model.new_record();

        assert_eq!(model.uuid_field(), "uuid");
        assert!(model.incrementing());
        assert!(record.incrementing());
    }

    #[test]
    fn test_custom_key_name() {
        let model = ModelDefinition::new("users").with_key_name("user_id");
        let record = model.new_record();

        assert_eq!(record.key_name(), "user_id");
        assert_eq!(model.uuid_field(), "user_id");
        assert!(!record.incrementing());
    }

    #[test]
    fn test_non_incrementing_type_stays_non_incrementing() {
        let model = ModelDefinition::new("users")
            .with_incrementing(false)
            .with_policy(UuidPolicy::new().with_uuid_field("uuid"));

        assert!(!model.new_record().incrementing());
    }

    #[test]
    fn test_record_from_json_applies_policy() {
        let model = ModelDefinition::new("users");
        let record = model
            .record_from_json(json!({"name": "Test Name"}))
            .unwrap();

        assert_eq!(record.get("name"), Some(&json!("Test Name")));
        assert!(!record.incrementing());
    }

    #[test]
    fn test_serde_defaults_policy() {
        let model: ModelDefinition = serde_json::from_value(json!({
            "name": "users",
            "key_name": "id",
            "incrementing": true
        }))
        .unwrap();

        assert_eq!(model.policy(), &UuidPolicy::default());
    }
}
