//! UUID stamping policy.
//!
//! A [`UuidPolicy`] is attached to a record type and answers two questions:
//!
//! - **Where does the UUID go?** The configured `uuid_field`, or the primary-key field when
//!   none is configured.
//! - **What does it look like?** The configured algorithm version (1 or 4), or version 1 when
//!   none is configured.
//!
//! It then stamps new records through [`UuidPolicy::on_before_create`], which the persistence
//! path must call before the first write of each record (see
//! [`ModelRepository::create`](crate::ModelRepository::create)).
//!
//! ## Primary-key UUIDs
//!
//! When the UUID is stamped into the primary-key field, that key can no longer be an
//! auto-incrementing integer. The policy therefore disables the record's auto-increment flag
//! whenever the resolved field is the primary key. This happens in
//! [`UuidPolicy::apply_increment_policy`], which [`UuidPolicy::resolve_uuid_field`] also calls.
//!
//! ## Validation timing
//!
//! The configured version is validated when it is used, i.e. when the first record of the type
//! is created. Call [`UuidPolicy::validate`] at type-definition time to fail earlier.

use crate::constants::DEFAULT_UUID_VERSION;
use crate::record::{HasMutableFields, HasPrimaryKeyField};
use crate::{StampError, StampResult};
use keystamp_uuid::{UuidGenerator, UuidVersion};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-record-type UUID configuration.
///
/// Both settings are optional. An empty `uuid_field` counts as unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UuidPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uuid_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    uuid_version: Option<u32>,
}

impl UuidPolicy {
    /// Creates a policy with no configuration: stamp the primary key with a version 1 UUID.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `field` instead of the primary key.
    pub fn with_uuid_field(mut self, field: impl Into<String>) -> Self {
        self.uuid_field = Some(field.into());
        self
    }

    /// Requests algorithm version `version`. Not validated until use.
    pub fn with_uuid_version(mut self, version: u32) -> Self {
        self.uuid_version = Some(version);
        self
    }

    /// The configured field, if any.
    pub fn uuid_field(&self) -> Option<&str> {
        self.uuid_field.as_deref().filter(|f| !f.is_empty())
    }

    /// The configured version, if any.
    pub fn uuid_version(&self) -> Option<u32> {
        self.uuid_version
    }

    /// Returns the field to stamp for a record type whose primary key is `key_name`.
    ///
    /// Pure; see [`UuidPolicy::resolve_uuid_field`] for the variant that also applies the
    /// increment policy.
    pub fn uuid_field_for<'a>(&'a self, key_name: &'a str) -> &'a str {
        self.uuid_field().unwrap_or(key_name)
    }

    /// True when the UUID goes into the primary-key field `key_name`.
    pub fn stamps_primary_key(&self, key_name: &str) -> bool {
        self.uuid_field_for(key_name) == key_name
    }

    /// Disables auto-increment on `record` if the UUID is stamped into its primary key.
    ///
    /// Leaves the flag untouched otherwise. Idempotent.
    pub fn apply_increment_policy<R>(&self, record: &mut R)
    where
        R: HasPrimaryKeyField + ?Sized,
    {
        if self.stamps_primary_key(record.key_name()) && record.incrementing() {
            tracing::debug!(
                key = record.key_name(),
                "uuid stamps the primary key, disabling auto-increment"
            );
            record.set_incrementing(false);
        }
    }

    /// Resolves the field to stamp on `record`.
    ///
    /// This is **not** a pure accessor: when the resolved field is the primary key, the record's
    /// auto-increment flag is disabled as a side effect. Calling it repeatedly returns the same
    /// field and leaves the flag disabled.
    pub fn resolve_uuid_field<R>(&self, record: &mut R) -> String
    where
        R: HasPrimaryKeyField + ?Sized,
    {
        self.apply_increment_policy(record);
        self.uuid_field_for(record.key_name()).to_owned()
    }

    /// Resolves the algorithm version.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::UnsupportedVersion`] if the configured version is not 1 or 4.
    pub fn resolve_uuid_version(&self) -> StampResult<UuidVersion> {
        match self.uuid_version {
            None => Ok(DEFAULT_UUID_VERSION),
            Some(n) => UuidVersion::try_from(n).map_err(|_| StampError::UnsupportedVersion(n)),
        }
    }

    /// Generates a UUID string for this policy's version using `generator`.
    ///
    /// # Errors
    ///
    /// Propagates [`StampError::UnsupportedVersion`] from
    /// [`UuidPolicy::resolve_uuid_version`].
    pub fn generate_uuid<G>(&self, generator: &G) -> StampResult<String>
    where
        G: UuidGenerator + ?Sized,
    {
        let version = self.resolve_uuid_version()?;
        Ok(generator.generate(version))
    }

    /// The creating hook: stamps `record` with a freshly generated UUID.
    ///
    /// Must be called once per record, before its first write. The UUID is generated before the
    /// record is touched, so on failure the record's fields are left as they were and the caller
    /// must abort the write.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::UnsupportedVersion`] if the configured version is not supported.
    pub fn on_before_create<R, G>(&self, record: &mut R, generator: &G) -> StampResult<()>
    where
        R: HasPrimaryKeyField + HasMutableFields + ?Sized,
        G: UuidGenerator + ?Sized,
    {
        let uuid = self.generate_uuid(generator)?;
        let field = self.resolve_uuid_field(record);

        tracing::debug!(field = %field, uuid = %uuid, "stamping record");
        record.set_field(&field, Value::String(uuid));
        Ok(())
    }

    /// Checks the configuration eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::UnsupportedVersion`] for an unsupported version, or
    /// [`StampError::InvalidInput`] for a whitespace-only field name.
    pub fn validate(&self) -> StampResult<()> {
        if let Some(field) = self.uuid_field() {
            if field.trim().is_empty() {
                return Err(StampError::InvalidInput(
                    "uuid field cannot be whitespace".into(),
                ));
            }
        }
        self.resolve_uuid_version().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use keystamp_uuid::{CanonicalUuid, SystemUuidGenerator};
    use serde_json::json;

    /// Generator returning a fixed value per version.
    struct FixedGenerator;

    impl UuidGenerator for FixedGenerator {
        fn generate(&self, version: UuidVersion) -> String {
            match version {
                UuidVersion::V1 => "c232ab00-9414-11ec-b3c8-9f6bdeced846".into(),
                UuidVersion::V4 => "550e8400-e29b-41d4-a716-446655440000".into(),
            }
        }
    }

    fn test_record() -> Record {
        let mut record = Record::new("id");
        record.set("name", "Test Name");
        record
    }

    #[test]
    fn test_uuid_field_defaults_to_primary_key() {
        let policy = UuidPolicy::new();
        let mut record = test_record();

        assert_eq!(policy.resolve_uuid_field(&mut record), "id");
        assert!(!record.incrementing());
    }

    #[test]
    fn test_custom_uuid_field_leaves_incrementing_alone() {
        let policy = UuidPolicy::new().with_uuid_field("uuid");
        let mut record = test_record();

        assert_eq!(policy.resolve_uuid_field(&mut record), "uuid");
        assert!(record.incrementing());
    }

    #[test]
    fn test_custom_uuid_field_equal_to_key_disables_incrementing() {
        let policy = UuidPolicy::new().with_uuid_field("id");
        let mut record = test_record();

        assert_eq!(policy.resolve_uuid_field(&mut record), "id");
        assert!(!record.incrementing());
    }

    #[test]
    fn test_empty_uuid_field_counts_as_unset() {
        let policy = UuidPolicy::new().with_uuid_field("");

        assert_eq!(policy.uuid_field(), None);
        assert_eq!(policy.uuid_field_for("id"), "id");
    }

    #[test]
    fn test_resolve_uuid_field_is_idempotent() {
        let policy = UuidPolicy::new();
        let mut record = test_record();

        let first = policy.resolve_uuid_field(&mut record);
        let second = policy.resolve_uuid_field(&mut record);

        assert_eq!(first, second);
        assert!(!record.incrementing());
    }

    #[test]
    fn test_uuid_field_for_is_pure() {
        let policy = UuidPolicy::new();
        let record = test_record();

        assert_eq!(policy.uuid_field_for(record.key_name()), "id");
        assert!(record.incrementing());
    }

    #[test]
    fn test_version_defaults_to_v1() {
        assert_eq!(
            UuidPolicy::new().resolve_uuid_version().unwrap(),
            UuidVersion::V1
        );
    }

    #[test]
    fn test_supported_versions_pass_through() {
        for n in [1, 4] {
            let policy = UuidPolicy::new().with_uuid_version(n);
            assert_eq!(policy.resolve_uuid_version().unwrap().number(), n);
        }
    }

    #[test]
    fn test_unsupported_version_fails() {
        for n in [0, 2, 3, 5, 15] {
            let policy = UuidPolicy::new().with_uuid_version(n);
            match policy.resolve_uuid_version() {
                Err(StampError::UnsupportedVersion(v)) => assert_eq!(v, n),
                other => panic!("Expected UnsupportedVersion, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = UuidPolicy::new()
            .with_uuid_version(15)
            .resolve_uuid_version()
            .unwrap_err();

        assert_eq!(err.to_string(), "uuid version 15 is not supported or not valid");
    }

    #[test]
    fn test_unsupported_version_message_matches_generator_error() {
        let from_policy = UuidPolicy::new()
            .with_uuid_version(3)
            .resolve_uuid_version()
            .unwrap_err();
        let from_generator = UuidVersion::try_from(3).unwrap_err();

        assert_eq!(from_policy.to_string(), from_generator.to_string());
    }

    #[test]
    fn test_generate_uuid_uses_resolved_version() {
        let v1 = UuidPolicy::new().generate_uuid(&FixedGenerator).unwrap();
        let v4 = UuidPolicy::new()
            .with_uuid_version(4)
            .generate_uuid(&FixedGenerator)
            .unwrap();

        assert_eq!(v1, "c232ab00-9414-11ec-b3c8-9f6bdeced846");
        assert_eq!(v4, "550e8400-e29b-41d4-a716-446655440000");
    }

    #[test]
    fn test_on_before_create_fills_primary_key() {
        let policy = UuidPolicy::new();
        let mut record = test_record();

        policy.on_before_create(&mut record, &FixedGenerator).unwrap();

        assert_eq!(
            record.get("id"),
            Some(&json!("c232ab00-9414-11ec-b3c8-9f6bdeced846"))
        );
        assert!(!record.incrementing());
    }

    #[test]
    fn test_on_before_create_fills_custom_field() {
        let policy = UuidPolicy::new().with_uuid_field("uuid");
        let mut record = test_record();

        policy
            .on_before_create(&mut record, &SystemUuidGenerator::new())
            .unwrap();

        let uuid = record.get("uuid").and_then(Value::as_str).unwrap();
        assert!(CanonicalUuid::is_canonical(uuid));
        assert!(record.get("id").is_none());
        assert!(record.incrementing());
    }

    #[test]
    fn test_on_before_create_failure_leaves_record_untouched() {
        let policy = UuidPolicy::new().with_uuid_version(15);
        let mut record = test_record();
        let before = record.clone();

        let result = policy.on_before_create(&mut record, &FixedGenerator);

        assert!(matches!(result, Err(StampError::UnsupportedVersion(15))));
        assert_eq!(record, before);
    }

    #[test]
    fn test_validate() {
        assert!(UuidPolicy::new().validate().is_ok());
        assert!(UuidPolicy::new().with_uuid_version(4).validate().is_ok());
        assert!(matches!(
            UuidPolicy::new().with_uuid_version(15).validate(),
            Err(StampError::UnsupportedVersion(15))
        ));
        assert!(matches!(
            UuidPolicy::new().with_uuid_field("  ").validate(),
            Err(StampError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_serde_omits_unset_values() {
        let json = serde_json::to_value(UuidPolicy::new()).unwrap();
        assert_eq!(json, json!({}));

        let policy: UuidPolicy =
            serde_json::from_value(json!({"uuid_field": "uuid", "uuid_version": 4})).unwrap();
        assert_eq!(policy.uuid_field(), Some("uuid"));
        assert_eq!(policy.uuid_version(), Some(4));
    }
}
