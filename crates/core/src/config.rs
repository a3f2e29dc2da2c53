//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! the library never reads process-wide environment variables while creating records. The
//! parsing helpers take the raw `Option<String>` values instead of reading the environment
//! themselves, which keeps them testable.

use crate::constants::DEFAULT_KEY_NAME;
use crate::model::ModelDefinition;
use crate::policy::UuidPolicy;
use crate::{StampError, StampResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StampConfig {
    key_name: String,
    policy: UuidPolicy,
}

impl StampConfig {
    /// Create a new `StampConfig`.
    pub fn new(key_name: String, policy: UuidPolicy) -> StampResult<Self> {
        if key_name.trim().is_empty() {
            return Err(StampError::InvalidInput("key_name cannot be empty".into()));
        }

        Ok(Self { key_name, policy })
    }

    /// Builds a configuration from raw environment (or command line) values.
    ///
    /// Missing, empty and whitespace-only values count as unset. The version is parsed but not
    /// checked against the supported set; that happens when a record is created.
    pub fn from_env_values(
        key_name: Option<String>,
        uuid_field: Option<String>,
        uuid_version: Option<String>,
    ) -> StampResult<Self> {
        let key_name = non_empty(key_name).unwrap_or_else(|| DEFAULT_KEY_NAME.to_owned());

        let mut policy = UuidPolicy::new();
        if let Some(field) = non_empty(uuid_field) {
            policy = policy.with_uuid_field(field);
        }
        if let Some(version) = uuid_version_from_env_value(uuid_version)? {
            policy = policy.with_uuid_version(version);
        }

        Self::new(key_name, policy)
    }

    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub fn policy(&self) -> &UuidPolicy {
        &self.policy
    }

    /// Defines a record type named `name` using this configuration.
    pub fn model(&self, name: impl Into<String>) -> ModelDefinition {
        ModelDefinition::new(name)
            .with_key_name(self.key_name.clone())
            .with_policy(self.policy.clone())
    }
}

/// Parse a UUID version from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns `None`.
pub fn uuid_version_from_env_value(value: Option<String>) -> StampResult<Option<u32>> {
    non_empty(value)
        .map(|v| {
            v.parse::<u32>().map_err(|e| {
                StampError::InvalidInput(format!("invalid uuid version '{}': {}", v, e))
            })
        })
        .transpose()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
