//! Constants used throughout the keystamp core crate.
//!
//! Field names, defaults and environment variable names live here so the CLI and the library
//! agree on them.

use keystamp_uuid::UuidVersion;

/// Primary-key field name used when a model does not name one.
pub const DEFAULT_KEY_NAME: &str = "id";

/// Conventional name of a dedicated UUID column, used by the query helpers.
pub const DEFAULT_UUID_FIELD: &str = "uuid";

/// Algorithm version used when a policy does not configure one.
pub const DEFAULT_UUID_VERSION: UuidVersion = UuidVersion::V1;

/// Environment variable naming the primary-key field.
pub const KEY_NAME_ENV: &str = "KEYSTAMP_KEY_NAME";

/// Environment variable naming the field to stamp.
pub const UUID_FIELD_ENV: &str = "KEYSTAMP_UUID_FIELD";

/// Environment variable selecting the UUID algorithm version.
pub const UUID_VERSION_ENV: &str = "KEYSTAMP_UUID_VERSION";
