//! Canonical UUID text form.

use crate::{UuidError, UuidResult, UuidVersion};
use ::uuid::{Uuid, Variant};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

/// Byte offsets of the hyphens in the canonical text form.
const HYPHEN_POSITIONS: [usize; 4] = [8, 13, 18, 23];

/// A UUID known to be in canonical text form: 36 characters, lowercase hex, hyphenated
/// `8-4-4-4-12`.
///
/// This is the form every [`UuidGenerator`](crate::UuidGenerator) must return and the form
/// records are stamped with.
///
/// # Construction
/// - [`CanonicalUuid::parse`] validates an externally supplied identifier.
/// - [`CanonicalUuid::from_uuid`] wraps an existing [`Uuid`].
///
/// Non-canonical values (uppercase, unhyphenated, braced, urn-prefixed) are rejected rather
/// than normalised, so a stored identifier compares equal to its text exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalUuid(Uuid);

impl CanonicalUuid {
    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Validates and parses a UUID string that must already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`UuidError::InvalidInput`] if `input` is not canonical.
    pub fn parse(input: &str) -> UuidResult<Self> {
        if !Self::is_canonical(input) {
            return Err(UuidError::InvalidInput(format!(
                "UUID must be 36 lowercase hex characters in 8-4-4-4-12 form, got: '{}'",
                input
            )));
        }
        Uuid::parse_str(input)
            .map(Self)
            .map_err(|e| UuidError::InvalidInput(format!("invalid UUID '{}': {}", input, e)))
    }

    /// Returns true if `input` is in canonical form.
    ///
    /// This is a purely syntactic check: exactly 36 bytes, hyphens at offsets 8, 13, 18 and 23,
    /// and lowercase hex (`0-9`, `a-f`) everywhere else.
    pub fn is_canonical(input: &str) -> bool {
        input.len() == 36
            && input.bytes().enumerate().all(|(i, b)| {
                if HYPHEN_POSITIONS.contains(&i) {
                    b == b'-'
                } else {
                    matches!(b, b'0'..=b'9' | b'a'..=b'f')
                }
            })
    }

    /// Returns the underlying `uuid::Uuid`.
    pub fn uuid(&self) -> Uuid {
        self.0
    }

    /// Returns the raw version nibble.
    pub fn version_num(&self) -> usize {
        self.0.get_version_num()
    }

    /// Returns the version if it is one keystamp generates.
    pub fn version(&self) -> Option<UuidVersion> {
        u32::try_from(self.version_num())
            .ok()
            .and_then(|n| UuidVersion::try_from(n).ok())
    }

    /// Returns true if the variant bits mark an RFC 4122 UUID (variant nibble `8`-`b`).
    pub fn is_rfc4122_variant(&self) -> bool {
        self.0.get_variant() == Variant::RFC4122
    }

    /// Returns the creation time embedded in a version 1 UUID.
    ///
    /// Returns `None` for other versions.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        if self.version() != Some(UuidVersion::V1) {
            return None;
        }
        let (secs, nanos) = self.0.get_timestamp()?.to_unix();
        DateTime::<Utc>::from_timestamp(i64::try_from(secs).ok()?, nanos)
    }
}

impl fmt::Display for CanonicalUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for CanonicalUuid {
    type Err = UuidError;

    /// Equivalent to [`CanonicalUuid::parse`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalUuid::parse(s)
    }
}
