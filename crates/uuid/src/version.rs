use crate::UuidError;
use std::fmt;

/// A UUID algorithm version that keystamp can generate.
///
/// The set is deliberately closed: versions 1 and 4 only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum UuidVersion {
    /// Time-based identifier.
    #[default]
    V1,
    /// Random identifier.
    V4,
}

impl UuidVersion {
    /// All supported versions, in ascending order.
    pub const SUPPORTED: [UuidVersion; 2] = [UuidVersion::V1, UuidVersion::V4];

    /// Returns the RFC 4122 version number.
    pub fn number(self) -> u32 {
        match self {
            UuidVersion::V1 => 1,
            UuidVersion::V4 => 4,
        }
    }

    /// Returns true if `number` names a supported version.
    pub fn is_supported(number: u32) -> bool {
        Self::try_from(number).is_ok()
    }
}

impl TryFrom<u32> for UuidVersion {
    type Error = UuidError;

    fn try_from(number: u32) -> Result<Self, Self::Error> {
        match number {
            1 => Ok(UuidVersion::V1),
            4 => Ok(UuidVersion::V4),
            other => Err(UuidError::UnsupportedVersion(other)),
        }
    }
}

impl From<UuidVersion> for u32 {
    fn from(version: UuidVersion) -> Self {
        version.number()
    }
}

impl fmt::Display for UuidVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_v1() {
        assert_eq!(UuidVersion::default(), UuidVersion::V1);
    }

    #[test]
    fn test_try_from_supported_numbers() {
        assert_eq!(UuidVersion::try_from(1), Ok(UuidVersion::V1));
        assert_eq!(UuidVersion::try_from(4), Ok(UuidVersion::V4));
    }

    #[test]
    fn test_try_from_rejects_other_numbers() {
        for n in [0, 2, 3, 5, 7, 15] {
            assert_eq!(
                UuidVersion::try_from(n),
                Err(UuidError::UnsupportedVersion(n))
            );
            assert!(!UuidVersion::is_supported(n));
        }
    }

    #[test]
    fn test_number_matches_try_from() {
        for version in UuidVersion::SUPPORTED {
            assert_eq!(UuidVersion::try_from(version.number()), Ok(version));
        }
    }

    #[test]
    fn test_display_format() {
        assert_eq!(UuidVersion::V1.to_string(), "v1");
        assert_eq!(UuidVersion::V4.to_string(), "v4");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_version_number() {
        let json = serde_json::to_string(&UuidVersion::V4).unwrap();
        assert_eq!(json, "4");

        let parsed: UuidVersion = serde_json::from_str("1").unwrap();
        assert_eq!(parsed, UuidVersion::V1);

        let invalid = serde_json::from_str::<UuidVersion>("15");
        assert!(invalid.is_err());
    }
}
