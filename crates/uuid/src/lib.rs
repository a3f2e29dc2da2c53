//! UUID generation service.
//!
//! keystamp stamps records with UUID strings in the canonical hyphenated, lowercase text form:
//! `xxxxxxxx-xxxx-Mxxx-Nxxx-xxxxxxxxxxxx`, where `M` is the version nibble and `N` the variant
//! nibble.
//!
//! This crate provides:
//! - [`UuidVersion`], the closed set of algorithm versions a record policy may request.
//! - [`UuidGenerator`], the seam record policies generate through, and
//!   [`SystemUuidGenerator`], the default implementation backed by the `uuid` crate.
//! - [`CanonicalUuid`], a validated wrapper for inspecting a generated (or externally supplied)
//!   identifier.
//!
//! ## Supported versions
//!
//! - **Version 1** (time-based): derived from the current timestamp, a clock sequence and a
//!   node identifier. Sortable by creation time. Collisions are only theoretically possible
//!   when two identifiers are generated on the same node within the same 100ns tick.
//! - **Version 4** (random): derived from a cryptographically secure random source. No
//!   ordering. Collision risk is negligible.
//!
//! No other versions are supported.

mod canonical;
mod service;
mod version;

// Re-export public types
pub use canonical::CanonicalUuid;
pub use service::{SystemUuidGenerator, UuidGenerator};
pub use version::UuidVersion;

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested algorithm version is not one of the supported versions
    #[error("uuid version {0} is not supported or not valid")]
    UnsupportedVersion(u32),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
