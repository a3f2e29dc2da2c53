//! UUID generation.
//!
//! Record policies never call the `uuid` crate directly. They go through [`UuidGenerator`], so
//! hosts and tests can substitute their own source of identifiers.

use crate::UuidVersion;
use ::uuid::Uuid;
use std::fmt;

/// A source of canonical UUID strings, keyed by algorithm version.
///
/// Implementations must return the canonical hyphenated lowercase text form for the requested
/// version.
pub trait UuidGenerator {
    /// Generates a new UUID string for `version`.
    fn generate(&self, version: UuidVersion) -> String;
}

impl<G: UuidGenerator + ?Sized> UuidGenerator for &G {
    fn generate(&self, version: UuidVersion) -> String {
        (**self).generate(version)
    }
}

impl<G: UuidGenerator + ?Sized> UuidGenerator for Box<G> {
    fn generate(&self, version: UuidVersion) -> String {
        (**self).generate(version)
    }
}

impl<G: UuidGenerator + ?Sized> UuidGenerator for std::sync::Arc<G> {
    fn generate(&self, version: UuidVersion) -> String {
        (**self).generate(version)
    }
}

/// Default generator backed by the `uuid` crate.
///
/// Version 1 identifiers embed a 6-byte node identifier. Rather than reading a MAC address, a
/// random node id is chosen once per generator with the multicast bit set, as RFC 4122 §4.5
/// prescribes for nodes without an IEEE 802 address. Use [`SystemUuidGenerator::with_node_id`]
/// to pin it.
///
/// The clock sequence is shared process-wide by the `uuid` crate, so generators can be created
/// freely.
#[derive(Clone, PartialEq, Eq)]
pub struct SystemUuidGenerator {
    node_id: [u8; 6],
}

impl Default for SystemUuidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemUuidGenerator {
    /// Creates a generator with a random multicast node id.
    pub fn new() -> Self {
        let mut node_id: [u8; 6] = rand::random();
        node_id[0] |= 0x01;
        Self { node_id }
    }

    /// Creates a generator that embeds `node_id` in version 1 identifiers.
    pub fn with_node_id(node_id: [u8; 6]) -> Self {
        Self { node_id }
    }

    /// Returns the node id embedded in version 1 identifiers.
    pub fn node_id(&self) -> [u8; 6] {
        self.node_id
    }

    /// Generates a new UUID for `version`.
    pub fn new_uuid(&self, version: UuidVersion) -> Uuid {
        match version {
            UuidVersion::V1 => Uuid::now_v1(&self.node_id),
            UuidVersion::V4 => Uuid::new_v4(),
        }
    }
}

impl UuidGenerator for SystemUuidGenerator {
    fn generate(&self, version: UuidVersion) -> String {
        self.new_uuid(version).hyphenated().to_string()
    }
}

impl fmt::Debug for SystemUuidGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self
            .node_id
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(":");
        f.debug_struct("SystemUuidGenerator")
            .field("node_id", &node)
            .finish()
    }
}
