//! # keystamp core
//!
//! Automatic UUID assignment for record models, independent of any particular ORM.
//!
//! A record type carries a [`UuidPolicy`] that decides which field receives a UUID and which
//! algorithm version generates it. Just before a new record is first written, the policy's
//! creating hook stamps it. Query helpers then look records up by UUID or primary key.
//!
//! This crate contains:
//! - The policy itself ([`policy`]).
//! - The capability traits a host record type implements, and a reference [`Record`]
//!   ([`record`]).
//! - Per-type static configuration ([`ModelDefinition`]).
//! - Query filters ([`query`]), the store boundary and an in-memory store ([`store`]), and the
//!   create path that ties them together ([`ModelRepository`]).
//! - Startup configuration ([`StampConfig`]).
//!
//! UUID strings themselves come from the `keystamp-uuid` crate.
//!
//! ```
//! use keystamp_core::{MemoryStore, ModelDefinition, ModelRepository, UuidPolicy};
//!
//! # fn main() -> Result<(), keystamp_core::StampError> {
//! let model = ModelDefinition::new("users").with_policy(UuidPolicy::new().with_uuid_field("uuid"));
//! let mut users = ModelRepository::new(model, MemoryStore::new());
//!
//! let mut user = users.new_record();
//! user.set("name", "Ada");
//! let user = users.create(user)?;
//!
//! assert!(user.get("uuid").is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
mod error;
pub mod model;
pub mod policy;
pub mod query;
pub mod record;
pub mod repository;
pub mod store;

pub use config::StampConfig;
pub use error::{StampError, StampResult};
pub use keystamp_uuid::{SystemUuidGenerator, UuidGenerator, UuidVersion};
pub use model::ModelDefinition;
pub use policy::UuidPolicy;
pub use query::{filter_by_id_or_uuid, filter_by_uuid, find_by_uuid, Filter};
pub use record::{HasMutableFields, HasPrimaryKeyField, Record, SupportsCreateHook};
pub use repository::ModelRepository;
pub use store::{MemoryStore, RecordStore};
