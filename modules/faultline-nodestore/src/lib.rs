//! Key/value "node store" for bulky event payloads.
//!
//! Payloads are opaque JSON maps addressed by a [`NodeId`] derived from
//! the owning event's identifiers. The store knows nothing about event
//! semantics; consumers decide what goes in the payload.

pub mod error;
pub mod node_id;
pub mod store;

pub use error::{NodeStoreError, Result};
pub use node_id::NodeId;
pub use store::{MemoryNodeStore, NodeStorage, PostgresNodeStore};

/// Alias for the JSON object payloads the store holds.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
