//! Wire snapshot and in-memory-only reference types.

use faultline_nodestore::JsonMap;
use serde::{Deserialize, Serialize};

/// The durable shape of an event for transport between workers.
///
/// Only identifiers and the raw payload cross a process boundary.
/// Resolved references ([`EventCaches`]) and query-path column values
/// are deliberately not part of this type; the receiving side
/// re-resolves them lazily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSnapshot {
    pub project_id: i64,
    pub event_id: String,
    pub group_id: Option<i64>,
    /// Raw payload, present only if it was resident when the snapshot
    /// was taken. `None` means the receiver loads from the node store.
    pub data: Option<JsonMap>,
}

/// Resolved project reference. Owned by the surrounding pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub slug: String,
}

/// Resolved issue group reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub id: i64,
}

/// Resolved environment reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub id: i64,
    pub name: String,
}

/// In-memory-only slots for references resolved against the wider
/// system. Never serialized: the type has no serde impls on purpose,
/// so a cache can't leak into a wire representation by accident.
#[derive(Debug, Clone, Default)]
pub struct EventCaches {
    pub project: Option<Project>,
    pub group: Option<Group>,
    pub environment: Option<Environment>,
}

impl EventCaches {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
