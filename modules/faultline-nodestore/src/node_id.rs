use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Deterministic storage key for an event's payload node.
///
/// Derived from the `(project_id, event_id)` pair, so the same event
/// always maps to the same node regardless of which worker computes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Derive the node id for an event: lowercase hex SHA-256 of
    /// `"{project_id}:{event_id}"`.
    pub fn from_event(project_id: i64, event_id: &str) -> Self {
        NodeId(hex::encode(Sha256::digest(format!(
            "{project_id}:{event_id}"
        ))))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
