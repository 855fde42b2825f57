use std::sync::Arc;

use faultline_nodestore::{JsonMap, NodeId, NodeStorage};
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::error::Result;

/// Lazy payload cell for one event.
///
/// Holds either payload handed in at construction or nothing; in the
/// latter case the first read fetches from the node store under this
/// cell's node id and caches the result for the record's lifetime.
/// An absent node yields an empty payload; a failing store propagates.
pub struct NodeData {
    node_id: NodeId,
    store: Arc<dyn NodeStorage>,
    cell: OnceCell<JsonMap>,
}

impl NodeData {
    /// A cell with no resident payload; reads will hit the store.
    pub fn new(store: Arc<dyn NodeStorage>, node_id: NodeId) -> Self {
        Self {
            node_id,
            store,
            cell: OnceCell::new(),
        }
    }

    /// A cell pre-filled with payload; reads never hit the store.
    pub fn with_data(store: Arc<dyn NodeStorage>, node_id: NodeId, data: JsonMap) -> Self {
        Self {
            node_id,
            store,
            cell: OnceCell::new_with(Some(data)),
        }
    }

    pub fn node_id(&self) -> &NodeId {
        &self.node_id
    }

    /// Whether the payload is resident in memory (no fetch needed).
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// The payload, fetching it from the store on first use.
    pub async fn load(&self) -> Result<&JsonMap> {
        let map = self
            .cell
            .get_or_try_init(|| async {
                debug!(node_id = %self.node_id, "Fetching event payload from node store");
                let fetched = self.store.get(&self.node_id).await?;
                Ok::<_, crate::error::EventError>(fetched.unwrap_or_default())
            })
            .await?;
        Ok(map)
    }

    /// Look up one payload key, loading the payload if needed.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.load().await?.get(key).cloned())
    }

    /// Persist the payload under this cell's node id. Writes are
    /// upserts, so a retried save of the same content is harmless.
    pub async fn save(&self) -> Result<()> {
        let data = self.load().await?;
        self.store.put(&self.node_id, data).await?;
        Ok(())
    }

    /// The resident payload, if any, without touching the store.
    pub fn resident_data(&self) -> Option<&JsonMap> {
        self.cell.get()
    }
}
