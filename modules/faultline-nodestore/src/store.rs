//! NodeStorage trait plus the Postgres and in-memory implementations.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::Result;
use crate::node_id::NodeId;
use crate::JsonMap;

/// Blob storage for event payloads, keyed by [`NodeId`].
///
/// `get` returning `Ok(None)` means the node does not exist; `Err` means
/// the store itself failed. Callers must not conflate the two.
#[async_trait]
pub trait NodeStorage: Send + Sync {
    async fn get(&self, id: &NodeId) -> Result<Option<JsonMap>>;
    async fn put(&self, id: &NodeId, payload: &JsonMap) -> Result<()>;
    async fn delete(&self, id: &NodeId) -> Result<()>;
}

// ---------------------------------------------------------------------------
// PostgresNodeStore
// ---------------------------------------------------------------------------

/// Node store backed by a Postgres JSONB table.
#[derive(Clone)]
pub struct PostgresNodeStore {
    pool: PgPool,
}

impl PostgresNodeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the nodes table if it doesn't exist yet.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS nodes (
                id         TEXT        PRIMARY KEY,
                payload    JSONB       NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl NodeStorage for PostgresNodeStore {
    async fn get(&self, id: &NodeId) -> Result<Option<JsonMap>> {
        let row = sqlx::query_scalar::<_, Value>(
            r#"
            SELECT payload FROM nodes WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => {
                // A non-object payload means someone wrote garbage under
                // this key. Treat it as absent rather than crashing reads.
                warn!(node_id = %id, kind = other_kind(&other), "Non-object payload in node store");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Upsert, so retried writes of the same node are harmless.
    async fn put(&self, id: &NodeId, payload: &JsonMap) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO nodes (id, payload, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (id) DO UPDATE
                SET payload = EXCLUDED.payload, updated_at = now()
            "#,
        )
        .bind(id.as_str())
        .bind(Value::Object(payload.clone()))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &NodeId) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM nodes WHERE id = $1
            "#,
        )
        .bind(id.as_str())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn other_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// MemoryNodeStore
// ---------------------------------------------------------------------------

/// In-memory node store for tests and local development.
#[derive(Clone, Default)]
pub struct MemoryNodeStore {
    nodes: Arc<RwLock<HashMap<String, JsonMap>>>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently held.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.nodes.read().await.is_empty()
    }
}

#[async_trait]
impl NodeStorage for MemoryNodeStore {
    async fn get(&self, id: &NodeId) -> Result<Option<JsonMap>> {
        Ok(self.nodes.read().await.get(id.as_str()).cloned())
    }

    async fn put(&self, id: &NodeId, payload: &JsonMap) -> Result<()> {
        self.nodes
            .write()
            .await
            .insert(id.as_str().to_string(), payload.clone());
        Ok(())
    }

    async fn delete(&self, id: &NodeId) -> Result<()> {
        self.nodes.write().await.remove(id.as_str());
        Ok(())
    }
}
