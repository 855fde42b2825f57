use std::sync::Arc;

use chrono::{DateTime, Utc};
use faultline_nodestore::{JsonMap, NodeId, NodeStorage};
use serde_json::Value;

use crate::error::{EventError, Result};
use crate::node_data::NodeData;
use crate::types::{EventCaches, EventSnapshot};

/// One captured event, with its payload left in the node store until read.
///
/// Single-owner within one processing unit; accessors take `&self` and
/// the lazy payload cell caches after the first fetch.
pub struct Event {
    project_id: i64,
    event_id: String,
    group_id: Option<i64>,
    /// Column values the query path already had in hand. Checked before
    /// the payload, so a lookup here avoids a node store fetch.
    resident: JsonMap,
    data: NodeData,
    caches: EventCaches,
    store: Arc<dyn NodeStorage>,
}

impl Event {
    pub fn new(store: Arc<dyn NodeStorage>, project_id: i64, event_id: impl Into<String>) -> Self {
        let event_id = event_id.into();
        let node_id = NodeId::from_event(project_id, &event_id);
        Self {
            project_id,
            event_id,
            group_id: None,
            resident: JsonMap::new(),
            data: NodeData::new(store.clone(), node_id),
            caches: EventCaches::default(),
            store,
        }
    }

    pub fn with_group_id(mut self, group_id: i64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Attach an initial payload; reads then never hit the store.
    pub fn with_data(mut self, data: JsonMap) -> Self {
        self.data = NodeData::with_data(self.store.clone(), self.node_id(), data);
        self
    }

    /// Attach pre-resolved column values from the query path.
    pub fn with_resident(mut self, resident: JsonMap) -> Self {
        self.resident = resident;
        self
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn group_id(&self) -> Option<i64> {
        self.group_id
    }

    /// Storage key for this event's payload node.
    pub fn node_id(&self) -> NodeId {
        NodeId::from_event(self.project_id, &self.event_id)
    }

    /// The full payload, fetched from the node store on first use.
    pub async fn data(&self) -> Result<&JsonMap> {
        self.data.load().await
    }

    /// Two-tier field lookup: resident column values first, then the
    /// (lazily fetched) payload. `Ok(None)` means the field is absent;
    /// `Err` means the node store itself failed.
    pub async fn get(&self, key: &str) -> Result<Option<Value>> {
        if let Some(value) = self.resident.get(key) {
            return Ok(Some(value.clone()));
        }
        self.data.get(key).await
    }

    /// The payload's `platform` field, if any.
    pub async fn platform(&self) -> Result<Option<String>> {
        Ok(self
            .get("platform")
            .await?
            .and_then(|v| v.as_str().map(str::to_string)))
    }

    /// The recorded timestamp as an absolute UTC instant.
    ///
    /// The payload stores seconds since the epoch as a number,
    /// fractional part allowed. A missing or non-numeric value is a
    /// typed failure the caller decides how to handle.
    pub async fn datetime(&self) -> Result<DateTime<Utc>> {
        let raw = self
            .get("timestamp")
            .await?
            .ok_or_else(|| EventError::InvalidTimestamp("no 'timestamp' in payload".into()))?;

        let seconds = raw.as_f64().ok_or_else(|| {
            EventError::InvalidTimestamp(format!("non-numeric timestamp: {raw}"))
        })?;

        if !seconds.is_finite() {
            return Err(EventError::InvalidTimestamp(format!(
                "non-finite timestamp: {seconds}"
            )));
        }

        let secs = seconds.floor() as i64;
        let nanos = ((seconds - seconds.floor()) * 1_000_000_000.0) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos).ok_or_else(|| {
            EventError::InvalidTimestamp(format!("timestamp out of range: {seconds}"))
        })
    }

    /// Persist the current payload under [`Self::node_id`]. Upsert
    /// semantics, so retries of the same content are harmless.
    pub async fn save(&self) -> Result<()> {
        self.data.save().await
    }

    pub fn caches(&self) -> &EventCaches {
        &self.caches
    }

    pub fn caches_mut(&mut self) -> &mut EventCaches {
        &mut self.caches
    }

    /// The durable wire shape: identifiers plus the raw payload if it
    /// is resident. Caches and resident column values stay behind.
    pub fn snapshot(&self) -> EventSnapshot {
        EventSnapshot {
            project_id: self.project_id,
            event_id: self.event_id.clone(),
            group_id: self.group_id,
            data: self.data.resident_data().cloned(),
        }
    }

    /// Rebuild a lazy record on the receiving side of a transport hop.
    pub fn from_snapshot(store: Arc<dyn NodeStorage>, snapshot: EventSnapshot) -> Self {
        let mut event = Event::new(store, snapshot.project_id, snapshot.event_id);
        event.group_id = snapshot.group_id;
        if let Some(data) = snapshot.data {
            event = event.with_data(data);
        }
        event
    }
}
