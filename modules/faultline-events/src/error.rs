use faultline_nodestore::NodeStoreError;

/// Result type alias for event record operations.
pub type Result<T> = std::result::Result<T, EventError>;

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Node store error: {0}")]
    Store(#[from] NodeStoreError),
}
