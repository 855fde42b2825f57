/// Result type alias for node store operations.
pub type Result<T> = std::result::Result<T, NodeStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum NodeStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
