#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist {slot}: {source}")]
    Persist {
        slot: String,
        #[source]
        source: tempfile::PersistError,
    },
}
