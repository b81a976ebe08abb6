pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Probing for the native persistent store raised an error. Consumed by
    /// backend selection (maps to the cookie fallback), never surfaced to
    /// store callers.
    #[error("native store probe failed: {0}")]
    Probe(String),
    /// The namespace mapping could not be re-serialized before a write.
    #[error("failed to serialize namespace contents: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The underlying backend rejected a write (e.g. quota exceeded).
    /// Write failures propagate uncaught; only read paths fail soft.
    #[error("backend write failed: {0}")]
    Write(String),
}
