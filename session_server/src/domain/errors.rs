// Failures reported by store adapters.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to encode document: {0}")]
    Encode(String),
    #[error("failed to decode document: {0}")]
    Decode(String),
}

// Domain-level errors for session workflows.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("invalid session payload")]
    InvalidRequest,
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}
