use thiserror::Error;

#[derive(Debug, Error)]
pub enum DuoError {
    #[error("{0}")]
    Validation(String),

    #[error("Unknown duoId. Analyze duo history first to initialize duo record.")]
    UnknownDuo(String),

    /// Report lookups for a duo that was never stored.
    #[error("duoId not found.")]
    DuoNotFound(String),

    #[error("Repository error: {0}")]
    #[allow(dead_code)] // Raised by persistent repository implementations
    Repository(String),
}
