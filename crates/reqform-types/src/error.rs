use thiserror::Error;

/// Errors from persisting form state.
///
/// Loads never produce these: a missing or malformed record reads as "no data".
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("write rejected: value of {size} bytes exceeds the {limit} byte quota")]
    QuotaExceeded { size: usize, limit: usize },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("query error: {0}")]
    Query(String),
}

/// Errors surfaced by the form controller.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("step {0} is outside the form")]
    StepOutOfRange(u8),

    #[error("failed to save results: {0}")]
    ResultsNotSaved(#[source] StorageError),
}
