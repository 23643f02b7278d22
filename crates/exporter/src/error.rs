use storage::error::StorageError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectError>;

/// Failure of one collection cycle
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("Failed to find {what}: {source}")]
    StoreUnavailable {
        what: &'static str,
        #[source]
        source: StorageError,
    },

    #[error("Failed to publish metrics: {0}")]
    PublishFailed(#[from] PublishError),
}

/// The metrics sink rejected a write
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    #[error("Gauge {gauge} expects {expected} label values, got {actual}")]
    LabelArity {
        gauge: &'static str,
        expected: usize,
        actual: usize,
    },
}
