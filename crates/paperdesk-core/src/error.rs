//! Error types for the paperdesk core
//!
//! Every error surfaces to the caller unchanged; the core performs no
//! retries and no silent recovery. Failed mutating operations leave both the
//! in-memory library and the on-disk file in their prior state.

use thiserror::Error;

/// A required field was missing during export
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("article '{arxiv_id}' is missing required field '{field}'")]
    MissingField {
        arxiv_id: String,
        field: &'static str,
    },
}

/// Underlying storage read/write failure
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("library file is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure reported by an external collaborator (summarization service)
///
/// These are propagated unchanged; retry and backoff belong to the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("rate limited, retry after {retry_after_seconds:?} seconds")]
    RateLimited { retry_after_seconds: Option<u32> },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("service error: {message}")]
    Api { message: String },
}

/// Top-level error for library operations
#[derive(Error, Debug)]
pub enum LibraryError {
    #[error("no article with id '{arxiv_id}' in the library")]
    NotFound { arxiv_id: String },

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl LibraryError {
    pub fn not_found(arxiv_id: impl Into<String>) -> Self {
        Self::NotFound {
            arxiv_id: arxiv_id.into(),
        }
    }
}
