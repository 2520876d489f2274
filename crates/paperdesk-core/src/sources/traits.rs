//! Shared pieces for search source plugins

use thiserror::Error;

use crate::http::HttpError;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error(transparent)]
    Http(HttpError),
    #[error("feed parse error: {0}")]
    Parse(String),
    #[error("rate limited by source")]
    RateLimit,
    #[error("no matching article")]
    NotFound,
}

impl From<HttpError> for SourceError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::RateLimited => SourceError::RateLimit,
            other => SourceError::Http(other),
        }
    }
}

/// Metadata about a source
pub struct SourceMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub base_url: &'static str,
    pub rate_limit_per_second: f32,
    pub requires_api_key: bool,
}
