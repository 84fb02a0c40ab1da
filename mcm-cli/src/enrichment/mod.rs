//! Metadata enrichment
//!
//! Turns a free-text title into a normalized [`EnrichedMovie`] by asking an
//! external metadata service. The repository only sees the
//! [`MetadataSource`] trait, so tests can substitute canned responses.

pub mod countries;
pub mod omdb_client;

pub use countries::country_code;
pub use omdb_client::{normalize_response, OmdbClient, OmdbResponse};

use async_trait::async_trait;
use thiserror::Error;

/// Normalized lookup result, ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedMovie {
    /// Canonical title from the service, or the input title when absent
    pub title: String,
    pub year: Option<i32>,
    /// `0.0` when the service has no rating
    pub rating: f64,
    /// Empty when the service has no poster
    pub poster_url: String,
    /// ISO-3166 alpha-2 code of the first listed country, or `"UN"`
    pub country_code: String,
    /// Displayed after a lookup, never persisted
    pub actors: Option<String>,
}

/// Enrichment errors
///
/// Only [`EnrichmentError::NotFound`] means the service answered and knows no
/// such title; the rest are transport failures (see
/// [`EnrichmentError::is_transport`]). None of them insert a row.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Service reported no match for the title
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// Request could not complete (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// Service answered with an error status or error message
    #[error("API error: {0}")]
    Api(String),

    /// Response body was not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Title was empty; no request was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EnrichmentError {
    /// True for failures talking to the service, as opposed to a clean
    /// "not found" answer or a rejected input.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            EnrichmentError::Network(_) | EnrichmentError::Api(_) | EnrichmentError::Parse(_)
        )
    }
}

/// Source of movie metadata
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Source name (for logging)
    fn name(&self) -> &'static str;

    /// Look up a title and normalize the answer.
    async fn fetch(&self, title: &str) -> Result<EnrichedMovie, EnrichmentError>;
}
