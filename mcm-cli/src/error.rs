//! Error types for mcm-cli
//!
//! Recoverable conditions (not found, duplicate, invalid input, enrichment
//! failures) are reported and the session continues. Storage and I/O
//! failures end the process.

use crate::enrichment::EnrichmentError;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    /// mcm-common error (store, config, validation)
    #[error(transparent)]
    Common(#[from] mcm_common::Error),

    /// Metadata lookup failed; nothing was stored
    #[error(transparent)]
    Enrichment(#[from] EnrichmentError),

    /// Enrichment requested but no OMDb API key is configured
    #[error("No OMDb API key configured; set OMDB_API_KEY to add movies")]
    MissingApiKey,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether to report and return to the prompt instead of exiting
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Common(err) => err.is_recoverable(),
            AppError::Enrichment(_) | AppError::MissingApiKey => true,
            AppError::Io(_) => false,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Common(mcm_common::Error::Database(err))
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;
