//! mcm-cli library interface
//!
//! Exposes the repositories, the enrichment client and the command layer
//! for the `mcm` binary and for integration testing.

pub mod actions;
pub mod cli;
pub mod collection;
pub mod db;
pub mod enrichment;
pub mod error;
pub mod menu;
pub mod website;

pub use crate::error::{AppError, AppResult};

use crate::db::{MovieRepository, UserRepository};
use crate::enrichment::MetadataSource;
use sqlx::SqlitePool;

/// Handles shared by every command
pub struct App {
    pub users: UserRepository,
    pub movies: MovieRepository,
    /// `None` when no API key is configured; only adding movies needs it
    source: Option<Box<dyn MetadataSource>>,
}

impl App {
    pub fn new(pool: SqlitePool, source: Option<Box<dyn MetadataSource>>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            movies: MovieRepository::new(pool),
            source,
        }
    }

    /// Metadata source, or [`AppError::MissingApiKey`] when enrichment is off
    pub fn source(&self) -> AppResult<&dyn MetadataSource> {
        self.source.as_deref().ok_or(AppError::MissingApiKey)
    }
}

/// Version, revision, build time and profile for the startup log
pub fn build_info() -> String {
    format!(
        "mcm v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    )
}
