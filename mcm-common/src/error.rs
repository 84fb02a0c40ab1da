//! Common error types for MCM

use thiserror::Error;

/// Common result type for MCM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across MCM crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested row does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Insert would violate a uniqueness constraint
    #[error("Already exists: {0}")]
    Duplicate(String),

    /// Invalid user input (rejected before any store access)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the interactive session can report this and carry on.
    ///
    /// Storage and I/O failures have no meaningful recovery path for a
    /// single-user tool and are left to terminate the process.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::NotFound(_) | Error::Duplicate(_) | Error::InvalidInput(_)
        )
    }
}

/// Map a unique-constraint violation to [`Error::Duplicate`], leaving every
/// other database error untouched.
pub fn map_unique_violation(err: sqlx::Error, what: impl Into<String>) -> Error {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            Error::Duplicate(what.into())
        }
        _ => Error::Database(err),
    }
}
